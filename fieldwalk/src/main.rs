use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use jiff::SignedDuration;
use log::{info, warn};

use fieldwalk::config::WalkConfig;
use fieldwalk::io;
use fieldwalk::io::cli::Cli;
use fieldwalk::io::svg_export::walk_to_svg;
use fieldwalk::replay::replay_walk;
use kapok::geometry::tile::geo_to_tile;
use kapok::io::export::export_report;
use kapok::io::import::Importer;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            WalkConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };
    info!("[MAIN] config: {config:?}");

    let input_file_stem = args.input_file.file_stem().unwrap().to_str().unwrap();

    if !args.report_folder.exists() {
        fs::create_dir_all(&args.report_folder).with_context(|| {
            format!("could not create report folder: {:?}", args.report_folder)
        })?;
    }

    let walk = io::read_walk(args.input_file.as_path())?;
    let importer = Importer::new(
        config.session,
        config.risk_zones.clone().unwrap_or_default(),
        config.jitter_sigma_deg,
        config.prng_seed,
    );
    let (mut session, mut source) = importer.import_walk(&walk)?;

    let timeout = SignedDuration::from_secs(i64::from(config.fix_timeout_secs));
    let summary = replay_walk(&mut session, &mut source, timeout);
    info!("[MAIN] replay summary: {summary:?}");

    let report = export_report(&session, &walk);
    if let Some((lat, lng)) = report.centroid {
        match geo_to_tile(lat, lng, config.centroid_tile_zoom) {
            Ok(tile) => info!("[MAIN] centroid imagery tile: {tile}"),
            Err(err) => warn!("[MAIN] no centroid tile: {err}"),
        }
    }

    {
        let report_path = args
            .report_folder
            .join(format!("report_{input_file_stem}.json"));
        io::write_json(&report, Path::new(&report_path))?;
    }

    {
        let svg_path = args
            .report_folder
            .join(format!("report_{input_file_stem}.svg"));
        let svg = walk_to_svg(&session, config.svg_draw_options)?;
        io::write_svg(&svg, Path::new(&svg_path))?;
    }

    Ok(())
}
