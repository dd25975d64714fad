use crate::entities::{MappingSession, SessionConfig};
use crate::geometry::GeoPoint;
use crate::io::ext_repr::{ExtFix, ExtMappingSession, ExtPositionFailure, ExtScriptedFix};
use crate::position::{PositionError, ScriptedFix, SimulatedPositionSource, SimulatedSourceConfig};
use crate::risk::RiskTable;
use anyhow::{Result, ensure};
use jiff::SignedDuration;
use log::info;

/// Converts external representations of recorded walks into live sessions.
#[derive(Clone, Debug)]
pub struct Importer {
    pub session_config: SessionConfig,
    pub risk_table: RiskTable,
    /// Standard deviation of Gaussian jitter added to replayed fixes, in
    /// degrees. Zero replays the script verbatim
    pub jitter_sigma_deg: f64,
    /// Seed for the jitter stream; `None` seeds from OS entropy
    pub prng_seed: Option<u64>,
}

impl Importer {
    pub fn new(
        session_config: SessionConfig,
        risk_table: RiskTable,
        jitter_sigma_deg: f64,
        prng_seed: Option<u64>,
    ) -> Importer {
        Importer {
            session_config,
            risk_table,
            jitter_sigma_deg,
            prng_seed,
        }
    }

    /// Builds a fresh session and the scripted source that replays `ext`.
    /// The session starts idle; driving fixes into it is the caller's loop.
    /// Thresholds under which no walk could ever complete are rejected here,
    /// before any session exists.
    pub fn import_walk(
        &self,
        ext: &ExtMappingSession,
    ) -> Result<(MappingSession, SimulatedPositionSource)> {
        let compliance = &self.session_config.compliance;
        ensure!(
            compliance.max_boundary_points >= 3,
            "a capacity of {} vertices can never close a polygon",
            compliance.max_boundary_points
        );
        ensure!(
            compliance.min_boundary_points <= compliance.max_boundary_points,
            "{} vertices required to complete but only {} fit",
            compliance.min_boundary_points,
            compliance.max_boundary_points
        );
        ensure!(!ext.plot_name.trim().is_empty(), "plot name is empty");
        ensure!(!ext.script.is_empty(), "walk script holds no entries");
        ensure!(
            ext.interval_secs > 0,
            "fix interval must be positive, got {} s",
            ext.interval_secs
        );

        let script = ext
            .script
            .iter()
            .map(import_step)
            .collect::<Result<Vec<ScriptedFix>>>()?;

        let sim_config = SimulatedSourceConfig {
            interval: SignedDuration::from_secs(i64::from(ext.interval_secs)),
            cycle: ext.cycle,
            jitter_sigma_deg: self.jitter_sigma_deg,
            prng_seed: self.prng_seed,
            ..SimulatedSourceConfig::default()
        };
        let source = SimulatedPositionSource::new(script, sim_config);
        let session = MappingSession::new(self.session_config, self.risk_table.clone());

        info!(
            "[IMPORT] walk for plot {:?}: {} scripted steps every {} s",
            ext.plot_name,
            ext.script.len(),
            ext.interval_secs
        );
        Ok((session, source))
    }
}

fn import_step(ext: &ExtScriptedFix) -> Result<ScriptedFix> {
    match ext {
        ExtScriptedFix::Fix(fix) => Ok(Ok(import_fix(fix)?)),
        ExtScriptedFix::Failure(failure) => Ok(Err(import_failure(*failure))),
    }
}

pub fn import_fix(ext: &ExtFix) -> Result<GeoPoint> {
    ensure!(
        (-90.0..=90.0).contains(&ext.lat),
        "latitude {} out of range",
        ext.lat
    );
    ensure!(
        (-180.0..=180.0).contains(&ext.lng),
        "longitude {} out of range",
        ext.lng
    );
    match ext.accuracy {
        Some(acc) => {
            ensure!(
                acc.is_finite() && acc >= 0.0,
                "accuracy must be a non-negative number of meters, got {acc}"
            );
            Ok(GeoPoint::with_accuracy(ext.lat, ext.lng, acc))
        }
        None => Ok(GeoPoint::new(ext.lat, ext.lng)),
    }
}

fn import_failure(ext: ExtPositionFailure) -> PositionError {
    match ext {
        ExtPositionFailure::Unsupported => PositionError::Unsupported,
        ExtPositionFailure::PermissionDenied => PositionError::PermissionDenied,
        ExtPositionFailure::Unavailable => PositionError::Unavailable,
        ExtPositionFailure::Timeout => PositionError::Timeout,
    }
}
