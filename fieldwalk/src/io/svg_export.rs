use anyhow::Result;
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Path, Rectangle, Text, Title};

use kapok::entities::{MappingSession, SessionState, vertex_label};
use kapok::geometry::{GeoBounds, GeoPoint, TransformError, Viewport};

use crate::io::svg_util::{self, SvgDrawOptions};

/// Canvas edge in pixels
const CANVAS_SIZE: f64 = 800.0;
/// Narrowest rendered window in degrees, so degenerate walks (one vertex,
/// every fix identical) still land on a usable canvas
const MIN_WINDOW_SPAN_DEG: f64 = 0.001;
/// Window margin around the walk, as a fraction of its span
const WINDOW_MARGIN: f64 = 0.3;

const METERS_PER_DEGREE: f64 = 111_320.0;

/// Renders the current state of a session: the walked polygon on a plain
/// canvas, vertex markers in their risk color, and optionally labels,
/// accuracy discs and the centroid.
pub fn walk_to_svg(session: &MappingSession, options: SvgDrawOptions) -> Result<Document> {
    let points = session.boundary().points();
    let viewport = walk_viewport(&points)?;
    let theme = options.theme.get_theme();
    let stroke_width = CANVAS_SIZE * 0.002 * theme.stroke_width_multiplier;
    let marker_radius = stroke_width * 1.8;
    let assessment = session.assess();

    let canvas = Rectangle::new()
        .set("width", viewport.width)
        .set("height", viewport.height)
        .set("fill", theme.canvas_fill);

    let mut document = Document::new()
        .set("viewBox", (0.0, 0.0, viewport.width, viewport.height))
        .add(canvas);

    if options.accuracy_discs {
        let mut disc_group = Group::new().set("id", "accuracy");
        for v in session.boundary().vertices() {
            if let Some(acc) = v.point.accuracy {
                let (cx, cy) = viewport.geo_to_pixel(v.point);
                disc_group = disc_group.add(
                    Circle::new()
                        .set("cx", cx)
                        .set("cy", cy)
                        .set("r", meters_to_pixels(acc, &viewport))
                        .set("fill", theme.plot_fill)
                        .set("fill-opacity", "0.25"),
                );
            }
        }
        document = document.add(disc_group);
    }

    if points.len() >= 2 {
        let closed = session.state() == SessionState::Complete;
        let stroke = theme.risk_fill(assessment.risk_level);
        let title = Title::new(format!(
            "{} vertices, {:.4} ha, {:.1} m perimeter, risk: {:?}",
            assessment.boundary_points,
            assessment.area_hectares,
            assessment.perimeter_m,
            assessment.risk_level
        ));
        let plot = data_to_path(
            boundary_data(&points, &viewport, closed),
            &[
                ("fill", if closed { theme.plot_fill } else { "none" }),
                ("fill-opacity", "0.6"),
                ("stroke", stroke),
                ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
                ("stroke-linejoin", "round"),
                ("stroke-linecap", "round"),
            ],
        );
        document = document.add(Group::new().set("id", "plot").add(plot).add(title));
    }

    let mut vertex_group = Group::new().set("id", "vertices");
    let mut label_group = Group::new().set("id", "labels");
    for v in session.boundary().vertices() {
        let (cx, cy) = viewport.geo_to_pixel(v.point);
        let fill = theme.risk_fill(session.risk_table().classify_point(&v.point));
        vertex_group = vertex_group.add(
            Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", marker_radius)
                .set("fill", fill)
                .set("stroke", svg_util::darken(fill, 0.6))
                .set("stroke-width", stroke_width * 0.5),
        );
        if options.vertex_labels {
            let label = v
                .label
                .clone()
                .unwrap_or_else(|| vertex_label(v.ordinal));
            label_group = label_group.add(
                Text::new(label)
                    .set("x", cx + marker_radius * 1.4)
                    .set("y", cy - marker_radius * 1.4)
                    .set("font-size", marker_radius * 2.2)
                    .set("font-family", "monospace")
                    .set("fill", theme.label_fill),
            );
        }
    }
    document = document.add(vertex_group);
    if options.vertex_labels {
        document = document.add(label_group);
    }

    if options.centroid_marker {
        if let Some(c) = assessment.centroid {
            let (cx, cy) = viewport.geo_to_pixel(c);
            document = document.add(
                Group::new()
                    .set("id", "centroid")
                    .add(
                        Circle::new()
                            .set("cx", cx)
                            .set("cy", cy)
                            .set("r", marker_radius * 0.7)
                            .set("fill", theme.centroid_fill),
                    )
                    .add(Title::new(format!(
                        "centroid ({:.6}, {:.6})",
                        c.lat, c.lng
                    ))),
            );
        }
    }

    Ok(document)
}

/// Square viewport wrapping the walk with a margin; a minimum span keeps the
/// mapping valid when every point coincides.
fn walk_viewport(points: &[GeoPoint]) -> Result<Viewport, TransformError> {
    let tight = GeoBounds::enclosing(points).unwrap_or(GeoBounds {
        lat_min: 0.0,
        lat_max: 0.0,
        lng_min: 0.0,
        lng_max: 0.0,
    });
    let raw_span = tight.lat_span().max(tight.lng_span());
    let window = tight.inflate(raw_span * WINDOW_MARGIN);
    let span = window
        .lat_span()
        .max(window.lng_span())
        .max(MIN_WINDOW_SPAN_DEG);
    Viewport::new(window.center(), span, CANVAS_SIZE, CANVAS_SIZE)
}

fn boundary_data(points: &[GeoPoint], viewport: &Viewport, closed: bool) -> Data {
    let mut data = Data::new().move_to(viewport.geo_to_pixel(points[0]));
    for p in &points[1..] {
        data = data.line_to(viewport.geo_to_pixel(*p));
    }
    match closed {
        true => data.close(),
        false => data,
    }
}

fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

fn meters_to_pixels(m: f64, viewport: &Viewport) -> f64 {
    //linear scale of the window, valid for the small windows a walk covers
    m / METERS_PER_DEGREE / viewport.window.lat_span() * viewport.height
}
