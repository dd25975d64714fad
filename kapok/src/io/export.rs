use crate::entities::{MappingSession, SessionState, vertex_label};
use crate::io::ext_repr::{ExtBoundaryReport, ExtMappedPoint, ExtMappingSession};
use crate::util::assertions;
use itertools::Itertools;

/// Exports a session by composing an [`ExtBoundaryReport`] from it, echoing
/// the plot metadata of the walk that fed it. Valid at any point of the
/// session lifecycle; a report of an unsealed session simply carries
/// `is_complete: false` and an open-chain perimeter.
pub fn export_report(session: &MappingSession, walk: &ExtMappingSession) -> ExtBoundaryReport {
    let assessment = session.assess();
    debug_assert!(assertions::assessment_matches_session(&assessment, session));

    ExtBoundaryReport {
        plot_name: walk.plot_name.clone(),
        farmer: walk.farmer.clone(),
        country: walk.country.clone(),
        is_complete: session.state() == SessionState::Complete,
        points: export_points(session),
        boundary_points_count: assessment.boundary_points,
        area_hectares: assessment.area_hectares,
        perimeter_meters: assessment.perimeter_m,
        centroid: assessment.centroid.map(|c| (c.lat, c.lng)),
        risk_level: assessment.risk_level,
        gps_precision: assessment.gps_precision,
        signal_quality: assessment.signal_quality,
        accuracy_mean_m: assessment.accuracy.map(|a| a.mean_m),
        accuracy_worst_m: assessment.accuracy.map(|a| a.worst_m),
        forest_definition_applies: assessment.forest_definition_applies,
        polygon_mapping_required: assessment.polygon_mapping_required,
    }
}

/// Exports the captured vertices to a vector of [`ExtMappedPoint`], each
/// classified against the session's risk table.
pub fn export_points(session: &MappingSession) -> Vec<ExtMappedPoint> {
    session
        .boundary()
        .vertices()
        .iter()
        .map(|v| ExtMappedPoint {
            label: v
                .label
                .clone()
                .unwrap_or_else(|| vertex_label(v.ordinal)),
            lat: v.point.lat,
            lng: v.point.lng,
            accuracy: v.point.accuracy,
            risk_level: session.risk_table().classify_point(&v.point),
        })
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SessionConfig;
    use crate::geometry::GeoPoint;
    use crate::io::ext_repr::{ExtFix, ExtScriptedFix};
    use crate::risk::{RiskLevel, RiskTable};

    fn lofa_walk() -> ExtMappingSession {
        ExtMappingSession {
            plot_name: "Cocoa Plot 1".to_string(),
            farmer: Some("Moses Tuah".to_string()),
            country: Some("LR".to_string()),
            interval_secs: 2,
            cycle: false,
            script: vec![ExtScriptedFix::Fix(ExtFix {
                lat: 7.225282,
                lng: -9.003844,
                accuracy: Some(3.1),
            })],
        }
    }

    #[test]
    fn test_report_of_a_completed_walk() {
        let mut session = MappingSession::new(SessionConfig::default(), RiskTable::default());
        session
            .append(GeoPoint::with_accuracy(7.225282, -9.003844, 3.1))
            .unwrap();
        session
            .append(GeoPoint::with_accuracy(7.22539, -9.00372, 2.8))
            .unwrap();
        session
            .append(GeoPoint::with_accuracy(7.22545, -9.00358, 4.0))
            .unwrap();
        session.complete().unwrap();

        let report = export_report(&session, &lofa_walk());
        assert!(report.is_complete);
        assert_eq!(report.boundary_points_count, 3);
        assert_eq!(report.points.len(), 3);
        assert_eq!(report.points[0].label, "A");
        assert_eq!(report.points[2].label, "C");
        assert_eq!(report.plot_name, "Cocoa Plot 1");
        assert_eq!(report.accuracy_worst_m, Some(4.0));
        assert!(report.area_hectares > 0.0);
        //the walk sits north of every zone in the built-in table
        assert_eq!(report.risk_level, RiskLevel::Low);
        assert!(report.points.iter().all(|p| p.risk_level == RiskLevel::Low));
    }

    #[test]
    fn test_report_of_an_unsealed_walk_stays_open() {
        let mut session = MappingSession::new(SessionConfig::default(), RiskTable::default());
        session.append(GeoPoint::new(7.225282, -9.003844)).unwrap();
        session.append(GeoPoint::new(7.22539, -9.00372)).unwrap();

        let report = export_report(&session, &lofa_walk());
        assert!(!report.is_complete);
        assert_eq!(report.boundary_points_count, 2);
        assert_eq!(report.area_hectares, 0.0);
        assert_eq!(report.accuracy_mean_m, None);
    }

    #[test]
    fn test_report_serializes_without_null_noise() {
        let session = MappingSession::new(SessionConfig::default(), RiskTable::default());
        let report = export_report(&session, &lofa_walk());
        let json = serde_json::to_string(&report).unwrap();
        //absent optionals are skipped, not rendered as null
        assert!(!json.contains("null"));
        assert!(json.contains("\"is_complete\":false"));
    }
}
