use crate::compliance::{self, ComplianceAssessment, ComplianceConfig};
use crate::entities::boundary::{Boundary, BoundaryError};
use crate::geometry::GeoPoint;
use crate::geometry::measure::{self, Closure};
use crate::position::{PositionError, PositionSource, SimulatedPositionSource};
use crate::risk::{RiskLevel, RiskTable};
use jiff::SignedDuration;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle of one plot walk. Derived from the session contents, never
/// stored: an empty unsealed session is idle, a non-empty unsealed session
/// is tracking, a sealed session is complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Tracking,
    Complete,
}

/// Outcome of offering one fix to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capture {
    /// Vertex stored. Contains the vertex count after the append.
    Accepted(usize),
    /// Fix rejected, reported accuracy above the configured limit.
    SkippedAccuracy,
    /// Fix rejected, too close to the previous vertex.
    SkippedSpacing,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error(transparent)]
    Boundary(#[from] BoundaryError),
}

/// Capture policy of a session, on top of the compliance thresholds.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    pub compliance: ComplianceConfig,
    /// Worst acceptable reported accuracy in meters. Fixes with a larger
    /// uncertainty radius are skipped; fixes without a reported accuracy
    /// pass the gate.
    #[serde(default)]
    pub min_accuracy_m: Option<f64>,
    /// Minimum haversine spacing in meters to the previous vertex. Closer
    /// fixes are skipped. Off by default: stationary jitter duplicates are
    /// part of the raw walk record.
    #[serde(default)]
    pub min_spacing_m: Option<f64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            compliance: ComplianceConfig::default(),
            min_accuracy_m: None,
            min_spacing_m: None,
        }
    }
}

/// One farmer plot walk: owns the boundary under construction, the capture
/// policy and the risk table, and seals the boundary on completion.
///
/// Single-threaded by design. Fixes arrive through [`MappingSession::append`]
/// or [`MappingSession::capture_from`] on the thread that owns the session;
/// geometry and compliance reads recompute synchronously from the current
/// vertex sequence.
pub struct MappingSession {
    boundary: Boundary,
    config: SessionConfig,
    risk_table: RiskTable,
    sealed: bool,
    /// Engaged when a live source fails, so a field session survives
    /// individual fix failures.
    fallback: Option<SimulatedPositionSource>,
}

impl MappingSession {
    pub fn new(config: SessionConfig, risk_table: RiskTable) -> Self {
        MappingSession {
            boundary: Boundary::new(config.compliance.max_boundary_points),
            config,
            risk_table,
            sealed: false,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: SimulatedPositionSource) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn state(&self) -> SessionState {
        match (self.sealed, self.boundary.is_empty()) {
            (true, _) => SessionState::Complete,
            (false, true) => SessionState::Idle,
            (false, false) => SessionState::Tracking,
        }
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn risk_table(&self) -> &RiskTable {
        &self.risk_table
    }

    /// Offer a fix. Gated fixes are skipped, not errors: a skip leaves the
    /// boundary untouched and the walk continues with the next fix.
    pub fn append(&mut self, point: GeoPoint) -> Result<Capture, SessionError> {
        if self.sealed {
            return Err(BoundaryError::AlreadyComplete.into());
        }
        if let (Some(limit), Some(acc)) = (self.config.min_accuracy_m, point.accuracy) {
            if acc > limit {
                debug!("[SESSION] fix skipped, accuracy {acc:.1} m over the {limit:.1} m limit");
                return Ok(Capture::SkippedAccuracy);
            }
        }
        if let (Some(min_m), Some(prev)) = (self.config.min_spacing_m, self.boundary.last_point())
        {
            let spacing = measure::haversine_m(prev, point);
            if spacing < min_m {
                debug!("[SESSION] fix skipped, {spacing:.1} m from previous vertex");
                return Ok(Capture::SkippedSpacing);
            }
        }
        self.boundary.append(point)?;
        let n = self.boundary.n_vertices();
        debug!(
            "[SESSION] vertex {}/{} at ({:.6}, {:.6})",
            n,
            self.boundary.max_points(),
            point.lat,
            point.lng
        );
        Ok(Capture::Accepted(n))
    }

    /// Pull one fix from `source` and offer it to the session. When the
    /// source fails and a fallback is configured, the fix comes from the
    /// fallback instead; gates apply to fallback fixes all the same.
    pub fn capture_from(
        &mut self,
        source: &mut dyn PositionSource,
        timeout: SignedDuration,
    ) -> Result<Capture, SessionError> {
        if self.sealed {
            return Err(BoundaryError::AlreadyComplete.into());
        }
        let fix = match source.current_fix(timeout) {
            Ok(fix) => fix,
            Err(err) => match &mut self.fallback {
                Some(sim) => {
                    warn!("[SESSION] live fix failed ({err}), using simulated fallback");
                    sim.current_fix(timeout)?
                }
                None => return Err(err.into()),
            },
        };
        self.append(fix)
    }

    /// Seal the boundary. From here on the perimeter includes the closing
    /// edge and further appends fail with
    /// [`BoundaryError::AlreadyComplete`].
    pub fn complete(&mut self) -> Result<ComplianceAssessment, SessionError> {
        if self.sealed {
            return Err(BoundaryError::AlreadyComplete.into());
        }
        let required = self.config.compliance.min_boundary_points;
        let got = self.boundary.n_vertices();
        if got < required {
            return Err(BoundaryError::InsufficientPoints { got, required }.into());
        }
        self.sealed = true;
        let assessment = self.assess();
        info!(
            "[SESSION] boundary complete: {} vertices, {:.4} ha, {:.1} m perimeter, {:?} risk",
            got, assessment.area_hectares, assessment.perimeter_m, assessment.risk_level
        );
        Ok(assessment)
    }

    /// Discard all vertices and the seal. The only corrective action:
    /// vertices cannot be edited or deleted one by one.
    pub fn reset(&mut self) {
        self.boundary.clear();
        self.sealed = false;
        debug!("[SESSION] reset");
    }

    fn closure(&self) -> Closure {
        match self.sealed {
            true => Closure::Closed,
            false => Closure::Open,
        }
    }

    pub fn area_hectares(&self) -> f64 {
        self.boundary.area_hectares()
    }

    /// Perimeter of the walk so far: open chain while tracking, closed ring
    /// once sealed.
    pub fn perimeter_m(&self) -> f64 {
        self.boundary.perimeter_m(self.closure())
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_table.classify_boundary(&self.boundary.points())
    }

    pub fn assess(&self) -> ComplianceAssessment {
        compliance::assess(
            &self.boundary,
            &self.risk_table,
            &self.config.compliance,
            self.closure(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{ScriptedFix, SimulatedSourceConfig};
    use float_cmp::approx_eq;

    fn tracking_session() -> MappingSession {
        MappingSession::new(SessionConfig::default(), RiskTable::default())
    }

    const WALK: [(f64, f64); 3] = [
        (7.225282, -9.003844),
        (7.22539, -9.00372),
        (7.22545, -9.00358),
    ];

    #[test]
    fn test_state_machine_transitions() {
        let mut session = tracking_session();
        assert_eq!(session.state(), SessionState::Idle);

        for (lat, lng) in WALK {
            session.append(GeoPoint::new(lat, lng)).unwrap();
        }
        assert_eq!(session.state(), SessionState::Tracking);

        session.complete().unwrap();
        assert_eq!(session.state(), SessionState::Complete);

        session.reset();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.boundary().n_vertices(), 0);
    }

    #[test]
    fn test_sealed_session_rejects_appends_and_recompletion() {
        let mut session = tracking_session();
        for (lat, lng) in WALK {
            session.append(GeoPoint::new(lat, lng)).unwrap();
        }
        session.complete().unwrap();

        assert!(matches!(
            session.append(GeoPoint::new(7.2256, -9.0034)),
            Err(SessionError::Boundary(BoundaryError::AlreadyComplete))
        ));
        assert!(matches!(
            session.complete(),
            Err(SessionError::Boundary(BoundaryError::AlreadyComplete))
        ));
        assert_eq!(session.boundary().n_vertices(), 3);
    }

    #[test]
    fn test_completion_needs_min_points() {
        let mut session = tracking_session();
        session.append(GeoPoint::new(7.225282, -9.003844)).unwrap();
        session.append(GeoPoint::new(7.22539, -9.00372)).unwrap();

        assert!(matches!(
            session.complete(),
            Err(SessionError::Boundary(BoundaryError::InsufficientPoints {
                got: 2,
                required: 3
            }))
        ));
        //the failed completion left the walk intact and unsealed
        assert_eq!(session.state(), SessionState::Tracking);
        session.append(GeoPoint::new(7.22545, -9.00358)).unwrap();
        assert!(session.complete().is_ok());
    }

    #[test]
    fn test_perimeter_closes_only_after_completion() {
        let mut session = tracking_session();
        for (lat, lng) in WALK {
            session.append(GeoPoint::new(lat, lng)).unwrap();
        }
        let open = session.perimeter_m();
        session.complete().unwrap();
        let closed = session.perimeter_m();
        let closing_edge = measure::haversine_m(WALK[2].into(), WALK[0].into());

        assert!(approx_eq!(f64, closed, open + closing_edge, epsilon = 1e-9));
    }

    #[test]
    fn test_accuracy_gate_skips_poor_fixes() {
        let config = SessionConfig {
            min_accuracy_m: Some(10.0),
            ..SessionConfig::default()
        };
        let mut session = MappingSession::new(config, RiskTable::default());

        let poor = GeoPoint::with_accuracy(7.225282, -9.003844, 35.0);
        assert_eq!(session.append(poor).unwrap(), Capture::SkippedAccuracy);
        assert_eq!(session.state(), SessionState::Idle);

        let good = GeoPoint::with_accuracy(7.225282, -9.003844, 4.0);
        assert_eq!(session.append(good).unwrap(), Capture::Accepted(1));

        //unreported accuracy passes the gate
        let silent = GeoPoint::new(7.22539, -9.00372);
        assert_eq!(session.append(silent).unwrap(), Capture::Accepted(2));
    }

    #[test]
    fn test_spacing_gate_skips_stationary_jitter() {
        let config = SessionConfig {
            min_spacing_m: Some(5.0),
            ..SessionConfig::default()
        };
        let mut session = MappingSession::new(config, RiskTable::default());

        session.append(GeoPoint::new(7.225282, -9.003844)).unwrap();
        //~1e-6 deg of jitter is well under a meter
        let jittered = GeoPoint::new(7.225283, -9.003845);
        assert_eq!(session.append(jittered).unwrap(), Capture::SkippedSpacing);
        assert_eq!(session.boundary().n_vertices(), 1);

        //~12 m north clears the gate
        let moved = GeoPoint::new(7.22539, -9.003844);
        assert_eq!(session.append(moved).unwrap(), Capture::Accepted(2));
    }

    #[test]
    fn test_duplicates_accepted_without_spacing_gate() {
        let mut session = tracking_session();
        let p = GeoPoint::new(7.225282, -9.003844);
        assert_eq!(session.append(p).unwrap(), Capture::Accepted(1));
        assert_eq!(session.append(p).unwrap(), Capture::Accepted(2));
    }

    #[test]
    fn test_capture_from_engages_fallback() {
        let script: Vec<ScriptedFix> = vec![Ok(GeoPoint::new(7.225282, -9.003844))];
        let sim = SimulatedPositionSource::new(script, SimulatedSourceConfig::default());
        let mut session = tracking_session().with_fallback(sim);

        //a source that only ever fails
        let mut dead = SimulatedPositionSource::new(
            vec![Err(PositionError::PermissionDenied)],
            SimulatedSourceConfig::default(),
        );
        let outcome = session
            .capture_from(&mut dead, SignedDuration::from_secs(5))
            .unwrap();
        assert_eq!(outcome, Capture::Accepted(1));
    }

    #[test]
    fn test_capture_from_without_fallback_propagates() {
        let mut session = tracking_session();
        let mut dead = SimulatedPositionSource::new(
            vec![Err(PositionError::Unavailable)],
            SimulatedSourceConfig::default(),
        );
        assert!(matches!(
            session.capture_from(&mut dead, SignedDuration::from_secs(5)),
            Err(SessionError::Position(PositionError::Unavailable))
        ));
        assert_eq!(session.state(), SessionState::Idle);
    }
}
