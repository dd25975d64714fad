use jiff::SignedDuration;
use kapok::entities::{Capture, MappingSession, SessionError};
use kapok::position::SimulatedPositionSource;
use log::{info, warn};

/// Tally of one replayed walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    pub n_accepted: usize,
    pub n_skipped_accuracy: usize,
    pub n_skipped_spacing: usize,
    pub n_fix_failures: usize,
    pub completed: bool,
}

/// Drives every scripted fix of `source` into `session`, then seals the
/// boundary if enough vertices were captured.
///
/// The timed cadence of a real walk collapses into an eager loop: the session
/// sees the same sequence of capture calls an interval scheduler would
/// produce. Fix failures are logged and skipped, a full boundary ends the
/// walk early.
pub fn replay_walk(
    session: &mut MappingSession,
    source: &mut SimulatedPositionSource,
    timeout: SignedDuration,
) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    while !source.is_exhausted() {
        match session.capture_from(source, timeout) {
            Ok(Capture::Accepted(_)) => summary.n_accepted += 1,
            Ok(Capture::SkippedAccuracy) => summary.n_skipped_accuracy += 1,
            Ok(Capture::SkippedSpacing) => summary.n_skipped_spacing += 1,
            Err(SessionError::Position(err)) => {
                summary.n_fix_failures += 1;
                warn!("[REPLAY] fix failed: {err}");
            }
            Err(SessionError::Boundary(err)) => {
                warn!("[REPLAY] capture stopped: {err}");
                break;
            }
        }
    }

    match session.complete() {
        Ok(assessment) => {
            summary.completed = true;
            info!(
                "[REPLAY] walk of {} fixes captured {} vertices, {:.4} ha at {:?} risk",
                summary.n_accepted + summary.n_skipped_accuracy + summary.n_skipped_spacing,
                assessment.boundary_points,
                assessment.area_hectares,
                assessment.risk_level
            );
        }
        Err(err) => warn!("[REPLAY] boundary left open: {err}"),
    }
    summary
}
