use crate::compliance::ComplianceAssessment;
use crate::entities::{BoundaryVertex, MappingSession};
//Checks to verify correctness of the state of the system
//Used in debug_assert!() blocks

pub fn ordinals_are_contiguous(vertices: &[BoundaryVertex]) -> bool {
    vertices.iter().enumerate().all(|(i, v)| v.ordinal == i)
}

pub fn assessment_matches_session(
    assessment: &ComplianceAssessment,
    session: &MappingSession,
) -> bool {
    *assessment == session.assess()
}
