mod boundary;
mod session;
mod vertex;

#[doc(inline)]
pub use boundary::{AccuracyStats, Boundary, BoundaryError};
#[doc(inline)]
pub use session::{Capture, MappingSession, SessionConfig, SessionError, SessionState};
#[doc(inline)]
pub use vertex::{BoundaryVertex, vertex_label};
