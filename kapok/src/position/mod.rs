mod signal;
mod simulated;
mod source;

#[doc(inline)]
pub use signal::SignalQuality;
#[doc(inline)]
pub use simulated::{ScriptedFix, SimulatedPositionSource, SimulatedSourceConfig};
#[doc(inline)]
pub use source::{OnError, OnFix, PositionError, PositionSource, WatchHandle};
