use crate::geometry::GeoPoint;
use jiff::SignedDuration;
use slotmap::new_key_type;
use thiserror::Error;

new_key_type! {
    /// Key identifying one active watch subscription on a [`PositionSource`].
    pub struct WatchHandle;
}

/// Failures at the device boundary. All of them are recoverable for the
/// session: a field walk falls back to simulated fixes rather than aborting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// No location capability on this platform
    #[error("positioning is not supported on this device")]
    Unsupported,
    /// The operator denied the location permission
    #[error("location permission denied")]
    PermissionDenied,
    /// The device has no usable fix right now
    #[error("position unavailable")]
    Unavailable,
    /// No fix arrived within the allowed time
    #[error("timed out waiting for a position fix")]
    Timeout,
}

/// Callback receiving each fix delivered to a watch subscription.
pub type OnFix = Box<dyn FnMut(GeoPoint)>;

/// Callback receiving device failures on a watch subscription.
pub type OnError = Box<dyn FnMut(PositionError)>;

/// A provider of GPS fixes: the device location service in the field, a
/// scripted replay everywhere else.
///
/// Single-shot acquisition goes through [`current_fix`]; continuous tracking
/// registers callbacks through [`watch`] and keeps receiving until the
/// subscription is cancelled via its handle. Cancellation stops further
/// deliveries but never invalidates fixes already delivered.
///
/// [`current_fix`]: PositionSource::current_fix
/// [`watch`]: PositionSource::watch
pub trait PositionSource {
    /// Acquire a single fix, failing with [`PositionError::Timeout`] when no
    /// fix can be produced within `timeout`.
    fn current_fix(&mut self, timeout: SignedDuration) -> Result<GeoPoint, PositionError>;

    /// Register callbacks for continuous delivery.
    fn watch(&mut self, on_fix: OnFix, on_error: OnError) -> WatchHandle;

    /// Stop deliveries to `handle`. Unknown or already cancelled handles are
    /// ignored.
    fn cancel_watch(&mut self, handle: WatchHandle);
}
