pub mod measure;
pub mod tile;

mod bounds;
mod geo_point;
mod viewport;

#[doc(inline)]
pub use bounds::GeoBounds;
#[doc(inline)]
pub use geo_point::GeoPoint;
#[doc(inline)]
pub use measure::{Closure, GeometryError};
#[doc(inline)]
pub use tile::{MAX_TILE_ZOOM, TileCoord, TransformError};
#[doc(inline)]
pub use viewport::Viewport;
