use crate::geometry::GeoPoint;

/// A captured point of a [`Boundary`], in insertion order.
///
/// The ordinal is the zero-based insertion index and defines the polygon
/// winding. The label is the surveyor-facing marker name; vertices created
/// during a walk get one automatically, imported ones may carry none.
///
/// [`Boundary`]: crate::entities::Boundary
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryVertex {
    pub point: GeoPoint,
    pub ordinal: usize,
    pub label: Option<String>,
}

impl BoundaryVertex {
    /// Vertex at its insertion position, labeled from the ordinal.
    pub fn new(ordinal: usize, point: GeoPoint) -> Self {
        BoundaryVertex {
            point,
            ordinal,
            label: Some(vertex_label(ordinal)),
        }
    }
}

/// Marker label for a zero-based vertex index: `A`..`Z`, then `AA`, `AB`, ...
/// (bijective base 26, spreadsheet-column style).
pub fn vertex_label(ordinal: usize) -> String {
    let mut n = ordinal + 1;
    let mut label = String::new();
    while n > 0 {
        n -= 1;
        label.insert(0, char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    label
}
