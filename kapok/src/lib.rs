//! Boundary capture and deforestation-risk assessment for smallholder farm
//! plots, built for EUDR due-diligence data collection in the field.

/// EUDR thresholds and the compliance assessor
pub mod compliance;

/// Boundaries, vertices and the mapping session driving a plot walk
pub mod entities;

/// Geographic primitives, plot measurement and map-space transforms
pub mod geometry;

/// Importing recorded walks into and exporting assessment reports out of this library
pub mod io;

/// Acquiring device fixes behind a swappable position-source interface
pub mod position;

/// Data-driven deforestation risk zoning
pub mod risk;

/// Helper functions which do not belong to any specific module
pub mod util;
