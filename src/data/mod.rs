//! Geometry data exchanged with the imaging service

pub mod geojson;
pub mod server_geometry;

pub use geojson::GeoJsonGeometry;
pub use server_geometry::{ServerGeometry, ServerGeometryType, ServerPoint};
