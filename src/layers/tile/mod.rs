//! Tile layer primitives shared by every tiled layer type

pub mod layer;
pub mod trait_impl;
pub mod types;

pub use layer::TileLayer;
pub use types::TileLayerOptions;
