//! # maplet-imaging
//!
//! Image tile layer for REST map-imaging services, on top of a small
//! Leaflet-style map core.
//!
//! The layer asks the service for one rendered image per tile, sized to the
//! tile and bounded by the tile's projected extent. Credentials for the
//! service come from an injected [`security::CredentialProvider`].

pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
pub mod security;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    crs::{Crs, PrjCoordSys},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::{Map, MapOptions},
};

pub use crate::layers::{
    base::LayerTrait,
    imaging::{ImageTileLayer, ImageTileLayerOptions},
    tile::{TileLayer, TileLayerOptions},
};

pub use crate::security::{
    append_credential, Credential, CredentialKind, CredentialProvider, SecurityManager, ServerType,
};

pub use crate::tiles::TileSource;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Layer is not attached to a map: {0}")]
    NotAttached(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),
}

/// Error type alias for convenience
pub type Error = MapError;
