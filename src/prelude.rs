//! Prelude module for common maplet-imaging types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use maplet_imaging::prelude::*;`

pub use crate::core::{
    crs::{Crs, PrjCoordSys},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::{Map, MapOptions},
};

pub use crate::layers::{
    base::{LayerProperties, LayerTrait, LayerType},
    imaging::{ImageTileLayer, ImageTileLayerOptions, ViewBounds},
    manager::LayerManager,
    tile::{TileLayer, TileLayerOptions},
};

pub use crate::data::{GeoJsonGeometry, ServerGeometry};

pub use crate::security::{
    append_credential, Credential, CredentialKind, CredentialProvider, NoCredentials,
    SecurityManager, ServerType,
};

pub use crate::tiles::TileSource;

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
