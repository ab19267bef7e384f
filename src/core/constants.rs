//! Core constants derived from Leaflet defaults and the imaging service conventions.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Default zoom range for tile layers.
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 18;

/// Resource appended to a map service URL to request a rendered image.
pub const IMAGE_RESOURCE: &str = "image.png";

/// Attribution shown for imaging-service layers unless overridden.
pub const DEFAULT_ATTRIBUTION: &str = "Map Data © iServer imaging service";
