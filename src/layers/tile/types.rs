//! Core data types for tile layer functionality

use crate::core::{
    constants::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE},
    geo::LatLngBounds,
};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TileLayerOptions {
    pub tile_size: u32,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub attribution: Option<String>,
    pub opacity: f32,
    pub z_index: i32,
    pub bounds: Option<LatLngBounds>,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            attribution: None,
            opacity: 1.0,
            z_index: 1,
            bounds: None,
        }
    }
}

impl TileLayerOptions {
    /// Replaces out-of-range values with their defaults
    pub fn normalized(mut self) -> Self {
        if self.tile_size == 0 {
            self.tile_size = TILE_SIZE;
        }
        if self.min_zoom > self.max_zoom {
            self.min_zoom = MIN_ZOOM;
            self.max_zoom = MAX_ZOOM;
        }
        if !self.opacity.is_finite() {
            self.opacity = 1.0;
        }
        self.opacity = self.opacity.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_repairs_bad_values() {
        let options = TileLayerOptions {
            tile_size: 0,
            min_zoom: 12,
            max_zoom: 3,
            opacity: 4.0,
            ..Default::default()
        }
        .normalized();

        assert_eq!(options.tile_size, TILE_SIZE);
        assert_eq!(options.min_zoom, MIN_ZOOM);
        assert_eq!(options.max_zoom, MAX_ZOOM);
        assert_eq!(options.opacity, 1.0);
    }

    #[test]
    fn test_deserialize_partial_options() {
        let options: TileLayerOptions =
            serde_json::from_value(serde_json::json!({ "tile_size": 512 })).unwrap();
        assert_eq!(options.tile_size, 512);
        assert_eq!(options.max_zoom, MAX_ZOOM);
    }
}
