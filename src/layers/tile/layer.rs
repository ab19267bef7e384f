//! Core TileLayer implementation

use super::TileLayerOptions;
use crate::{
    core::{
        crs::Crs,
        geo::{LatLngBounds, Point, TileCoord},
        map::Map,
    },
    layers::base::{LayerProperties, LayerType},
    MapError, Result,
};

/// Base tile layer: owns the tile grid and the map attachment state.
/// Concrete tile layers wrap it and forward their lifecycle hooks to it.
pub struct TileLayer {
    pub(crate) properties: LayerProperties,
    pub(crate) options: TileLayerOptions,
    pub(crate) map_crs: Option<Crs>,
}

impl TileLayer {
    /// Create a new tile layer with Leaflet-style configuration
    pub fn new(id: String, options: TileLayerOptions) -> Self {
        let options = options.normalized();
        let properties = LayerProperties {
            id,
            name: "Tile Layer".to_string(),
            layer_type: LayerType::Tile,
            visible: true,
            opacity: options.opacity,
            z_index: options.z_index,
        };

        Self {
            properties,
            options,
            map_crs: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.properties.name = name.into();
        self
    }

    /// CRS of the map this layer is attached to
    pub fn map_crs(&self) -> Option<Crs> {
        self.map_crs
    }

    pub(crate) fn attach(&mut self, map: &Map) {
        self.map_crs = Some(map.crs());
    }

    pub(crate) fn detach(&mut self) {
        self.map_crs = None;
    }

    /// Whether a tile lies inside the layer's zoom range
    pub fn is_valid_tile(&self, coord: &TileCoord) -> bool {
        coord.z >= self.options.min_zoom && coord.z <= self.options.max_zoom
    }

    /// Geographic bounds of a tile, through the attached map's CRS.
    /// Matches Leaflet's `_tileCoordsToBounds`; tiles outside the zoom range
    /// are rejected.
    pub fn tile_coords_to_bounds(&self, coord: &TileCoord) -> Result<LatLngBounds> {
        let crs = self.map_crs.ok_or_else(|| {
            MapError::NotAttached(format!("tile layer '{}'", self.properties.id))
        })?;
        if !self.is_valid_tile(coord) {
            return Err(MapError::InvalidCoordinates(format!(
                "tile {} is outside zoom range {}..={} of layer '{}'",
                coord, self.options.min_zoom, self.options.max_zoom, self.properties.id
            )));
        }

        let tile_size = self.options.tile_size as f64;
        let nw_point = Point::new(coord.x as f64, coord.y as f64).multiply(tile_size);
        let se_point = nw_point.add(&Point::new(tile_size, tile_size));

        let zoom = coord.z as f64;
        let nw = crs.point_to_lat_lng(&nw_point, zoom);
        let se = crs.point_to_lat_lng(&se_point, zoom);

        Ok(LatLngBounds::from_corners(nw, se))
    }
}
