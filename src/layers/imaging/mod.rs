//! Tile layer backed by a REST map-imaging service
//!
//! Every tile is requested as a rendered image of its projected extent:
//! `<service>/image.png?width=..&height=..&...&viewBounds={...}`. The static
//! part of that URL, credentials included, is assembled once when the layer
//! is added to a map.

pub mod options;
pub mod params;

pub use options::ImageTileLayerOptions;
pub use params::ViewBounds;

use crate::{
    core::{
        crs::Crs,
        geo::{LatLngBounds, TileCoord},
        map::Map,
    },
    layers::{
        base::{LayerTrait, LayerType},
        tile::TileLayer,
    },
    security::{append_credential, CredentialProvider, NoCredentials},
    tiles::TileSource,
    MapError, Result,
};
use std::sync::Arc;

pub struct ImageTileLayer {
    base: TileLayer,
    service_url: String,
    options: ImageTileLayerOptions,
    credentials: Arc<dyn CredentialProvider>,
    crs: Option<Crs>,
    layer_url: Option<String>,
}

impl ImageTileLayer {
    pub fn new(id: impl Into<String>, service_url: impl Into<String>, options: ImageTileLayerOptions) -> Self {
        let mut options = options;
        options.tile = options.tile.normalized();
        let base = TileLayer::new(id.into(), options.tile.clone()).with_name("Image Tile Layer");

        Self {
            base,
            service_url: service_url.into(),
            options,
            credentials: Arc::new(NoCredentials),
            crs: None,
            layer_url: None,
        }
    }

    /// Creates a layer from a JSON options bag merged over the defaults
    pub fn from_json(
        id: impl Into<String>,
        service_url: impl Into<String>,
        overrides: &serde_json::Value,
    ) -> Result<Self> {
        Ok(Self::new(id, service_url, ImageTileLayerOptions::from_json(overrides)?))
    }

    /// Credential source used when the layer URL is built
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    pub fn image_options(&self) -> &ImageTileLayerOptions {
        &self.options
    }

    /// Static request URL, available while the layer is on a map
    pub fn layer_url(&self) -> Option<&str> {
        self.layer_url.as_deref()
    }

    /// CRS tiles are requested in, resolved on attach
    pub fn crs(&self) -> Option<Crs> {
        self.crs
    }

    /// Request URL of one tile
    pub fn tile_url(&self, coord: TileCoord) -> Result<String> {
        let (layer_url, crs) = match (&self.layer_url, self.crs) {
            (Some(url), Some(crs)) => (url, crs),
            _ => {
                return Err(MapError::NotAttached(format!(
                    "image tile layer '{}'",
                    self.base.id()
                )))
            }
        };

        let bounds = self.base.tile_coords_to_bounds(&coord)?;
        let view_bounds = ViewBounds::from_corners(
            crs.project(&bounds.north_west()),
            crs.project(&bounds.south_east()),
        );

        Ok(format!("{}&viewBounds={}", layer_url, view_bounds.to_json()?))
    }

    fn build_layer_url(&self) -> Result<String> {
        let image_url = params::image_url(&self.service_url, &self.options)?;
        let layer_url = append_credential(
            &image_url,
            self.options.server_type,
            self.credentials.as_ref(),
        );

        #[cfg(feature = "debug")]
        log::debug!(
            "Image tile layer '{}' requests {} ({} server, credential {})",
            self.base.id(),
            image_url,
            self.options.server_type,
            if layer_url.len() > image_url.len() { "attached" } else { "none" }
        );

        Ok(layer_url)
    }
}

impl LayerTrait for ImageTileLayer {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn name(&self) -> &str {
        self.base.name()
    }

    fn layer_type(&self) -> LayerType {
        self.base.layer_type()
    }

    fn is_visible(&self) -> bool {
        self.base.is_visible()
    }

    fn set_visible(&mut self, visible: bool) {
        self.base.set_visible(visible);
    }

    fn opacity(&self) -> f32 {
        self.base.opacity()
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.base.set_opacity(opacity);
    }

    fn z_index(&self) -> i32 {
        self.base.z_index()
    }

    fn set_z_index(&mut self, z_index: i32) {
        self.base.set_z_index(z_index);
    }

    fn on_add(&mut self, map: &Map) -> Result<()> {
        self.crs = Some(self.options.crs.unwrap_or_else(|| map.crs()));
        self.layer_url = Some(self.build_layer_url()?);
        self.base.on_add(map)
    }

    fn on_remove(&mut self, map: &Map) -> Result<()> {
        self.layer_url = None;
        self.crs = None;
        self.base.on_remove(map)
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        self.base.bounds()
    }

    fn attribution(&self) -> Option<&str> {
        self.base.attribution()
    }

    fn options(&self) -> serde_json::Value {
        self.options.to_json()
    }

    fn as_tile_source(&self) -> Option<&dyn TileSource> {
        Some(self)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

impl TileSource for ImageTileLayer {
    fn url(&self, coord: TileCoord) -> Result<String> {
        self.tile_url(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::SecurityManager;

    const SERVICE: &str = "http://localhost:8090/iserver/services/map-world/rest/maps/World";

    fn attached(options: ImageTileLayerOptions) -> ImageTileLayer {
        let mut layer = ImageTileLayer::new("world", SERVICE, options);
        layer.on_add(&Map::default()).unwrap();
        layer
    }

    fn view_bounds(url: &str) -> serde_json::Value {
        let (_, json) = url.split_once("&viewBounds=").unwrap();
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_tile_url_before_attach() {
        let layer = ImageTileLayer::new("world", SERVICE, ImageTileLayerOptions::default());
        assert!(layer.layer_url().is_none());
        assert!(matches!(
            layer.tile_url(TileCoord::new(0, 0, 0)),
            Err(MapError::NotAttached(_))
        ));
    }

    #[test]
    fn test_default_layer_url() {
        let layer = attached(ImageTileLayerOptions::default());
        assert_eq!(
            layer.layer_url(),
            Some(
                "http://localhost:8090/iserver/services/map-world/rest/maps/World/image.png?\
                 width=256&height=256&redirect=false&transparent=false&cacheEnabled=true&overlapDisplayed=true"
            )
        );
        assert_eq!(layer.crs(), Some(Crs::Epsg3857));
    }

    #[test]
    fn test_world_tile_view_bounds() {
        let layer = attached(ImageTileLayerOptions::default());
        let url = layer.tile_url(TileCoord::new(0, 0, 0)).unwrap();
        let bounds = view_bounds(&url);

        let half_world = 20037508.342789244;
        let left = bounds["leftBottom"]["x"].as_f64().unwrap();
        let bottom = bounds["leftBottom"]["y"].as_f64().unwrap();
        let right = bounds["rightTop"]["x"].as_f64().unwrap();
        let top = bounds["rightTop"]["y"].as_f64().unwrap();

        assert!((left + half_world).abs() < 1e-3);
        assert!((right - half_world).abs() < 1e-3);
        assert!((bottom + half_world).abs() < 1.0);
        assert!((top - half_world).abs() < 1.0);
    }

    #[test]
    fn test_tile_url_is_stable() {
        let layer = attached(ImageTileLayerOptions::default());
        let coord = TileCoord::new(3, 5, 4);
        assert_eq!(layer.tile_url(coord).unwrap(), layer.tile_url(coord).unwrap());
        assert_eq!(layer.url(coord).unwrap(), layer.tile_url(coord).unwrap());
    }

    #[test]
    fn test_explicit_crs_wins() {
        let layer = attached(ImageTileLayerOptions::new().with_crs(Crs::Epsg4326));
        assert_eq!(layer.crs(), Some(Crs::Epsg4326));

        // Map is mercator, tiles are projected as lon/lat degrees
        let bounds = view_bounds(&layer.tile_url(TileCoord::new(0, 0, 0)).unwrap());
        assert!((bounds["leftBottom"]["x"].as_f64().unwrap() + 180.0).abs() < 1e-9);
        assert!((bounds["rightTop"]["x"].as_f64().unwrap() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_range_limits_tiles() {
        let layer = attached(ImageTileLayerOptions::default());
        assert!(matches!(
            layer.tile_url(TileCoord::new(0, 0, 25)),
            Err(MapError::InvalidCoordinates(_))
        ));

        let options = ImageTileLayerOptions::from_json(&serde_json::json!({
            "minZoom": 2,
            "maxZoom": 20,
        }))
        .unwrap();
        let layer = attached(options);
        assert!(layer.tile_url(TileCoord::new(0, 0, 1)).is_err());
        assert!(layer.tile_url(TileCoord::new(0, 0, 20)).is_ok());
    }

    #[test]
    fn test_reattach_rebuilds_for_new_map() {
        let mercator = Map::default();
        let geographic = Map::default().with_crs(Crs::Epsg4326);
        let mut layer = ImageTileLayer::new("world", SERVICE, ImageTileLayerOptions::default());
        let coord = TileCoord::new(0, 0, 0);

        layer.on_add(&mercator).unwrap();
        let first = layer.tile_url(coord).unwrap();
        layer.on_remove(&mercator).unwrap();

        layer.on_add(&geographic).unwrap();
        assert_eq!(layer.crs(), Some(Crs::Epsg4326));
        let second = layer.tile_url(coord).unwrap();
        assert_ne!(first, second);
        assert!((view_bounds(&second)["leftBottom"]["x"].as_f64().unwrap() + 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_credentials_appended_on_attach() {
        let credentials = Arc::new(SecurityManager::new().with_token(SERVICE, "t0k"));
        let mut layer = ImageTileLayer::new("world", SERVICE, ImageTileLayerOptions::default())
            .with_credentials(credentials);
        layer.on_add(&Map::default()).unwrap();

        let url = layer.tile_url(TileCoord::new(0, 0, 1)).unwrap();
        assert!(url.contains("&overlapDisplayed=true&token=t0k&viewBounds="));
    }

    #[test]
    fn test_remove_clears_layer_url() {
        let map = Map::default();
        let mut layer = attached(ImageTileLayerOptions::default());
        layer.on_remove(&map).unwrap();
        assert!(layer.layer_url().is_none());
        assert!(layer.tile_url(TileCoord::new(0, 0, 0)).is_err());
    }

    #[test]
    fn test_layer_trait_forwards_to_base() {
        let mut layer = attached(ImageTileLayerOptions::new().with_attribution("© test"));
        assert_eq!(layer.id(), "world");
        assert_eq!(layer.layer_type(), LayerType::Tile);
        assert_eq!(layer.attribution(), Some("© test"));

        layer.set_opacity(0.25);
        assert_eq!(layer.opacity(), 0.25);
        assert!(layer.as_tile_source().is_some());
        assert_eq!(layer.options()["cacheEnabled"], true);
    }
}
