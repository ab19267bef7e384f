//! Options of the image tile layer
//!
//! Built either through the `with_*` methods or by merging a JSON bag that
//! uses the service's own option names (`layersID`, `cacheEnabled`, ...).
//! Merging never fails on a bad value: a field of the wrong type leaves the
//! default in place.

use crate::{
    core::{
        constants::DEFAULT_ATTRIBUTION,
        crs::{Crs, PrjCoordSys},
    },
    data::{GeoJsonGeometry, ServerGeometry},
    layers::tile::TileLayerOptions,
    security::ServerType,
    MapError, Result,
};
use geo_types::Geometry;
use serde_json::{json, Map as JsonMap, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ImageTileLayerOptions {
    /// Tile grid options shared with every tile layer
    pub tile: TileLayerOptions,
    pub layers_id: Option<String>,
    pub redirect: bool,
    pub transparent: bool,
    pub cache_enabled: bool,
    pub prj_coord_sys: Option<PrjCoordSys>,
    pub clip_region_enabled: bool,
    pub clip_region: Option<Geometry<f64>>,
    pub overlap_displayed: bool,
    pub overlap_displayed_options: Option<String>,
    pub tileversion: Option<String>,
    /// Overrides the CRS inherited from the map
    pub crs: Option<Crs>,
    pub server_type: ServerType,
}

impl Default for ImageTileLayerOptions {
    fn default() -> Self {
        Self {
            tile: TileLayerOptions {
                attribution: Some(DEFAULT_ATTRIBUTION.to_string()),
                ..TileLayerOptions::default()
            },
            layers_id: None,
            redirect: false,
            transparent: false,
            cache_enabled: true,
            prj_coord_sys: None,
            clip_region_enabled: false,
            clip_region: None,
            overlap_displayed: true,
            overlap_displayed_options: None,
            tileversion: None,
            crs: None,
            server_type: ServerType::Default,
        }
    }
}

impl ImageTileLayerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with `overrides` merged over them
    pub fn from_json(overrides: &Value) -> Result<Self> {
        let mut options = Self::default();
        options.merge_json(overrides)?;
        Ok(options)
    }

    pub fn with_layers_id(mut self, layers_id: impl Into<String>) -> Self {
        self.layers_id = Some(layers_id.into());
        self
    }

    pub fn with_redirect(mut self, redirect: bool) -> Self {
        self.redirect = redirect;
        self
    }

    pub fn with_transparent(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn with_cache_enabled(mut self, cache_enabled: bool) -> Self {
        self.cache_enabled = cache_enabled;
        self
    }

    pub fn with_prj_coord_sys(mut self, prj_coord_sys: PrjCoordSys) -> Self {
        self.prj_coord_sys = Some(prj_coord_sys);
        self
    }

    pub fn with_clip_region_enabled(mut self, enabled: bool) -> Self {
        self.clip_region_enabled = enabled;
        self
    }

    pub fn with_clip_region(mut self, geometry: impl Into<Geometry<f64>>) -> Self {
        self.clip_region = Some(geometry.into());
        self
    }

    pub fn with_overlap_displayed(mut self, overlap_displayed: bool) -> Self {
        self.overlap_displayed = overlap_displayed;
        self
    }

    pub fn with_overlap_displayed_options(mut self, options: impl Into<String>) -> Self {
        self.overlap_displayed_options = Some(options.into());
        self
    }

    pub fn with_tileversion(mut self, tileversion: impl Into<String>) -> Self {
        self.tileversion = Some(tileversion.into());
        self
    }

    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }

    pub fn with_server_type(mut self, server_type: ServerType) -> Self {
        self.server_type = server_type;
        self
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.tile.attribution = Some(attribution.into());
        self
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile.tile_size = tile_size;
        self
    }

    pub fn with_zoom_range(mut self, min_zoom: u8, max_zoom: u8) -> Self {
        self.tile.min_zoom = min_zoom;
        self.tile.max_zoom = max_zoom;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.tile.opacity = opacity;
        self
    }

    /// Clip geometry in service form, present only when clipping applies
    pub fn server_clip_region(&self) -> Option<ServerGeometry> {
        if !self.clip_region_enabled {
            return None;
        }
        self.clip_region.as_ref().and_then(ServerGeometry::from_path)
    }

    /// Merges a JSON options bag over the current values.
    /// Only a non-object bag is an error; bad field values are skipped.
    pub fn merge_json(&mut self, overrides: &Value) -> Result<()> {
        let fields = overrides.as_object().ok_or_else(|| {
            MapError::InvalidOptions(format!("expected a JSON object, got {}", overrides))
        })?;

        for (name, value) in fields {
            match name.as_str() {
                "layersID" => {
                    if let Some(id) = text(value) {
                        self.layers_id = Some(id);
                    }
                }
                "redirect" => self.redirect = *value == Value::Bool(true),
                "transparent" => self.transparent = *value == Value::Bool(true),
                "cacheEnabled" => self.cache_enabled = *value != Value::Bool(false),
                "prjCoordSys" => {
                    self.prj_coord_sys = PrjCoordSys::from_value(value);
                }
                "clipRegionEnabled" => self.clip_region_enabled = *value == Value::Bool(true),
                "clipRegion" => {
                    self.clip_region = serde_json::from_value::<GeoJsonGeometry>(value.clone())
                        .ok()
                        .map(|geometry| geometry.to_geometry());
                }
                "overlapDisplayed" => self.overlap_displayed = *value != Value::Bool(false),
                "overlapDisplayedOptions" => {
                    self.overlap_displayed_options = match value {
                        Value::Null => None,
                        Value::String(s) => Some(s.clone()),
                        other => Some(other.to_string()),
                    };
                }
                "tileversion" => self.tileversion = text(value),
                "crs" => self.crs = value.as_str().and_then(Crs::from_code),
                "serverType" => {
                    self.server_type = value
                        .as_str()
                        .map(ServerType::from_name)
                        .unwrap_or_default();
                }
                "attribution" => {
                    if let Some(attribution) = value.as_str() {
                        self.tile.attribution = Some(attribution.to_string());
                    }
                }
                "tileSize" => {
                    if let Some(size) = value.as_u64().and_then(|s| u32::try_from(s).ok()) {
                        self.tile.tile_size = size;
                    }
                }
                "minZoom" => {
                    if let Some(zoom) = value.as_u64().and_then(|z| u8::try_from(z).ok()) {
                        self.tile.min_zoom = zoom;
                    }
                }
                "maxZoom" => {
                    if let Some(zoom) = value.as_u64().and_then(|z| u8::try_from(z).ok()) {
                        self.tile.max_zoom = zoom;
                    }
                }
                "opacity" => {
                    if let Some(opacity) = value.as_f64() {
                        self.tile.opacity = opacity as f32;
                    }
                }
                "zIndex" => {
                    if let Some(z_index) = value.as_i64().and_then(|z| i32::try_from(z).ok()) {
                        self.tile.z_index = z_index;
                    }
                }
                _ => {
                    #[cfg(feature = "debug")]
                    log::debug!("Ignoring unknown image tile layer option '{}'", name);
                }
            }
        }

        self.tile = std::mem::take(&mut self.tile).normalized();
        Ok(())
    }

    /// Options as a JSON bag, using the same names [`Self::merge_json`] reads
    pub fn to_json(&self) -> Value {
        let mut fields = JsonMap::new();
        fields.insert("tileSize".into(), json!(self.tile.tile_size));
        fields.insert("minZoom".into(), json!(self.tile.min_zoom));
        fields.insert("maxZoom".into(), json!(self.tile.max_zoom));
        fields.insert("opacity".into(), json!(self.tile.opacity));
        fields.insert("zIndex".into(), json!(self.tile.z_index));
        fields.insert("redirect".into(), json!(self.redirect));
        fields.insert("transparent".into(), json!(self.transparent));
        fields.insert("cacheEnabled".into(), json!(self.cache_enabled));
        fields.insert("clipRegionEnabled".into(), json!(self.clip_region_enabled));
        fields.insert("overlapDisplayed".into(), json!(self.overlap_displayed));
        fields.insert("serverType".into(), json!(self.server_type.name()));
        if let Some(attribution) = &self.tile.attribution {
            fields.insert("attribution".into(), json!(attribution));
        }
        if let Some(layers_id) = &self.layers_id {
            fields.insert("layersID".into(), json!(layers_id));
        }
        if let Some(prj) = &self.prj_coord_sys {
            fields.insert("prjCoordSys".into(), json!(prj));
        }
        if let Some(clip_region) = &self.clip_region {
            fields.insert(
                "clipRegion".into(),
                json!(GeoJsonGeometry::from_geometry(clip_region)),
            );
        }
        if let Some(options) = &self.overlap_displayed_options {
            fields.insert("overlapDisplayedOptions".into(), json!(options));
        }
        if let Some(tileversion) = &self.tileversion {
            fields.insert("tileversion".into(), json!(tileversion));
        }
        if let Some(crs) = self.crs {
            fields.insert("crs".into(), json!(crs.code()));
        }
        Value::Object(fields)
    }
}

/// Strings pass through, numbers are stringified, anything else is absent
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
