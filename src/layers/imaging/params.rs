//! Request URL assembly for the imaging service

use super::ImageTileLayerOptions;
use crate::{
    core::{constants::IMAGE_RESOURCE, geo::Point},
    Result,
};
use serde::Serialize;

/// Projected extent of one tile, as the service's `viewBounds` parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewBounds {
    pub left_bottom: Point,
    pub right_top: Point,
}

impl ViewBounds {
    /// Builds the extent from a tile's projected north-west and south-east corners
    pub fn from_corners(north_west: Point, south_east: Point) -> Self {
        Self {
            left_bottom: Point::new(north_west.x, south_east.y),
            right_top: Point::new(south_east.x, north_west.y),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Ordered `name=value` pairs of the static part of the layer URL
pub fn query_params(options: &ImageTileLayerOptions) -> Result<Vec<String>> {
    let tile_size = options.tile.tile_size;
    let mut params = vec![
        format!("width={}", tile_size),
        format!("height={}", tile_size),
        format!("redirect={}", options.redirect),
        format!("transparent={}", options.transparent),
        format!("cacheEnabled={}", options.cache_enabled),
    ];

    if let Some(prj_coord_sys) = &options.prj_coord_sys {
        params.push(format!("prjCoordSys={}", serde_json::to_string(prj_coord_sys)?));
    }

    if let Some(layers_id) = &options.layers_id {
        params.push(format!("layersID={}", layers_id));
    }

    if let Some(clip_region) = options.server_clip_region() {
        params.push("clipRegionEnabled=true".to_string());
        params.push(format!("clipRegion={}", clip_region.to_json()?));
    }

    if options.overlap_displayed {
        params.push("overlapDisplayed=true".to_string());
    } else {
        params.push("overlapDisplayed=false".to_string());
        if let Some(overlap_options) = &options.overlap_displayed_options {
            params.push(format!("overlapDisplayedOptions={}", overlap_options));
        }
    }

    if options.cache_enabled {
        if let Some(tileversion) = &options.tileversion {
            params.push(format!("tileversion={}", tileversion));
        }
    }

    Ok(params)
}

/// `<service_url>/image.png?<params>`, without credentials
pub fn image_url(service_url: &str, options: &ImageTileLayerOptions) -> Result<String> {
    Ok(format!(
        "{}/{}?{}",
        service_url.trim_end_matches('/'),
        IMAGE_RESOURCE,
        query_params(options)?.join("&")
    ))
}
