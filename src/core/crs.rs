//! Coordinate reference systems used by the map and its layers
//!
//! Mirrors the Leaflet CRS model: a projection from geographic coordinates
//! into a planar system, plus an affine transformation into zoom-scaled
//! pixel space.

use crate::core::{
    constants::TILE_SIZE,
    geo::{LatLng, Point},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};
use std::f64::consts::PI;

/// Web Mercator sphere radius
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Affine transform `(a * x + b, c * y + d)` applied before zoom scaling
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transformation {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Transformation {
    fn transform(&self, point: Point, scale: f64) -> Point {
        Point::new(
            scale * (self.a * point.x + self.b),
            scale * (self.c * point.y + self.d),
        )
    }

    fn untransform(&self, point: Point, scale: f64) -> Point {
        Point::new(
            (point.x / scale - self.b) / self.a,
            (point.y / scale - self.d) / self.c,
        )
    }
}

/// Supported coordinate reference systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Crs {
    /// Spherical (web) mercator
    #[default]
    #[serde(rename = "EPSG:3857")]
    Epsg3857,
    /// Plate carrée on WGS84 longitude/latitude
    #[serde(rename = "EPSG:4326")]
    Epsg4326,
}

impl Crs {
    /// Looks a CRS up by its `EPSG:xxxx` code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "EPSG:3857" | "EPSG:900913" | "EPSG:102100" => Some(Crs::Epsg3857),
            "EPSG:4326" => Some(Crs::Epsg4326),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Crs::Epsg3857 => "EPSG:3857",
            Crs::Epsg4326 => "EPSG:4326",
        }
    }

    pub fn epsg_code(&self) -> i32 {
        match self {
            Crs::Epsg3857 => 3857,
            Crs::Epsg4326 => 4326,
        }
    }

    /// Projects geographic coordinates into the CRS plane
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        match self {
            Crs::Epsg3857 => {
                let d = PI / 180.0;
                let lat = LatLng::clamp_lat(lat_lng.lat);
                let sin = (lat * d).sin();
                Point::new(
                    EARTH_RADIUS * lat_lng.lng * d,
                    EARTH_RADIUS * ((1.0 + sin) / (1.0 - sin)).ln() / 2.0,
                )
            }
            Crs::Epsg4326 => Point::new(lat_lng.lng, lat_lng.lat),
        }
    }

    /// Inverse of [`Crs::project`]
    pub fn unproject(&self, point: &Point) -> LatLng {
        match self {
            Crs::Epsg3857 => {
                let d = 180.0 / PI;
                let lat = (2.0 * (point.y / EARTH_RADIUS).exp().atan() - PI / 2.0) * d;
                LatLng::new(lat, point.x * d / EARTH_RADIUS)
            }
            Crs::Epsg4326 => LatLng::new(point.y, point.x),
        }
    }

    /// Pixel scale of the whole world at a zoom level
    pub fn scale(&self, zoom: f64) -> f64 {
        TILE_SIZE as f64 * 2_f64.powf(zoom)
    }

    /// Projects a geographic coordinate into pixel space at a zoom level
    pub fn lat_lng_to_point(&self, lat_lng: &LatLng, zoom: f64) -> Point {
        self.transformation()
            .transform(self.project(lat_lng), self.scale(zoom))
    }

    /// Converts a pixel coordinate at a zoom level back into geographic space
    pub fn point_to_lat_lng(&self, point: &Point, zoom: f64) -> LatLng {
        self.unproject(&self.transformation().untransform(*point, self.scale(zoom)))
    }

    fn transformation(&self) -> Transformation {
        match self {
            Crs::Epsg3857 => {
                let scale = 0.5 / (PI * EARTH_RADIUS);
                Transformation {
                    a: scale,
                    b: 0.5,
                    c: -scale,
                    d: 0.5,
                }
            }
            Crs::Epsg4326 => Transformation {
                a: 1.0 / 180.0,
                b: 1.0,
                c: -1.0 / 180.0,
                d: 0.5,
            },
        }
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Projection descriptor sent to the imaging service, such as
/// `{"epsgCode":3857}`. Fields other than `epsgCode` are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrjCoordSys(JsonMap<String, Value>);

impl PrjCoordSys {
    pub fn new(epsg_code: i32) -> Self {
        let mut fields = JsonMap::new();
        fields.insert("epsgCode".to_string(), Value::from(epsg_code));
        Self(fields)
    }

    /// Wraps a caller-supplied descriptor; anything but a JSON object is rejected
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().cloned().map(Self)
    }

    pub fn epsg_code(&self) -> Option<i64> {
        self.0.get("epsgCode").and_then(Value::as_i64)
    }

    pub fn as_json(&self) -> &JsonMap<String, Value> {
        &self.0
    }
}

impl From<Crs> for PrjCoordSys {
    fn from(crs: Crs) -> Self {
        Self::new(crs.epsg_code())
    }
}
