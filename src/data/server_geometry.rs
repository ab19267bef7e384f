//! Geometry JSON accepted by the imaging service
//!
//! The service describes lines and regions as a flat point list split into
//! parts: `{"id":0,"style":null,"parts":[5],"points":[{"x":..,"y":..}],"type":"REGION","prjCoordSys":null}`.

use crate::{core::crs::PrjCoordSys, Result};
use geo_types::{Geometry, LineString, Polygon};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerGeometryType {
    Line,
    Region,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServerPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerGeometry {
    pub id: i64,
    pub style: Option<serde_json::Value>,
    pub parts: Vec<usize>,
    pub points: Vec<ServerPoint>,
    #[serde(rename = "type")]
    pub geometry_type: ServerGeometryType,
    pub prj_coord_sys: Option<PrjCoordSys>,
    /// `1` for outer rings, `-1` for holes; only sent for regions with holes
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub part_topo: Option<Vec<i32>>,
}

impl ServerGeometry {
    /// Converts a path geometry (lines and polygons). Points and collections are
    /// not paths and yield `None`, as do geometries without any coordinates.
    pub fn from_path(geometry: &Geometry<f64>) -> Option<Self> {
        let converted = match geometry {
            Geometry::Line(line) => {
                Self::from_lines(std::iter::once(LineString::from(vec![line.start, line.end])))
            }
            Geometry::LineString(line) => Self::from_lines(std::iter::once(line.clone())),
            Geometry::MultiLineString(lines) => Self::from_lines(lines.0.iter().cloned()),
            Geometry::Polygon(polygon) => Self::from_polygons(std::iter::once(polygon)),
            Geometry::MultiPolygon(polygons) => Self::from_polygons(polygons.0.iter()),
            Geometry::Rect(rect) => Self::from_polygons(std::iter::once(&rect.to_polygon())),
            Geometry::Triangle(triangle) => {
                Self::from_polygons(std::iter::once(&triangle.to_polygon()))
            }
            Geometry::Point(_) | Geometry::MultiPoint(_) | Geometry::GeometryCollection(_) => {
                return None
            }
        };

        if converted.points.is_empty() {
            None
        } else {
            Some(converted)
        }
    }

    pub fn with_prj_coord_sys(mut self, prj_coord_sys: PrjCoordSys) -> Self {
        self.prj_coord_sys = Some(prj_coord_sys);
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn empty(geometry_type: ServerGeometryType) -> Self {
        Self {
            id: 0,
            style: None,
            parts: Vec::new(),
            points: Vec::new(),
            geometry_type,
            prj_coord_sys: None,
            part_topo: None,
        }
    }

    fn push_part(&mut self, line: &LineString<f64>) {
        if line.0.is_empty() {
            return;
        }
        self.parts.push(line.0.len());
        self.points
            .extend(line.0.iter().map(|c| ServerPoint { x: c.x, y: c.y }));
    }

    fn from_lines(lines: impl Iterator<Item = LineString<f64>>) -> Self {
        let mut geometry = Self::empty(ServerGeometryType::Line);
        for line in lines {
            geometry.push_part(&line);
        }
        geometry
    }

    fn from_polygons<'a>(polygons: impl Iterator<Item = &'a Polygon<f64>>) -> Self {
        let mut geometry = Self::empty(ServerGeometryType::Region);
        let mut topo = Vec::new();
        let mut has_holes = false;

        for polygon in polygons {
            if polygon.exterior().0.is_empty() {
                continue;
            }
            geometry.push_part(polygon.exterior());
            topo.push(1);
            for interior in polygon.interiors() {
                if interior.0.is_empty() {
                    continue;
                }
                geometry.push_part(interior);
                topo.push(-1);
                has_holes = true;
            }
        }

        if has_holes {
            geometry.part_topo = Some(topo);
        }
        geometry
    }
}
