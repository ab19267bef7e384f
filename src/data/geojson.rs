use geo_types::{Coord, Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};

/// GeoJSON geometry objects, as they appear in JSON option bags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

impl GeoJsonGeometry {
    /// Converts into the equivalent `geo-types` geometry
    pub fn to_geometry(&self) -> Geometry<f64> {
        match self {
            GeoJsonGeometry::Point { coordinates } => {
                Geometry::Point(coord(coordinates).into())
            }
            GeoJsonGeometry::LineString { coordinates } => {
                Geometry::LineString(line_string(coordinates))
            }
            GeoJsonGeometry::Polygon { coordinates } => Geometry::Polygon(polygon(coordinates)),
            GeoJsonGeometry::MultiPoint { coordinates } => Geometry::MultiPoint(MultiPoint(
                coordinates.iter().map(|c| coord(c).into()).collect(),
            )),
            GeoJsonGeometry::MultiLineString { coordinates } => Geometry::MultiLineString(
                MultiLineString(coordinates.iter().map(|l| line_string(l)).collect()),
            ),
            GeoJsonGeometry::MultiPolygon { coordinates } => Geometry::MultiPolygon(
                MultiPolygon(coordinates.iter().map(|p| polygon(p)).collect()),
            ),
            GeoJsonGeometry::GeometryCollection { geometries } => Geometry::GeometryCollection(
                geometries.iter().map(GeoJsonGeometry::to_geometry).collect(),
            ),
        }
    }

    /// Converts a `geo-types` geometry. Lines, rectangles and triangles have no
    /// GeoJSON type of their own and become line strings or polygons.
    pub fn from_geometry(geometry: &Geometry<f64>) -> Self {
        match geometry {
            Geometry::Point(point) => GeoJsonGeometry::Point {
                coordinates: position(&point.0),
            },
            Geometry::Line(line) => GeoJsonGeometry::LineString {
                coordinates: vec![position(&line.start), position(&line.end)],
            },
            Geometry::LineString(line) => GeoJsonGeometry::LineString {
                coordinates: positions(line),
            },
            Geometry::Polygon(polygon) => GeoJsonGeometry::Polygon {
                coordinates: rings(polygon),
            },
            Geometry::MultiPoint(points) => GeoJsonGeometry::MultiPoint {
                coordinates: points.iter().map(|p| position(&p.0)).collect(),
            },
            Geometry::MultiLineString(lines) => GeoJsonGeometry::MultiLineString {
                coordinates: lines.iter().map(positions).collect(),
            },
            Geometry::MultiPolygon(polygons) => GeoJsonGeometry::MultiPolygon {
                coordinates: polygons.iter().map(rings).collect(),
            },
            Geometry::GeometryCollection(collection) => GeoJsonGeometry::GeometryCollection {
                geometries: collection.iter().map(GeoJsonGeometry::from_geometry).collect(),
            },
            Geometry::Rect(rect) => GeoJsonGeometry::Polygon {
                coordinates: rings(&rect.to_polygon()),
            },
            Geometry::Triangle(triangle) => GeoJsonGeometry::Polygon {
                coordinates: rings(&triangle.to_polygon()),
            },
        }
    }
}

fn coord(position: &[f64; 2]) -> Coord<f64> {
    Coord {
        x: position[0],
        y: position[1],
    }
}

fn position(coord: &Coord<f64>) -> [f64; 2] {
    [coord.x, coord.y]
}

fn positions(line: &LineString<f64>) -> Vec<[f64; 2]> {
    line.0.iter().map(position).collect()
}

fn rings(polygon: &Polygon<f64>) -> Vec<Vec<[f64; 2]>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(positions)
        .collect()
}

fn line_string(positions: &[[f64; 2]]) -> LineString<f64> {
    LineString(positions.iter().map(coord).collect())
}

fn polygon(rings: &[Vec<[f64; 2]>]) -> Polygon<f64> {
    let mut rings = rings.iter().map(|ring| line_string(ring));
    let exterior = rings.next().unwrap_or_else(|| LineString(Vec::new()));
    Polygon::new(exterior, rings.collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geojson_parsing() {
        let json = r#"{"type":"Polygon","coordinates":[[[0,0],[10,0],[10,10],[0,0]]]}"#;
        let parsed: GeoJsonGeometry = serde_json::from_str(json).unwrap();

        match parsed.to_geometry() {
            Geometry::Polygon(polygon) => {
                assert_eq!(polygon.exterior().0.len(), 4);
                assert!(polygon.interiors().is_empty());
            }
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_point_geometry() {
        let parsed: GeoJsonGeometry =
            serde_json::from_str(r#"{"type":"Point","coordinates":[116.4,39.9]}"#).unwrap();
        assert!(matches!(parsed.to_geometry(), Geometry::Point(p) if p.x() == 116.4));
    }

    #[test]
    fn test_from_geometry_back_to_json() {
        let rect = geo_types::Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 1.0 });
        let geojson = GeoJsonGeometry::from_geometry(&Geometry::Rect(rect));
        match &geojson {
            GeoJsonGeometry::Polygon { coordinates } => {
                assert_eq!(coordinates.len(), 1);
                assert_eq!(coordinates[0].first(), coordinates[0].last());
                assert!(coordinates[0].contains(&[2.0, 1.0]));
            }
            other => panic!("unexpected geojson {:?}", other),
        }

        let json = serde_json::to_value(&geojson).unwrap();
        assert_eq!(json["type"], "Polygon");
    }

    #[test]
    fn test_empty_polygon_has_empty_exterior() {
        let parsed = GeoJsonGeometry::Polygon {
            coordinates: Vec::new(),
        };
        match parsed.to_geometry() {
            Geometry::Polygon(polygon) => assert!(polygon.exterior().0.is_empty()),
            other => panic!("unexpected geometry {:?}", other),
        }
    }
}
