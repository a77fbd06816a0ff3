//! Geometry models for geofilter-geo.
//!
//! This module re-exports canonical types from `geofilter-core` and provides
//! conversion of Esri geometries into `geo` crate types.

use geo::{
    BoundingRect, Coord, Geometry as GeoGeometry, LineString, MultiLineString,
    MultiPoint, MultiPolygon, Point as GeoPoint, Polygon as GeoPolygon, Rect,
};
use geo::Intersects;

// Re-export canonical types from geofilter-core
pub use geofilter_core::models::{
    Envelope, FilterDescriptor, Geometry, GeometryType, Multipoint, Point, Polygon, Polyline,
    Position, SpatialReference, SpatialRelation, ValidityMode,
};

/// Short positions become NaN coordinates rather than panicking
fn coord(position: &[f64]) -> Coord {
    Coord {
        x: position.first().copied().unwrap_or(f64::NAN),
        y: position.get(1).copied().unwrap_or(f64::NAN),
    }
}

fn line_string(positions: &[Position]) -> LineString {
    LineString::new(positions.iter().map(|p| coord(p)).collect())
}

/// Twice the signed area of a ring; negative for clockwise rings.
///
/// Includes the closing edge, so unclosed rings get the same sign as closed ones.
fn signed_area(ring: &[Position]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let (a, b) = (coord(&ring[i]), coord(&ring[(i + 1) % n]));
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// Split Esri rings into polygons.
///
/// Clockwise rings are exteriors and counter-clockwise rings are holes. Each
/// hole goes to the first exterior touching its first vertex, boundary
/// included. A hole no exterior reaches becomes an exterior of its own. When
/// no ring runs clockwise every ring is treated as an exterior.
fn rings_to_polygons(rings: &[Vec<Position>]) -> Vec<GeoPolygon> {
    let rings: Vec<&Vec<Position>> = rings.iter().filter(|r| !r.is_empty()).collect();
    let has_clockwise = rings.iter().any(|r| signed_area(r) < 0.0);

    let mut exteriors: Vec<(LineString, Vec<LineString>)> = Vec::new();
    let mut holes: Vec<LineString> = Vec::new();
    for ring in rings {
        if !has_clockwise || signed_area(ring) < 0.0 {
            exteriors.push((line_string(ring), Vec::new()));
        } else {
            holes.push(line_string(ring));
        }
    }

    for hole in holes {
        let first = match hole.0.first() {
            Some(c) => GeoPoint::from(*c),
            None => continue,
        };
        let owner = exteriors
            .iter()
            .position(|(exterior, _)| GeoPolygon::new(exterior.clone(), vec![]).intersects(&first));
        match owner {
            Some(idx) => exteriors[idx].1.push(hole),
            None => {
                tracing::debug!("Ring outside every exterior treated as an exterior");
                exteriors.push((hole, Vec::new()));
            }
        }
    }

    exteriors.into_iter().map(|(exterior, interiors)| GeoPolygon::new(exterior, interiors)).collect()
}

fn envelope_rect(env: &Envelope) -> Rect {
    Rect::new(Coord { x: env.xmin, y: env.ymin }, Coord { x: env.xmax, y: env.ymax })
}

/// Convert a canonical Geometry to a geo::Geometry
pub fn to_geo_geometry(geom: &Geometry) -> GeoGeometry {
    match geom {
        Geometry::Point(p) => GeoGeometry::Point(GeoPoint::new(p.x, p.y)),
        Geometry::Multipoint(mp) => GeoGeometry::MultiPoint(MultiPoint::new(
            mp.points.iter().map(|p| GeoPoint::from(coord(p))).collect(),
        )),
        Geometry::Polyline(line) => {
            let mut paths: Vec<LineString> = line.paths.iter().map(|p| line_string(p)).collect();
            if paths.len() == 1 {
                GeoGeometry::LineString(paths.remove(0))
            } else {
                GeoGeometry::MultiLineString(MultiLineString::new(paths))
            }
        }
        Geometry::Polygon(poly) => {
            let mut polygons = rings_to_polygons(&poly.rings);
            if polygons.len() == 1 {
                GeoGeometry::Polygon(polygons.remove(0))
            } else {
                GeoGeometry::MultiPolygon(MultiPolygon::new(polygons))
            }
        }
        Geometry::Envelope(env) => GeoGeometry::Polygon(envelope_rect(env).to_polygon()),
    }
}

/// Extension trait for Geometry with geo-crate operations
pub trait GeometryExt {
    /// Convert to geo::Geometry
    fn to_geo(&self) -> GeoGeometry;

    /// Bounding envelope, carrying the geometry's spatial reference
    fn extent(&self) -> Option<Envelope>;
}

impl GeometryExt for Geometry {
    fn to_geo(&self) -> GeoGeometry {
        to_geo_geometry(self)
    }

    fn extent(&self) -> Option<Envelope> {
        if self.is_empty() {
            return None;
        }
        let rect = self.to_geo().bounding_rect()?;
        Some(Envelope {
            xmin: rect.min().x,
            ymin: rect.min().y,
            xmax: rect.max().x,
            ymax: rect.max().y,
            zmin: None,
            zmax: None,
            mmin: None,
            mmax: None,
            spatial_reference: self.spatial_reference().cloned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> Vec<Position> {
        coords.iter().map(|(x, y)| vec![*x, *y]).collect()
    }

    #[test]
    fn test_point_conversion() {
        let geom = Geometry::point(115.0, -8.5);
        match to_geo_geometry(&geom) {
            GeoGeometry::Point(p) => {
                assert!((p.x() - 115.0).abs() < 1e-10);
                assert!((p.y() + 8.5).abs() < 1e-10);
            }
            other => panic!("Expected Point geometry, got {:?}", other),
        }
    }

    #[test]
    fn test_polygon_with_hole() {
        // Exterior clockwise, hole counter-clockwise
        let exterior = ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]);
        let hole = ring(&[(2.0, 2.0), (4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0)]);
        let geom = Geometry::polygon(vec![exterior, hole]);

        match to_geo_geometry(&geom) {
            GeoGeometry::Polygon(p) => assert_eq!(p.interiors().len(), 1),
            other => panic!("Expected Polygon geometry, got {:?}", other),
        }
    }

    #[test]
    fn test_two_exteriors_make_multipolygon() {
        let a = ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        let b = ring(&[(5.0, 5.0), (5.0, 6.0), (6.0, 6.0), (6.0, 5.0), (5.0, 5.0)]);
        let geom = Geometry::polygon(vec![a, b]);

        match to_geo_geometry(&geom) {
            GeoGeometry::MultiPolygon(mp) => assert_eq!(mp.0.len(), 2),
            other => panic!("Expected MultiPolygon geometry, got {:?}", other),
        }
    }

    #[test]
    fn test_counter_clockwise_only_rings_are_exteriors() {
        let ccw = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        match to_geo_geometry(&Geometry::polygon(vec![ccw])) {
            GeoGeometry::Polygon(p) => assert!(p.interiors().is_empty()),
            other => panic!("Expected Polygon geometry, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_clockwise_ring_away_from_origin() {
        let closed = ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]);
        let unclosed = ring(&[(50.0, -100.0), (50.0, -90.0), (60.0, -90.0), (60.0, -100.0)]);
        assert!(signed_area(&unclosed) < 0.0);

        match to_geo_geometry(&Geometry::polygon(vec![closed, unclosed])) {
            GeoGeometry::MultiPolygon(mp) => {
                assert_eq!(mp.0.len(), 2);
                assert!(mp.0.iter().all(|p| p.interiors().is_empty()));
            }
            other => panic!("Expected MultiPolygon geometry, got {:?}", other),
        }
    }

    #[test]
    fn test_hole_starting_on_exterior_boundary() {
        let exterior = ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]);
        let hole = ring(&[(0.0, 5.0), (5.0, 2.0), (5.0, 8.0), (0.0, 5.0)]);

        match to_geo_geometry(&Geometry::polygon(vec![exterior, hole])) {
            GeoGeometry::Polygon(p) => assert_eq!(p.interiors().len(), 1),
            other => panic!("Expected Polygon geometry, got {:?}", other),
        }
    }

    #[test]
    fn test_orphan_hole_kept_as_exterior() {
        let exterior = ring(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)]);
        let stray = ring(&[(20.0, 20.0), (30.0, 20.0), (30.0, 30.0), (20.0, 30.0), (20.0, 20.0)]);

        match to_geo_geometry(&Geometry::polygon(vec![exterior, stray])) {
            GeoGeometry::MultiPolygon(mp) => assert_eq!(mp.0.len(), 2),
            other => panic!("Expected MultiPolygon geometry, got {:?}", other),
        }
    }

    #[test]
    fn test_polyline_paths() {
        let single = Geometry::polyline(vec![ring(&[(0.0, 0.0), (1.0, 1.0)])]);
        assert!(matches!(to_geo_geometry(&single), GeoGeometry::LineString(_)));

        let double = Geometry::polyline(vec![
            ring(&[(0.0, 0.0), (1.0, 1.0)]),
            ring(&[(2.0, 2.0), (3.0, 3.0)]),
        ]);
        assert!(matches!(to_geo_geometry(&double), GeoGeometry::MultiLineString(_)));
    }

    #[test]
    fn test_extent() {
        let geom = Geometry::multipoint(vec![vec![1.0, 5.0], vec![-3.0, 2.0], vec![4.0, -1.0]])
            .with_spatial_reference(SpatialReference::wgs84());
        let extent = geom.extent().unwrap();
        assert_eq!((extent.xmin, extent.ymin, extent.xmax, extent.ymax), (-3.0, -1.0, 4.0, 5.0));
        assert_eq!(extent.spatial_reference, Some(SpatialReference::wgs84()));

        assert!(Geometry::multipoint(vec![]).extent().is_none());
    }
}
