use crate::models::{to_geo_geometry, FilterDescriptor, Geometry, SpatialRelation};
use geo::algorithm::bounding_rect::BoundingRect;
use geo::{Geometry as GeoGeometry, Rect, Relate};

/// Evaluate whether a candidate feature geometry satisfies a filter.
///
/// The candidate plays the queried feature and the filter geometry the search
/// shape. No reprojection happens; both must use the same coordinates.
pub fn evaluate_filter(filter: &FilterDescriptor, candidate: &Geometry) -> bool {
    evaluate_relation(filter.spatial_rel(), candidate, filter.geometry())
}

/// Evaluate a single relationship between a feature and a search geometry
pub fn evaluate_relation(relation: SpatialRelation, feature: &Geometry, search: &Geometry) -> bool {
    if feature.is_empty() || search.is_empty() {
        return false;
    }

    let feature_geom = to_geo_geometry(feature);
    let search_geom = to_geo_geometry(search);

    match relation {
        SpatialRelation::EnvelopeIntersects | SpatialRelation::IndexIntersects => {
            evaluate_envelopes(&feature_geom, &search_geom)
        }
        SpatialRelation::Intersects => feature_geom.relate(&search_geom).is_intersects(),
        // Feature wholly contained within the search geometry
        SpatialRelation::Contains => feature_geom.relate(&search_geom).is_within(),
        // Feature wholly contains the search geometry
        SpatialRelation::Within => feature_geom.relate(&search_geom).is_contains(),
        SpatialRelation::Crosses => feature_geom.relate(&search_geom).is_crosses(),
        SpatialRelation::Overlaps => feature_geom.relate(&search_geom).is_overlaps(),
        SpatialRelation::Touches => feature_geom.relate(&search_geom).is_touches(),
    }
}

/// Check if geometry's bounding box intersects the search bounding box
fn evaluate_envelopes(geometry: &GeoGeometry, search: &GeoGeometry) -> bool {
    let geom_bbox = match geometry.bounding_rect() {
        Some(bbox) => bbox,
        None => return false,
    };

    let search_bbox = match search.bounding_rect() {
        Some(bbox) => bbox,
        None => return false,
    };

    bounding_boxes_intersect(&geom_bbox, &search_bbox)
}

/// Check if two bounding boxes intersect
fn bounding_boxes_intersect(bbox1: &Rect, bbox2: &Rect) -> bool {
    // Two rectangles intersect if they overlap in both x and y dimensions
    let x_overlap = bbox1.min().x <= bbox2.max().x && bbox1.max().x >= bbox2.min().x;
    let y_overlap = bbox1.min().y <= bbox2.max().y && bbox1.max().y >= bbox2.min().y;

    x_overlap && y_overlap
}

/// Indices of the geometries that satisfy a filter
pub fn filter_geometries(geometries: &[Geometry], filter: &FilterDescriptor) -> Vec<usize> {
    geometries
        .iter()
        .enumerate()
        .filter_map(|(idx, geom)| if evaluate_filter(filter, geom) { Some(idx) } else { None })
        .collect()
}

/// Count how many geometries satisfy a filter
pub fn count_matches(geometries: &[Geometry], filter: &FilterDescriptor) -> usize {
    geometries.iter().filter(|geom| evaluate_filter(filter, geom)).count()
}
