//! Geometry filters for feature queries.
//!
//! Each function pairs a geometry with one spatial relationship and an
//! optional spatial reference, producing the descriptor a feature query takes
//! as its geometry filter:
//!
//! ```
//! use geofilter_geo::filters::intersects;
//! use geofilter_geo::models::SpatialReference;
//! use serde_json::json;
//!
//! let square = json!({"type": "polygon", "rings": [[[0, 0], [0, 1], [1, 1], [0, 0]]]});
//! let filter = intersects(square, Some(SpatialReference::wgs84())).unwrap();
//! assert_eq!(filter.to_json()["spatialRel"], "esriSpatialRelIntersects");
//! assert_eq!(filter.to_json()["inSR"], 4326);
//! ```

use crate::models::{FilterDescriptor, Geometry, SpatialReference, SpatialRelation};
use geofilter_core::Result;
use serde_json::Value;
use std::sync::Arc;

/// Geometry accepted by the filter functions: raw Esri JSON or an already
/// normalized geometry.
#[derive(Debug, Clone)]
pub enum GeometryInput {
    Raw(Value),
    Geometry(Arc<Geometry>),
}

impl GeometryInput {
    /// Normalize into a shared geometry, coercing raw JSON
    pub fn into_geometry(self) -> Result<Arc<Geometry>> {
        match self {
            GeometryInput::Raw(value) => Ok(Arc::new(Geometry::from_json(&value)?)),
            GeometryInput::Geometry(geometry) => Ok(geometry),
        }
    }
}

impl From<Value> for GeometryInput {
    fn from(value: Value) -> Self {
        GeometryInput::Raw(value)
    }
}

impl From<Geometry> for GeometryInput {
    fn from(geometry: Geometry) -> Self {
        GeometryInput::Geometry(Arc::new(geometry))
    }
}

impl From<Arc<Geometry>> for GeometryInput {
    fn from(geometry: Arc<Geometry>) -> Self {
        GeometryInput::Geometry(geometry)
    }
}

/// Build a filter for any relationship.
///
/// An explicit `sr` wins over a spatial reference embedded in the geometry;
/// with neither, the descriptor carries no `inSR`.
pub fn build_filter(
    geometry: impl Into<GeometryInput>,
    sr: Option<SpatialReference>,
    relation: SpatialRelation,
) -> Result<FilterDescriptor> {
    let geometry = geometry.into().into_geometry()?;
    let in_sr = sr.or_else(|| geometry.spatial_reference().cloned());

    tracing::debug!(
        geometry_type = %geometry.geometry_type(),
        spatial_rel = %relation,
        in_sr = ?in_sr,
        "Built geometry filter"
    );

    Ok(FilterDescriptor::new(geometry, relation, in_sr))
}

/// Features whose geometry intersects the filter geometry
pub fn intersects(
    geometry: impl Into<GeometryInput>,
    sr: Option<SpatialReference>,
) -> Result<FilterDescriptor> {
    build_filter(geometry, sr, SpatialRelation::Intersects)
}

/// Features wholly contained within the filter geometry
pub fn contains(
    geometry: impl Into<GeometryInput>,
    sr: Option<SpatialReference>,
) -> Result<FilterDescriptor> {
    build_filter(geometry, sr, SpatialRelation::Contains)
}

/// Features whose interior intersection with the filter geometry is non-empty
/// and of lower dimension than the larger shape.
///
/// Two lines sharing only an endpoint do not cross.
pub fn crosses(
    geometry: impl Into<GeometryInput>,
    sr: Option<SpatialReference>,
) -> Result<FilterDescriptor> {
    build_filter(geometry, sr, SpatialRelation::Crosses)
}

/// Features whose envelope intersects the envelope of the filter geometry
pub fn envelope_intersects(
    geometry: impl Into<GeometryInput>,
    sr: Option<SpatialReference>,
) -> Result<FilterDescriptor> {
    build_filter(geometry, sr, SpatialRelation::EnvelopeIntersects)
}

/// Features whose index entry intersects the envelope of the filter geometry
pub fn index_intersects(
    geometry: impl Into<GeometryInput>,
    sr: Option<SpatialReference>,
) -> Result<FilterDescriptor> {
    build_filter(geometry, sr, SpatialRelation::IndexIntersects)
}

/// Features overlapping the filter geometry in the same dimension
pub fn overlaps(
    geometry: impl Into<GeometryInput>,
    sr: Option<SpatialReference>,
) -> Result<FilterDescriptor> {
    build_filter(geometry, sr, SpatialRelation::Overlaps)
}

/// Features sharing a boundary with the filter geometry but no interior
pub fn touches(
    geometry: impl Into<GeometryInput>,
    sr: Option<SpatialReference>,
) -> Result<FilterDescriptor> {
    build_filter(geometry, sr, SpatialRelation::Touches)
}

/// Features that wholly contain the filter geometry
pub fn within(
    geometry: impl Into<GeometryInput>,
    sr: Option<SpatialReference>,
) -> Result<FilterDescriptor> {
    build_filter(geometry, sr, SpatialRelation::Within)
}
