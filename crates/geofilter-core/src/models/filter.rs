//! Geometry filter descriptor passed to feature queries.

use crate::models::{Geometry, GeometryType, SpatialReference, SpatialRelation};
use serde::Serialize;
use std::sync::Arc;

/// "Select features having relationship `spatialRel` with `geometry`,
/// interpreted in `inSR`."
///
/// Built once and never mutated. The geometry type always matches the
/// geometry variant, and `inSR` is left out of the serialized form when no
/// spatial reference was resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDescriptor {
    geometry: Arc<Geometry>,
    geometry_type: GeometryType,
    spatial_rel: SpatialRelation,
    #[serde(rename = "inSR", skip_serializing_if = "Option::is_none")]
    in_sr: Option<SpatialReference>,
}

impl FilterDescriptor {
    pub fn new(
        geometry: Arc<Geometry>,
        spatial_rel: SpatialRelation,
        in_sr: Option<SpatialReference>,
    ) -> Self {
        let geometry_type = geometry.geometry_type();
        Self { geometry, geometry_type, spatial_rel, in_sr }
    }

    pub fn geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    pub fn spatial_rel(&self) -> SpatialRelation {
        self.spatial_rel
    }

    pub fn in_sr(&self) -> Option<&SpatialReference> {
        self.in_sr.as_ref()
    }

    /// Convert to serde_json::Value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
