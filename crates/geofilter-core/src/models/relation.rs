//! Spatial relationships understood by feature-query endpoints.

use crate::error::{GeofilterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Topological predicate a feature must satisfy against the filter geometry.
///
/// Serializes to the fixed `esriSpatialRel*` wire vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SpatialRelation {
    /// Feature intersects the filter geometry
    #[default]
    #[serde(rename = "esriSpatialRelIntersects")]
    Intersects,
    /// Feature is wholly contained within the filter geometry
    #[serde(rename = "esriSpatialRelContains")]
    Contains,
    /// Interiors intersect in a lower dimension than the larger of the two shapes
    #[serde(rename = "esriSpatialRelCrosses")]
    Crosses,
    /// Envelopes of the two shapes intersect
    #[serde(rename = "esriSpatialRelEnvelopeIntersects")]
    EnvelopeIntersects,
    /// Envelope of the filter geometry intersects the index entry of the feature
    #[serde(rename = "esriSpatialRelIndexIntersects")]
    IndexIntersects,
    /// Intersection has the same dimension as both shapes but differs from each
    #[serde(rename = "esriSpatialRelOverlaps")]
    Overlaps,
    /// Shapes share boundary but no interior
    #[serde(rename = "esriSpatialRelTouches")]
    Touches,
    /// Feature wholly contains the filter geometry
    #[serde(rename = "esriSpatialRelWithin")]
    Within,
}

impl SpatialRelation {
    pub const ALL: [SpatialRelation; 8] = [
        SpatialRelation::Intersects,
        SpatialRelation::Contains,
        SpatialRelation::Crosses,
        SpatialRelation::EnvelopeIntersects,
        SpatialRelation::IndexIntersects,
        SpatialRelation::Overlaps,
        SpatialRelation::Touches,
        SpatialRelation::Within,
    ];

    /// Wire tag, e.g. `esriSpatialRelIntersects`
    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialRelation::Intersects => "esriSpatialRelIntersects",
            SpatialRelation::Contains => "esriSpatialRelContains",
            SpatialRelation::Crosses => "esriSpatialRelCrosses",
            SpatialRelation::EnvelopeIntersects => "esriSpatialRelEnvelopeIntersects",
            SpatialRelation::IndexIntersects => "esriSpatialRelIndexIntersects",
            SpatialRelation::Overlaps => "esriSpatialRelOverlaps",
            SpatialRelation::Touches => "esriSpatialRelTouches",
            SpatialRelation::Within => "esriSpatialRelWithin",
        }
    }

    /// Operation name, e.g. `envelope_intersects`
    pub fn name(&self) -> &'static str {
        match self {
            SpatialRelation::Intersects => "intersects",
            SpatialRelation::Contains => "contains",
            SpatialRelation::Crosses => "crosses",
            SpatialRelation::EnvelopeIntersects => "envelope_intersects",
            SpatialRelation::IndexIntersects => "index_intersects",
            SpatialRelation::Overlaps => "overlaps",
            SpatialRelation::Touches => "touches",
            SpatialRelation::Within => "within",
        }
    }
}

impl FromStr for SpatialRelation {
    type Err = GeofilterError;

    /// Accepts the operation name (`envelope_intersects`, `envelope-intersects`)
    /// or the wire tag, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        SpatialRelation::ALL
            .into_iter()
            .find(|rel| rel.name() == normalized || rel.as_str().to_lowercase() == normalized)
            .ok_or_else(|| GeofilterError::UnknownRelation { name: s.to_string() })
    }
}

impl fmt::Display for SpatialRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
