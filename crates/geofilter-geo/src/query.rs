//! REST form encoding of geometry filters.

use crate::models::FilterDescriptor;
use geofilter_core::Result;

/// Flatten a filter into feature-query form parameters.
///
/// Order is `geometry`, `geometryType`, `spatialRel`, then `inSR` when the
/// filter resolved a spatial reference.
pub fn to_query_params(filter: &FilterDescriptor) -> Result<Vec<(&'static str, String)>> {
    let mut params = vec![
        ("geometry", serde_json::to_string(filter.geometry().as_ref())?),
        ("geometryType", filter.geometry_type().as_str().to_string()),
        ("spatialRel", filter.spatial_rel().as_str().to_string()),
    ];

    if let Some(sr) = filter.in_sr() {
        params.push(("inSR", sr.to_param()));
    }

    Ok(params)
}
