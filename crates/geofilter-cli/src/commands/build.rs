//! Build command implementation

use super::{parse_relation_arg, read_json};
use crate::cli::BuildArgs;
use crate::errors::{geometry_rejected, invalid_spatial_reference};
use crate::output::OutputWriter;
use anyhow::Result;
use geofilter_core::config::{parse_validity_mode, CliConfigOverrides, LayeredConfig};
use geofilter_geo::filters::build_filter;
use geofilter_geo::models::{Geometry, SpatialReference};
use geofilter_geo::query::to_query_params;
use geofilter_geo::validation::ensure_valid;
use serde::Serialize;
use tabled::Tabled;

#[derive(Serialize, Tabled)]
struct QueryParam {
    #[tabled(rename = "Parameter")]
    name: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn execute(args: BuildArgs, mut config: LayeredConfig, output: &OutputWriter) -> Result<()> {
    config.update_from_cli(CliConfigOverrides {
        relation: args.relation.as_deref().map(parse_relation_arg).transpose()?,
        geometry_validity: args.geometry_validity.as_deref().map(parse_validity_mode).transpose()?,
        default_sr: None,
    });

    let sr = match args.sr.as_deref() {
        Some(text) => {
            Some(SpatialReference::parse(text).ok_or_else(|| invalid_spatial_reference(text))?)
        }
        None => None,
    };

    let raw = read_json(&args.geometry)?;
    let geometry = Geometry::from_json(&raw).map_err(geometry_rejected)?;
    ensure_valid(&geometry, config.geometry_validity.value).map_err(geometry_rejected)?;

    // The configured default only fills in when nothing else names a reference
    let sr = match sr {
        Some(sr) => Some(sr),
        None if geometry.spatial_reference().is_none() => {
            config.default_sr.value.map(SpatialReference::wkid)
        }
        None => None,
    };

    let filter = build_filter(geometry, sr, config.relation.value).map_err(geometry_rejected)?;
    tracing::info!(
        spatial_rel = %filter.spatial_rel(),
        geometry_type = %filter.geometry_type(),
        "Geometry filter ready"
    );

    if args.params {
        let params: Vec<QueryParam> = to_query_params(&filter)?
            .into_iter()
            .map(|(name, value)| QueryParam { name: name.to_string(), value })
            .collect();
        output.table(params)
    } else {
        output.result(&filter)
    }
}
