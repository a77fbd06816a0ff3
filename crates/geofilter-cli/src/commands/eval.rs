//! Eval command implementation

use super::{parse_relation_arg, read_json};
use crate::cli::EvalArgs;
use crate::errors::geometry_rejected;
use crate::output::OutputWriter;
use anyhow::{bail, Context, Result};
use geofilter_core::config::{CliConfigOverrides, LayeredConfig};
use geofilter_geo::filters::build_filter;
use geofilter_geo::models::Geometry;
use geofilter_geo::spatial::filter_geometries;
use geofilter_geo::validation::ensure_valid;
use serde::Serialize;
use tabled::Tabled;

#[derive(Serialize)]
struct EvalOutput {
    spatial_rel: String,
    total: usize,
    matches: Vec<usize>,
}

#[derive(Serialize, Tabled)]
struct MatchRow {
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Type")]
    geometry_type: String,
}

pub fn execute(args: EvalArgs, mut config: LayeredConfig, output: &OutputWriter) -> Result<()> {
    config.update_from_cli(CliConfigOverrides {
        relation: args.relation.as_deref().map(parse_relation_arg).transpose()?,
        ..Default::default()
    });

    let raw = read_json(&args.geometry)?;
    let geometry = Geometry::from_json(&raw).map_err(geometry_rejected)?;
    ensure_valid(&geometry, config.geometry_validity.value).map_err(geometry_rejected)?;
    let filter = build_filter(geometry, None, config.relation.value).map_err(geometry_rejected)?;

    let candidates = match read_json(&args.candidates)? {
        serde_json::Value::Array(items) => items,
        _ => bail!("{} must contain a JSON array of geometries", args.candidates.display()),
    };
    let geometries = candidates
        .iter()
        .enumerate()
        .map(|(i, value)| {
            Geometry::from_json(value).with_context(|| format!("Candidate {} is not a geometry", i))
        })
        .collect::<Result<Vec<_>>>()?;

    let matches = filter_geometries(&geometries, &filter);
    tracing::debug!(total = geometries.len(), matched = matches.len(), "Evaluated filter");

    if output.is_json() {
        return output.result(EvalOutput {
            spatial_rel: filter.spatial_rel().to_string(),
            total: geometries.len(),
            matches,
        });
    }

    output.info(format!(
        "{} of {} candidates satisfy {}",
        matches.len(),
        geometries.len(),
        filter.spatial_rel()
    ));
    let rows: Vec<MatchRow> = matches
        .iter()
        .map(|&index| MatchRow {
            index,
            geometry_type: geometries[index].geometry_type().to_string(),
        })
        .collect();
    output.table(rows)
}
