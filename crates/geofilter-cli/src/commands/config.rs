//! Config command implementation

use super::parse_relation_arg;
use crate::cli::ConfigArgs;
use crate::output::OutputWriter;
use anyhow::Result;
use geofilter_core::config::{CliConfigOverrides, LayeredConfig};
use serde::Serialize;
use tabled::Tabled;

#[derive(Serialize, Tabled)]
struct ConfigRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    source: String,
}

pub fn execute(args: ConfigArgs, mut config: LayeredConfig, output: &OutputWriter) -> Result<()> {
    config.update_from_cli(CliConfigOverrides {
        relation: args.relation.as_deref().map(parse_relation_arg).transpose()?,
        geometry_validity: None,
        default_sr: args.default_sr,
    });

    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow { key, value, source: format!("{:?}", source) })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    output.section("Configuration");
    output.table(rows)
}
