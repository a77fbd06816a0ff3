//! Relations command implementation

use crate::output::OutputWriter;
use anyhow::Result;
use geofilter_core::models::SpatialRelation;
use serde::Serialize;
use tabled::Tabled;

#[derive(Serialize, Tabled)]
struct RelationRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Wire tag")]
    tag: &'static str,
}

pub fn execute(output: &OutputWriter) -> Result<()> {
    let rows: Vec<RelationRow> = SpatialRelation::ALL
        .iter()
        .map(|rel| RelationRow { name: rel.name(), tag: rel.as_str() })
        .collect();

    output.section("Spatial Relationships");
    output.table(rows)
}
