//! Command implementations

mod build;
mod config;
mod eval;
mod relations;

use crate::cli::{Cli, Commands};
use crate::errors::{input_not_found, unknown_relation};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use geofilter_core::config::LayeredConfig;
use geofilter_core::models::SpatialRelation;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Execute a CLI command
pub fn execute(cli: Cli, output: &OutputWriter) -> Result<()> {
    let layered = load_config(&cli.config)?;

    match cli.command {
        Commands::Build(args) => build::execute(args, layered, output),
        Commands::Eval(args) => eval::execute(args, layered, output),
        Commands::Relations => relations::execute(output),
        Commands::Config(args) => config::execute(args, layered, output),
    }
}

/// Defaults, then the config file when present, then environment
fn load_config(path: &Path) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if path.exists() {
        config = config
            .load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");
    }

    Ok(config.load_from_env())
}

pub(crate) fn parse_relation_arg(name: &str) -> Result<SpatialRelation> {
    name.parse::<SpatialRelation>().map_err(|_| unknown_relation(name).into())
}

/// Read a JSON document from a file, or from stdin for "-"
pub(crate) fn read_json(path: &Path) -> Result<Value> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
        buf
    } else {
        if !path.exists() {
            return Err(input_not_found(path).into());
        }
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&content)
        .with_context(|| format!("{} does not contain valid JSON", path.display()))
}
