use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// geofilter - Build geometry filters for feature-query endpoints
#[derive(Parser, Debug)]
#[command(name = "geofilter")]
#[command(about = "Build and evaluate Esri geometry filters", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, default_value = "geofilter.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a geometry filter from an Esri JSON geometry
    Build(BuildArgs),

    /// Evaluate a geometry filter against candidate geometries
    Eval(EvalArgs),

    /// List supported spatial relationships
    Relations,

    /// Show effective configuration and where each value comes from
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Spatial relationship (e.g. intersects, within, envelope_intersects)
    pub relation: Option<String>,

    /// Geometry file containing Esri JSON ("-" reads stdin)
    #[arg(short, long, default_value = "-")]
    pub geometry: PathBuf,

    /// Spatial reference: a WKID or a JSON definition
    #[arg(long)]
    pub sr: Option<String>,

    /// Print REST form parameters instead of the filter object
    #[arg(long)]
    pub params: bool,

    /// Geometry validity mode (strict or lenient)
    #[arg(long)]
    pub geometry_validity: Option<String>,
}

#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Spatial relationship (e.g. intersects, within, envelope_intersects)
    pub relation: Option<String>,

    /// Filter geometry file containing Esri JSON
    #[arg(short, long)]
    pub geometry: PathBuf,

    /// File containing a JSON array of candidate Esri JSON geometries
    #[arg(short, long)]
    pub candidates: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Override the default relationship for this invocation
    #[arg(long)]
    pub relation: Option<String>,

    /// Override the default spatial reference WKID for this invocation
    #[arg(long)]
    pub default_sr: Option<u32>,
}
