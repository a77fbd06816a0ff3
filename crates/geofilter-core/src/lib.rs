//! geofilter core - Esri geometry models, filter descriptors, and configuration
//!
//! This crate contains the domain types shared by the filter builder and the CLI.

pub mod config;
pub mod error;
pub mod models;

pub use error::{GeofilterError, Result};
