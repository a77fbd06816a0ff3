//! geofilter geo - Spatial filter construction and evaluation
//!
//! This crate builds geometry filter descriptors for feature queries, validates
//! geometries, and evaluates filters locally through the `geo` crate.

pub mod filters;
pub mod models;
pub mod query;
pub mod spatial;
pub mod validation;

pub use filters::{
    build_filter, contains, crosses, envelope_intersects, index_intersects, intersects, overlaps,
    touches, within, GeometryInput,
};
