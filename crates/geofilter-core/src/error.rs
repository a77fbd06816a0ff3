//! Error types for geofilter

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeofilterError {
    // Geometry errors
    #[error("Unsupported geometry type: {geometry_type}")]
    UnsupportedGeometryType { geometry_type: String },

    #[error("Cannot construct geometry: {reason}")]
    GeometryConstruction { reason: String },

    #[error("Invalid geometry at {location}: {reason}")]
    InvalidGeometry { location: String, reason: String },

    // Relationship errors
    #[error("Unknown spatial relationship: {name}")]
    UnknownRelation { name: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GeofilterError {
    pub(crate) fn construction(reason: impl Into<String>) -> Self {
        GeofilterError::GeometryConstruction { reason: reason.into() }
    }
}

impl From<serde_json::Error> for GeofilterError {
    fn from(err: serde_json::Error) -> Self {
        GeofilterError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeofilterError>;
