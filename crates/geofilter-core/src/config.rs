use crate::error::{GeofilterError, Result};
use crate::models::{SpatialRelation, ValidityMode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for geofilter
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Relationship used when a command does not name one
    pub relation: ConfigValue<SpatialRelation>,
    pub geometry_validity: ConfigValue<ValidityMode>,
    /// WKID applied when neither the caller nor the geometry gives a spatial reference
    pub default_sr: ConfigValue<Option<u32>>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            relation: ConfigValue::new(SpatialRelation::Intersects, ConfigSource::Default),
            geometry_validity: ConfigValue::new(ValidityMode::Lenient, ConfigSource::Default),
            default_sr: ConfigValue::new(None, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeofilterError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(relation) = file_config.relation {
            self.relation.update(parse_relation(&relation)?, ConfigSource::File);
        }

        if let Some(geometry_validity) = file_config.geometry_validity {
            self.geometry_validity.update(geometry_validity, ConfigSource::File);
        }

        if let Some(default_sr) = file_config.default_sr {
            self.default_sr.update(Some(default_sr), ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // GEOFILTER_RELATION
        if let Ok(relation_str) = env::var("GEOFILTER_RELATION") {
            match parse_relation(&relation_str) {
                Ok(relation) => self.relation.update(relation, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOFILTER_RELATION value '{}': expected a spatial relationship such as intersects or within",
                    relation_str
                ),
            }
        }

        // GEOFILTER_GEOMETRY_VALIDITY
        if let Ok(validity_str) = env::var("GEOFILTER_GEOMETRY_VALIDITY") {
            match parse_validity_mode(&validity_str) {
                Ok(validity) => self.geometry_validity.update(validity, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOFILTER_GEOMETRY_VALIDITY value '{}': expected strict or lenient",
                    validity_str
                ),
            }
        }

        // GEOFILTER_DEFAULT_SR
        if let Ok(sr_str) = env::var("GEOFILTER_DEFAULT_SR") {
            match sr_str.trim().parse::<u32>() {
                Ok(wkid) => self.default_sr.update(Some(wkid), ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid GEOFILTER_DEFAULT_SR value '{}': expected integer WKID",
                    sr_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(relation) = overrides.relation {
            self.relation.update(relation, ConfigSource::Cli);
        }

        if let Some(geometry_validity) = overrides.geometry_validity {
            self.geometry_validity.update(geometry_validity, ConfigSource::Cli);
        }

        if let Some(default_sr) = overrides.default_sr {
            self.default_sr.update(Some(default_sr), ConfigSource::Cli);
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "relation".to_string(),
            (self.relation.value.name().to_string(), self.relation.source),
        );

        map.insert(
            "geometry_validity".to_string(),
            (format!("{:?}", self.geometry_validity.value), self.geometry_validity.source),
        );

        let default_sr = match self.default_sr.value {
            Some(wkid) => format!("EPSG:{}", wkid),
            None => "(none)".to_string(),
        };
        map.insert("default_sr".to_string(), (default_sr, self.default_sr.source));

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    relation: Option<String>,
    geometry_validity: Option<ValidityMode>,
    default_sr: Option<u32>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub relation: Option<SpatialRelation>,
    pub geometry_validity: Option<ValidityMode>,
    pub default_sr: Option<u32>,
}

/// Parse a spatial relationship from a config string
pub fn parse_relation(s: &str) -> Result<SpatialRelation> {
    s.parse::<SpatialRelation>().map_err(|_| GeofilterError::ConfigInvalid {
        key: "relation".to_string(),
        reason: format!(
            "Invalid spatial relationship: {}. Use intersects, contains, crosses, envelope_intersects, index_intersects, overlaps, touches, or within",
            s
        ),
    })
}

/// Parse validity mode from string
pub fn parse_validity_mode(s: &str) -> Result<ValidityMode> {
    match s.to_lowercase().as_str() {
        "strict" => Ok(ValidityMode::Strict),
        "lenient" => Ok(ValidityMode::Lenient),
        _ => Err(GeofilterError::ConfigInvalid {
            key: "geometry_validity".to_string(),
            reason: format!("Invalid validity mode: {}. Use strict or lenient", s),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.relation.value, SpatialRelation::Intersects);
        assert_eq!(config.relation.source, ConfigSource::Default);
        assert_eq!(config.geometry_validity.value, ValidityMode::Lenient);
        assert_eq!(config.default_sr.value, None);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
relation = "within"
geometry_validity = "Strict"
default_sr = 3857
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.relation.value, SpatialRelation::Within);
        assert_eq!(config.relation.source, ConfigSource::File);
        assert_eq!(config.geometry_validity.value, ValidityMode::Strict);
        assert_eq!(config.default_sr.value, Some(3857));
    }

    #[test]
    fn test_load_from_file_rejects_bad_relation() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"relation = "disjoint""#).unwrap();

        let err = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap_err();
        assert!(matches!(err, GeofilterError::ConfigInvalid { key, .. } if key == "relation"));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        let overrides = CliConfigOverrides {
            relation: Some(SpatialRelation::Touches),
            geometry_validity: None,
            default_sr: Some(102100),
        };

        config.update_from_cli(overrides);

        assert_eq!(config.relation.value, SpatialRelation::Touches);
        assert_eq!(config.relation.source, ConfigSource::Cli);
        assert_eq!(config.default_sr.value, Some(102100));
        assert_eq!(config.geometry_validity.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_validity_mode() {
        assert_eq!(parse_validity_mode("strict").unwrap(), ValidityMode::Strict);
        assert_eq!(parse_validity_mode("LENIENT").unwrap(), ValidityMode::Lenient);
        assert!(parse_validity_mode("invalid").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        let (relation, source) = &map["relation"];
        assert_eq!(relation, "intersects");
        assert_eq!(*source, ConfigSource::Default);

        let (default_sr, _) = &map["default_sr"];
        assert_eq!(default_sr, "(none)");
        assert!(map.contains_key("geometry_validity"));
    }
}
