//! Spatial reference identifiers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Coordinate system a geometry is expressed in.
///
/// Kept in whatever form the caller supplied it: a bare well-known ID (`4326`)
/// or a JSON definition object (`{"wkid": 4326, "latestWkid": 4326}`,
/// `{"wkt": "..."}`). Any other JSON value (`4326.0`, `"4326"`) is carried as
/// opaque. It serializes back to exactly that form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpatialReference {
    Wkid(u32),
    Definition(Map<String, Value>),
    Opaque(Value),
}

impl SpatialReference {
    /// Create a spatial reference from a well-known ID
    pub fn wkid(wkid: u32) -> Self {
        SpatialReference::Wkid(wkid)
    }

    /// WGS 84 (EPSG:4326)
    pub fn wgs84() -> Self {
        Self::wkid(4326)
    }

    /// Web Mercator (EPSG:3857)
    pub fn web_mercator() -> Self {
        Self::wkid(3857)
    }

    /// Numeric ID, if one can be read from either form.
    ///
    /// `latestWkid` wins over `wkid` in a definition object.
    pub fn well_known_id(&self) -> Option<u32> {
        match self {
            SpatialReference::Wkid(wkid) => Some(*wkid),
            SpatialReference::Definition(def) => ["latestWkid", "wkid"]
                .iter()
                .filter_map(|key| def.get(*key))
                .find_map(numeric_id),
            SpatialReference::Opaque(value) => numeric_id(value),
        }
    }

    /// Parse a spatial reference from user text: a bare integer or a JSON object
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(wkid) = s.parse::<u32>() {
            return Some(Self::wkid(wkid));
        }
        serde_json::from_str(s).ok()
    }

    /// Render for a REST form parameter: bare number or compact JSON
    pub fn to_param(&self) -> String {
        match self {
            SpatialReference::Wkid(wkid) => wkid.to_string(),
            SpatialReference::Definition(def) => Value::Object(def.clone()).to_string(),
            SpatialReference::Opaque(Value::String(text)) => text.clone(),
            SpatialReference::Opaque(value) => value.to_string(),
        }
    }
}

/// Integral numbers and numeric strings that fit a WKID
fn numeric_id(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(id) => u32::try_from(id).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32),
        },
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

impl From<u32> for SpatialReference {
    fn from(wkid: u32) -> Self {
        Self::wkid(wkid)
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.well_known_id() {
            Some(wkid) => write!(f, "EPSG:{}", wkid),
            None => write!(f, "{}", self.to_param()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_wkid_roundtrip() {
        let sr: SpatialReference = serde_json::from_value(json!(4326)).unwrap();
        assert_eq!(sr, SpatialReference::wgs84());
        assert_eq!(serde_json::to_value(&sr).unwrap(), json!(4326));
    }

    #[test]
    fn test_definition_kept_verbatim() {
        let raw = json!({"wkid": 102100, "latestWkid": 3857});
        let sr: SpatialReference = serde_json::from_value(raw.clone()).unwrap();
        assert!(matches!(sr, SpatialReference::Definition(_)));
        assert_eq!(serde_json::to_value(&sr).unwrap(), raw);
        assert_eq!(sr.well_known_id(), Some(3857));
    }

    #[test]
    fn test_wkt_definition_has_no_id() {
        let sr: SpatialReference =
            serde_json::from_value(json!({"wkt": "GEOGCS[\"GCS_WGS_1984\"]"})).unwrap();
        assert_eq!(sr.well_known_id(), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(SpatialReference::parse("3857"), Some(SpatialReference::web_mercator()));
        assert_eq!(
            SpatialReference::parse(r#"{"wkid": 4326}"#).and_then(|sr| sr.well_known_id()),
            Some(4326)
        );
        assert_eq!(SpatialReference::parse("not-a-reference"), None);
    }

    #[test]
    fn test_to_param() {
        assert_eq!(SpatialReference::wgs84().to_param(), "4326");
        let sr = SpatialReference::parse(r#"{"wkid":4326}"#).unwrap();
        assert_eq!(sr.to_param(), r#"{"wkid":4326}"#);
    }

    #[test]
    fn test_scalar_forms_kept_opaque() {
        let sr: SpatialReference = serde_json::from_value(json!(4326.0)).unwrap();
        assert!(matches!(sr, SpatialReference::Opaque(_)));
        assert_eq!(serde_json::to_value(&sr).unwrap(), json!(4326.0));
        assert_eq!(sr.well_known_id(), Some(4326));

        let sr: SpatialReference = serde_json::from_value(json!("102100")).unwrap();
        assert_eq!(sr.to_param(), "102100");
        assert_eq!(sr.well_known_id(), Some(102100));

        let sr: SpatialReference = serde_json::from_value(json!(12.5)).unwrap();
        assert_eq!(sr.well_known_id(), None);
    }
}
