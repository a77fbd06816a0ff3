//! Canonical Esri JSON geometry types.
//!
//! A [`Geometry`] is one of exactly five shapes. Raw JSON is coerced through
//! [`Geometry::from_json`], which reads an optional, case-insensitive `type`
//! member or otherwise infers the shape from the members present. Serialized
//! geometries are plain Esri JSON without a `type` member.

use crate::error::{GeofilterError, Result};
use crate::models::SpatialReference;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A coordinate tuple: `[x, y]`, `[x, y, z]`, `[x, y, m]` or `[x, y, z, m]`
pub type Position = Vec<f64>;

/// Geometry validation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ValidityMode {
    /// Strict validation - reject any invalid geometries
    Strict,
    /// Lenient validation - tolerate unclosed rings
    #[default]
    Lenient,
}

/// Geometry type tag as used by feature-query endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    #[serde(rename = "esriGeometryPoint")]
    Point,
    #[serde(rename = "esriGeometryMultipoint")]
    Multipoint,
    #[serde(rename = "esriGeometryPolygon")]
    Polygon,
    #[serde(rename = "esriGeometryPolyline")]
    Polyline,
    #[serde(rename = "esriGeometryEnvelope")]
    Envelope,
}

impl GeometryType {
    pub const ALL: [GeometryType; 5] = [
        GeometryType::Point,
        GeometryType::Multipoint,
        GeometryType::Polygon,
        GeometryType::Polyline,
        GeometryType::Envelope,
    ];

    /// Wire tag, e.g. `esriGeometryPolygon`
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "esriGeometryPoint",
            GeometryType::Multipoint => "esriGeometryMultipoint",
            GeometryType::Polygon => "esriGeometryPolygon",
            GeometryType::Polyline => "esriGeometryPolyline",
            GeometryType::Envelope => "esriGeometryEnvelope",
        }
    }

    /// Lowercase type name, e.g. `polygon`
    pub fn type_name(&self) -> &'static str {
        match self {
            GeometryType::Point => "point",
            GeometryType::Multipoint => "multipoint",
            GeometryType::Polygon => "polygon",
            GeometryType::Polyline => "polyline",
            GeometryType::Envelope => "envelope",
        }
    }

    /// Look up a geometry type name, ignoring case.
    ///
    /// Only the five type names are recognized; the error carries the
    /// offending string as given.
    pub fn from_type_name(name: &str) -> Result<Self> {
        let lowered = name.to_lowercase();
        GeometryType::ALL
            .into_iter()
            .find(|t| t.type_name() == lowered)
            .ok_or_else(|| GeofilterError::UnsupportedGeometryType {
                geometry_type: name.to_string(),
            })
    }

    /// Infer the type of an Esri JSON object from its members
    pub fn infer(members: &Map<String, Value>) -> Option<Self> {
        if members.contains_key("x") && members.contains_key("y") {
            Some(GeometryType::Point)
        } else if members.contains_key("points") {
            Some(GeometryType::Multipoint)
        } else if members.contains_key("rings") {
            Some(GeometryType::Polygon)
        } else if members.contains_key("paths") {
            Some(GeometryType::Polyline)
        } else if members.contains_key("xmin") {
            Some(GeometryType::Envelope)
        } else {
            None
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// Read an x/y or envelope bound; `null` and `"NaN"` mark an empty geometry
fn nullable_ordinate<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Ordinate {
        Number(f64),
        Text(String),
    }

    match Option::<Ordinate>::deserialize(deserializer)? {
        None => Ok(f64::NAN),
        Some(Ordinate::Number(value)) => Ok(value),
        Some(Ordinate::Text(text)) if text.eq_ignore_ascii_case("nan") => Ok(f64::NAN),
        Some(Ordinate::Text(text)) => {
            Err(D::Error::custom(format!("expected a number or null, found \"{}\"", text)))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    #[serde(deserialize_with = "nullable_ordinate")]
    pub x: f64,
    #[serde(deserialize_with = "nullable_ordinate")]
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Multipoint {
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_z: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_m: bool,
    pub points: Vec<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
}

/// Polygon made of rings; exterior rings run clockwise, holes counter-clockwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polygon {
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_z: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_m: bool,
    pub rings: Vec<Vec<Position>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polyline {
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_z: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_m: bool,
    pub paths: Vec<Vec<Position>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(deserialize_with = "nullable_ordinate")]
    pub xmin: f64,
    #[serde(deserialize_with = "nullable_ordinate")]
    pub ymin: f64,
    #[serde(deserialize_with = "nullable_ordinate")]
    pub xmax: f64,
    #[serde(deserialize_with = "nullable_ordinate")]
    pub ymax: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zmin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zmax: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mmin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mmax: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spatial_reference: Option<SpatialReference>,
}

/// Esri JSON geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Geometry {
    Point(Point),
    Multipoint(Multipoint),
    Polygon(Polygon),
    Polyline(Polyline),
    Envelope(Envelope),
}

impl Geometry {
    /// Create a Point geometry
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point(Point { x, y, z: None, m: None, spatial_reference: None })
    }

    /// Create a Multipoint geometry
    pub fn multipoint(points: Vec<Position>) -> Self {
        Geometry::Multipoint(Multipoint {
            has_z: false,
            has_m: false,
            points,
            spatial_reference: None,
        })
    }

    /// Create a Polygon geometry
    pub fn polygon(rings: Vec<Vec<Position>>) -> Self {
        Geometry::Polygon(Polygon { has_z: false, has_m: false, rings, spatial_reference: None })
    }

    /// Create a Polyline geometry
    pub fn polyline(paths: Vec<Vec<Position>>) -> Self {
        Geometry::Polyline(Polyline { has_z: false, has_m: false, paths, spatial_reference: None })
    }

    /// Create an Envelope geometry
    pub fn envelope(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Geometry::Envelope(Envelope {
            xmin,
            ymin,
            xmax,
            ymax,
            zmin: None,
            zmax: None,
            mmin: None,
            mmax: None,
            spatial_reference: None,
        })
    }

    /// Attach a spatial reference, replacing any existing one
    pub fn with_spatial_reference(mut self, sr: SpatialReference) -> Self {
        *self.spatial_reference_mut() = Some(sr);
        self
    }

    /// Get the geometry type
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::Multipoint(_) => GeometryType::Multipoint,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::Polyline(_) => GeometryType::Polyline,
            Geometry::Envelope(_) => GeometryType::Envelope,
        }
    }

    /// Spatial reference embedded in the geometry, if any
    pub fn spatial_reference(&self) -> Option<&SpatialReference> {
        match self {
            Geometry::Point(g) => g.spatial_reference.as_ref(),
            Geometry::Multipoint(g) => g.spatial_reference.as_ref(),
            Geometry::Polygon(g) => g.spatial_reference.as_ref(),
            Geometry::Polyline(g) => g.spatial_reference.as_ref(),
            Geometry::Envelope(g) => g.spatial_reference.as_ref(),
        }
    }

    fn spatial_reference_mut(&mut self) -> &mut Option<SpatialReference> {
        match self {
            Geometry::Point(g) => &mut g.spatial_reference,
            Geometry::Multipoint(g) => &mut g.spatial_reference,
            Geometry::Polygon(g) => &mut g.spatial_reference,
            Geometry::Polyline(g) => &mut g.spatial_reference,
            Geometry::Envelope(g) => &mut g.spatial_reference,
        }
    }

    /// True when the geometry has no coordinates to compare against
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(p) => p.x.is_nan() || p.y.is_nan(),
            Geometry::Multipoint(mp) => mp.points.is_empty(),
            Geometry::Polygon(poly) => poly.rings.iter().all(|r| r.is_empty()),
            Geometry::Polyline(line) => line.paths.iter().all(|p| p.is_empty()),
            Geometry::Envelope(env) => env.xmin.is_nan() || env.ymin.is_nan(),
        }
    }

    /// Coerce raw Esri JSON into a geometry.
    ///
    /// A `type` member, when present, must name one of the five supported
    /// shapes (any casing). Without one the shape is inferred from the
    /// coordinate members.
    pub fn from_json(value: &Value) -> Result<Self> {
        let members = value.as_object().ok_or_else(|| {
            GeofilterError::construction(format!(
                "expected a JSON object, found {}",
                json_kind(value)
            ))
        })?;

        let geometry_type = match members.get("type") {
            Some(Value::String(name)) => GeometryType::from_type_name(name)?,
            Some(Value::Null) | None => GeometryType::infer(members).ok_or_else(|| {
                GeofilterError::construction(
                    "cannot infer geometry type; expected x/y, points, rings, paths or xmin members",
                )
            })?,
            Some(other) => {
                return Err(GeofilterError::construction(format!(
                    "geometry type must be a string, found {}",
                    json_kind(other)
                )))
            }
        };

        let geometry = match geometry_type {
            GeometryType::Point => Geometry::Point(decode(value)?),
            GeometryType::Multipoint => Geometry::Multipoint(decode(value)?),
            GeometryType::Polygon => Geometry::Polygon(decode(value)?),
            GeometryType::Polyline => Geometry::Polyline(decode(value)?),
            GeometryType::Envelope => Geometry::Envelope(decode(value)?),
        };
        geometry.check_positions()?;

        Ok(geometry)
    }

    /// Convert to serde_json::Value (Esri JSON)
    pub fn to_esri_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    fn check_positions(&self) -> Result<()> {
        match self {
            Geometry::Point(_) | Geometry::Envelope(_) => Ok(()),
            Geometry::Multipoint(mp) => check_part("points", &mp.points),
            Geometry::Polygon(poly) => poly
                .rings
                .iter()
                .enumerate()
                .try_for_each(|(i, ring)| check_part(&format!("rings[{}]", i), ring)),
            Geometry::Polyline(line) => line
                .paths
                .iter()
                .enumerate()
                .try_for_each(|(i, path)| check_part(&format!("paths[{}]", i), path)),
        }
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Geometry::from_json(&value).map_err(D::Error::custom)
    }
}

fn decode<T: DeserializeOwned>(value: &Value) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(|e| GeofilterError::construction(e.to_string()))
}

fn check_part(location: &str, positions: &[Position]) -> Result<()> {
    match positions.iter().position(|p| p.len() < 2) {
        Some(i) => Err(GeofilterError::construction(format!(
            "{}[{}] has {} ordinate(s), expected at least 2",
            location,
            i,
            positions[i].len()
        ))),
        None => Ok(()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
