use crate::models::{Envelope, Geometry, Position, ValidityMode};
use geofilter_core::error::{GeofilterError, Result};

/// Validation result with details
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

/// Validation error with location details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub location: String,
    pub reason: String,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self { is_valid: true, errors: Vec::new() }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, location: String, reason: String) {
        self.is_valid = false;
        self.errors.push(ValidationError { location, reason });
    }

    fn merge(&mut self, other: ValidationResult) {
        for error in other.errors {
            self.add_error(error.location, error.reason);
        }
    }
}

/// Validate a geometry. Empty geometries are valid.
pub fn validate_geometry(geometry: &Geometry, mode: ValidityMode) -> ValidationResult {
    if geometry.is_empty() {
        return ValidationResult::valid();
    }

    match geometry {
        Geometry::Point(p) => validate_positions("Point", &[vec![p.x, p.y]]),
        Geometry::Multipoint(mp) => validate_positions("Multipoint", &mp.points),
        Geometry::Polyline(line) => validate_polyline(&line.paths),
        Geometry::Polygon(poly) => validate_polygon(&poly.rings, mode),
        Geometry::Envelope(env) => validate_envelope(env),
    }
}

fn validate_positions(location: &str, positions: &[Position]) -> ValidationResult {
    let mut result = ValidationResult::valid();
    for (i, position) in positions.iter().enumerate() {
        if position.len() < 2 {
            result.add_error(
                format!("{}[{}]", location, i),
                format!("Position must have at least 2 ordinates, found {}", position.len()),
            );
        } else if !position[0].is_finite() || !position[1].is_finite() {
            result.add_error(format!("{}[{}]", location, i), "Coordinates must be finite".to_string());
        }
    }
    result
}

fn validate_polyline(paths: &[Vec<Position>]) -> ValidationResult {
    let mut result = ValidationResult::valid();

    for (i, path) in paths.iter().enumerate() {
        let location = format!("Polyline path[{}]", i);
        // A path must have at least 2 positions
        if path.len() < 2 {
            result.add_error(
                location.clone(),
                format!("Path must have at least 2 positions, found {}", path.len()),
            );
        }
        result.merge(validate_positions(&location, path));
    }

    result
}

fn validate_polygon(rings: &[Vec<Position>], mode: ValidityMode) -> ValidationResult {
    let mut result = ValidationResult::valid();

    for (i, ring) in rings.iter().enumerate() {
        let location = format!("Polygon ring[{}]", i);
        if ring.len() < 4 {
            result.add_error(
                location.clone(),
                format!("Ring must have at least 4 positions, found {}", ring.len()),
            );
        }

        // Servers close rings themselves, so only strict mode insists
        if mode == ValidityMode::Strict {
            if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
                if first != last {
                    result.add_error(
                        location.clone(),
                        "Ring must be closed (first position == last position)".to_string(),
                    );
                }
            }
        }

        result.merge(validate_positions(&location, ring));
    }

    result
}

fn validate_envelope(env: &Envelope) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if ![env.xmin, env.ymin, env.xmax, env.ymax].iter().all(|v| v.is_finite()) {
        result.add_error("Envelope".to_string(), "Bounds must be finite".to_string());
        return result;
    }
    if env.xmin > env.xmax {
        result.add_error(
            "Envelope".to_string(),
            format!("xmin ({}) is greater than xmax ({})", env.xmin, env.xmax),
        );
    }
    if env.ymin > env.ymax {
        result.add_error(
            "Envelope".to_string(),
            format!("ymin ({}) is greater than ymax ({})", env.ymin, env.ymax),
        );
    }

    result
}

/// Validate a geometry, turning the first problem into an error
pub fn ensure_valid(geometry: &Geometry, mode: ValidityMode) -> Result<()> {
    let validation = validate_geometry(geometry, mode);
    match validation.errors.into_iter().next() {
        Some(error) => Err(GeofilterError::InvalidGeometry {
            location: error.location,
            reason: error.reason,
        }),
        None => Ok(()),
    }
}

/// Count invalid geometries in a collection
pub fn count_invalid_geometries(geometries: &[Geometry], mode: ValidityMode) -> usize {
    geometries.iter().filter(|g| !validate_geometry(g, mode).is_valid).count()
}
