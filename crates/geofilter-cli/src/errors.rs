use console::style;
use geofilter_core::GeofilterError;
use std::fmt;
use std::path::Path;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref context) = self.context {
            write!(f, ": {}", context)?;
        }
        Ok(())
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Explain a geometry error from the filter builder
pub fn geometry_rejected(err: GeofilterError) -> CliError {
    match err {
        GeofilterError::UnsupportedGeometryType { geometry_type } => {
            CliError::new("Unsupported geometry type")
                .with_context(format!("Geometry type '{}' cannot be used in a filter.", geometry_type))
                .with_suggestion("Use one of: point, multipoint, polygon, polyline, envelope")
                .with_help("Run: geofilter build --help")
        }
        GeofilterError::GeometryConstruction { reason } => CliError::new("Malformed geometry")
            .with_context(reason)
            .with_suggestion("Provide Esri JSON with x/y, points, rings, paths or xmin/ymin/xmax/ymax")
            .with_help("Run: geofilter build --help"),
        GeofilterError::InvalidGeometry { location, reason } => {
            CliError::new("Invalid geometry")
                .with_context(format!("{}: {}", location, reason))
                .with_suggestion("Fix the geometry coordinates")
                .with_suggestion("Or relax validation: --geometry-validity lenient")
        }
        other => CliError::new(other.to_string()),
    }
}

/// Create error for an unknown relationship name
pub fn unknown_relation(name: &str) -> CliError {
    CliError::new("Unknown spatial relationship")
        .with_context(format!("'{}' is not a spatial relationship.", name))
        .with_suggestion("List supported relationships: geofilter relations")
}

/// Create error for an unparseable spatial reference
pub fn invalid_spatial_reference(value: &str) -> CliError {
    CliError::new("Invalid spatial reference")
        .with_context(format!("Could not read '{}' as a WKID or JSON definition.", value))
        .with_suggestion("Pass a WKID: --sr 4326")
        .with_suggestion(r#"Or a JSON definition: --sr '{"wkid": 102100}'"#)
}

/// Create error for a missing input file
pub fn input_not_found(path: &Path) -> CliError {
    CliError::new("Input file not found")
        .with_context(format!("The specified file does not exist.\n\nPath: {}", path.display()))
        .with_suggestion("Check the file path and try again")
        .with_suggestion("Use \"-\" to read the geometry from stdin")
}
