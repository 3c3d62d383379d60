use serde::Deserialize;

/// Configuration for query building.
///
/// Deserializable so it can live in an application's config file; missing
/// fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Treat arguments left over after rendering as an error.
    ///
    /// Default is `false`: surplus arguments are ignored.
    pub strict_arguments: bool,
    /// Truncate SQL in log events (in bytes). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            strict_arguments: false,
            max_sql_length: Some(200),
        }
    }
}

impl BuildConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject argument lists longer than the template needs.
    pub fn with_strict_arguments(mut self) -> Self {
        self.strict_arguments = true;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in log events.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }
}
