//! Error types for sqltpl

use thiserror::Error;

/// Result type alias for sqltpl operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Error types for query building.
///
/// Every variant carries the byte offset in the template of the token that
/// failed, so callers can point at the offending placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Malformed placeholder or block syntax
    #[error("Template error at offset {offset}: {message}")]
    Template { offset: usize, message: String },

    /// Argument list does not match the placeholders
    #[error("Argument error at offset {offset}: {message}")]
    Argument { offset: usize, message: String },

    /// A value has the wrong shape for its placeholder
    #[error("Type error at offset {offset}: {message}")]
    Type { offset: usize, message: String },
}

impl BuildError {
    /// Create a template syntax error
    pub fn template(offset: usize, message: impl Into<String>) -> Self {
        Self::Template {
            offset,
            message: message.into(),
        }
    }

    /// Create an argument count error
    pub fn argument(offset: usize, message: impl Into<String>) -> Self {
        Self::Argument {
            offset,
            message: message.into(),
        }
    }

    /// Create a value shape error
    pub fn type_mismatch(offset: usize, message: impl Into<String>) -> Self {
        Self::Type {
            offset,
            message: message.into(),
        }
    }

    /// Byte offset in the template where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            Self::Template { offset, .. }
            | Self::Argument { offset, .. }
            | Self::Type { offset, .. } => *offset,
        }
    }

    /// Check if this is a template syntax error
    pub fn is_template(&self) -> bool {
        matches!(self, Self::Template { .. })
    }

    /// Check if this is an argument count error
    pub fn is_argument(&self) -> bool {
        matches!(self, Self::Argument { .. })
    }

    /// Check if this is a value shape error
    pub fn is_type(&self) -> bool {
        matches!(self, Self::Type { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offset() {
        let err = BuildError::template(7, "unclosed block");
        assert_eq!(err.to_string(), "Template error at offset 7: unclosed block");
        assert_eq!(err.offset(), 7);
    }

    #[test]
    fn predicates_match_variant() {
        assert!(BuildError::argument(0, "x").is_argument());
        assert!(BuildError::type_mismatch(0, "x").is_type());
        assert!(!BuildError::type_mismatch(0, "x").is_template());
    }
}
