//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations
///
/// The conversion core (math normalization, document building) never fails;
/// these only surface at the format and serializer edges.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        FormatError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_name_the_failure() {
        assert_eq!(
            FormatError::FormatNotFound("odt".to_string()).to_string(),
            "Format 'odt' not found"
        );
        assert_eq!(
            FormatError::NotSupported("pdf parsing".to_string()).to_string(),
            "Operation not supported: pdf parsing"
        );
    }

    #[test]
    fn io_errors_become_serialization_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.css");
        let err: FormatError = io.into();
        assert!(matches!(err, FormatError::SerializationError(msg) if msg.contains("missing.css")));
    }
}
