/// Result type alias for latent operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for latent operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A boolean-typed cast was given something other than a recognized
    /// true/false/empty literal. This is the one cast failure that must be
    /// loud: silently handing a string to code that expected a boolean
    /// would corrupt control flow downstream.
    #[error("invalid boolean literal '{literal}' (expected \"true\", \"false\" or empty)")]
    InvalidBooleanLiteral { literal: String },

    /// Resolving a deferred value failed: the caller-supplied producer
    /// returned an error, or the handle was in a state it cannot recover
    /// from.
    #[error("deferred value resolution failed: {message}")]
    Resolve {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A pending remote-reference call failed when triggered or flushed
    #[error("remote reference call failed: {message}")]
    RemoteReference {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        Error::Resolve {
            message: error.to_string(),
            source: Some(error.into()),
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create an invalid-boolean-literal error
    #[must_use]
    pub fn invalid_boolean_literal(literal: impl Into<String>) -> Self {
        Error::InvalidBooleanLiteral {
            literal: literal.into(),
        }
    }

    /// Create a resolution error without an underlying source
    #[must_use]
    pub fn resolve(message: impl Into<String>) -> Self {
        Error::Resolve {
            message: message.into(),
            source: None,
        }
    }

    /// Create a resolution error wrapping a source error
    #[must_use]
    pub fn resolve_with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Error::Resolve {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a remote-reference error
    #[must_use]
    pub fn remote_reference(message: impl Into<String>) -> Self {
        Error::RemoteReference {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }
}

// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to a Result
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a lazy message
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let base_error = e.into();
            Error::Configuration {
                message: format!("{}: {}", message.into(), base_error),
            }
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let base_error = e.into();
            Error::Configuration {
                message: format!("{}: {}", f(), base_error),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_boolean_literal_display() {
        let err = Error::invalid_boolean_literal("yes");
        assert_eq!(
            err.to_string(),
            "invalid boolean literal 'yes' (expected \"true\", \"false\" or empty)"
        );
    }

    #[test]
    fn test_resolve_error_carries_source() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "remote unreachable");
        let err = Error::resolve_with_source("producer failed", inner);
        assert!(err.to_string().contains("producer failed"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_context_wraps_message() {
        let res: std::result::Result<(), serde_json::Error> =
            serde_json::from_str::<()>("not json").map(|_| ());
        let wrapped = res.context("loading overrides");
        let err = wrapped.unwrap_err();
        assert!(err.to_string().contains("loading overrides"));
    }
}
