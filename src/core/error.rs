//! Error types for AuraFlow plugins.

use thiserror::Error;

/// Result type alias for plugin and preset operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while managing plugins.
///
/// Every variant is recoverable: callers report the reason and leave the
/// current activation state as it was.
#[derive(Error, Debug)]
pub enum Error {
    // Activation graph errors
    #[error("Plugin not found: {0}")]
    PluginNotFound(String),

    #[error("Missing dependencies: {}", .0.join(", "))]
    DependencyMissing(Vec<String>),

    #[error("Active dependents: {}", .0.join(", "))]
    DependentsActive(Vec<String>),

    // Lifecycle hook errors
    #[error("Activation hook failed for {id}: {reason}")]
    ActivationHookFailed { id: String, reason: String },

    #[error("Deactivation hook failed for {id}: {reason}")]
    DeactivationHookFailed { id: String, reason: String },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::DependencyMissing(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Missing dependencies: a, b");

        let err = Error::DependentsActive(vec!["loyalty-program".to_string()]);
        assert_eq!(err.to_string(), "Active dependents: loyalty-program");

        let err = Error::ActivationHookFailed {
            id: "barcode-scanner".to_string(),
            reason: "no device".to_string(),
        };
        assert!(err.to_string().contains("barcode-scanner"));
        assert!(err.to_string().contains("no device"));
    }

    #[test]
    fn test_from_serde_json() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::SerializationError(_)));
    }
}
