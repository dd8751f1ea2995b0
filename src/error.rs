//! Error types for the settings registry

use thiserror::Error;

/// Result type alias for registry and setter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the settings registry
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Setting not found: {0}")]
    SettingNotFound(String),

    // -------------------------------------------------------------------------
    // Value Errors
    // -------------------------------------------------------------------------
    #[error("Invalid setting value for {key}: {reason}")]
    InvalidSettingValue { key: String, reason: String },

    #[error("Failed to parse '{value}' as {kind} for {key}: {reason}")]
    Parse {
        key: String,
        kind: String,
        value: String,
        reason: String,
    },

    #[error("Type mismatch for {key}: expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    #[error("Setting {0} does not declare a kind")]
    KindNotDeclared(String),

    // -------------------------------------------------------------------------
    // Registry Construction Errors
    // -------------------------------------------------------------------------
    #[error("Setting {0} is registered more than once")]
    DuplicateSetting(String),

    #[error("Invalid setting metadata for {key}: {reason}")]
    InvalidSettingMetadata { key: String, reason: String },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to read setting definitions: {0}")]
    Definitions(String),
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::SettingNotFound(_))
    }

    /// Check if a value was rejected by a validator or constraint
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::InvalidSettingValue { .. })
    }

    /// Check if a raw value could not be coerced into the requested kind
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = Error::SettingNotFound("nonexistant".into());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Setting not found: nonexistant");
    }

    #[test]
    fn test_parse_message_carries_raw_input() {
        let err = Error::Parse {
            key: "cpus".into(),
            kind: "int".into(),
            value: "not-a-number".into(),
            reason: "invalid digit found in string".into(),
        };
        assert!(err.is_parse_error());
        assert!(!err.is_validation_error());
        assert!(err.to_string().contains("'not-a-number'"));
    }

    #[test]
    fn test_validation_message_carries_reason() {
        let err = Error::InvalidSettingValue {
            key: "cpus".into(),
            reason: "cpus must be a positive integer".into(),
        };
        assert!(err.is_validation_error());
        assert!(err.to_string().contains("positive"));
    }
}
