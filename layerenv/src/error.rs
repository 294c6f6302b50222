//! Error types for the layerenv library.
//!
//! This module provides the error hierarchy for building and querying
//! layered environments, using `thiserror` for ergonomic error handling.
//!
//! Failures to read a `.env` file are deliberately *not* part of this enum:
//! they are recoverable and carried as data (see
//! [`LoadError`](crate::dotenv::LoadError)).

use thiserror::Error;

/// Result type alias for operations that may fail with a layerenv error.
///
/// # Examples
///
/// ```
/// use layerenv::{Error, Result};
///
/// fn example_operation() -> Result<bool> {
///     Ok(true)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the layerenv library.
#[derive(Debug, Error)]
pub enum Error {
    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An options document could not be parsed or contained invalid fields.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A value could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Required variables are missing and the caller asked for an error.
    ///
    /// This is the recoverable flavour raised by
    /// [`EnvContext::ensure`](crate::EnvContext::ensure).
    #[error("missing required env vars: {}", missing.join(", "))]
    MissingRequired {
        /// The names that were expected but not found, in request order.
        missing: Vec<String>,
    },

    /// Required variables are missing and the process should not continue.
    ///
    /// Only the outermost boundary (see [`bootstrap`](crate::bootstrap()))
    /// turns this into an actual process exit.
    #[error("required env vars not set: {}", missing.join(", "))]
    RequiredUnmet {
        /// The names that were expected but not found, in request order.
        missing: Vec<String>,
    },
}

impl Error {
    /// Check if the error should terminate the process at the outermost boundary.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerenv::Error;
    ///
    /// let err = Error::RequiredUnmet { missing: vec!["DATABASE_URL".to_string()] };
    /// assert!(err.is_fatal());
    ///
    /// let err = Error::MissingRequired { missing: vec!["DATABASE_URL".to_string()] };
    /// assert!(!err.is_fatal());
    /// ```
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RequiredUnmet { .. })
    }

    /// Names of missing required variables, if this is a required-key failure.
    #[must_use]
    pub fn missing_names(&self) -> Option<&[String]> {
        match self {
            Self::MissingRequired { missing } | Self::RequiredUnmet { missing } => Some(missing),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = Error::Validation {
            field: "defaults".to_string(),
            message: "expected a map of strings".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("defaults"));
        assert!(display.contains("expected a map of strings"));
    }

    #[test]
    fn test_missing_required_lists_names() {
        let err = Error::MissingRequired {
            missing: vec!["B".to_string(), "C".to_string()],
        };
        assert_eq!(format!("{err}"), "missing required env vars: B, C");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_required_unmet_is_fatal() {
        let err = Error::RequiredUnmet {
            missing: vec!["TOKEN".to_string()],
        };
        assert!(err.is_fatal());
        assert!(format!("{err}").contains("TOKEN"));
    }

    #[test]
    fn test_missing_names() {
        let err = Error::RequiredUnmet {
            missing: vec!["A".to_string()],
        };
        assert_eq!(err.missing_names(), Some(&["A".to_string()][..]));

        let err = Error::Validation {
            field: "x".to_string(),
            message: "y".to_string(),
        };
        assert!(err.missing_names().is_none());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        let display = format!("{err}");
        assert!(display.contains("I/O error"));
    }

    #[test]
    fn test_configuration_error_conversion() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{a: [").unwrap_err();
        let err: Error = yaml_err.into();
        assert!(format!("{err}").starts_with("configuration error"));
    }
}
