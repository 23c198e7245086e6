//! Error types for the Knihovka plugin.
//!
//! This module defines the centralized error type [`KnihovkaError`] and a type
//! alias [`Result`] for convenient error handling throughout the plugin. All
//! errors are implemented using the `thiserror` crate for automatic `Error`
//! trait implementation.
//!
//! The data layer normalizes every fetch failure (transport errors, non-2xx
//! HTTP responses, JSON decode failures) into this one taxonomy; callers
//! render the message in an error banner and withhold list content. No variant
//! triggers a retry.

use thiserror::Error;

/// The main error type for Knihovka plugin operations.
///
/// This enum consolidates all error conditions that can occur during plugin
/// execution, from catalog API failures to theme and configuration issues.
///
/// # Examples
///
/// ```
/// use knihovka::domain::KnihovkaError;
///
/// let err = KnihovkaError::Http {
///     status: 500,
///     status_text: "Internal Server Error".to_string(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "API request failed: 500 Internal Server Error"
/// );
/// ```
#[derive(Debug, Error)]
pub enum KnihovkaError {
    /// The catalog API answered with a non-2xx status.
    ///
    /// Carries the HTTP status code and status text so the error banner can
    /// show exactly what the server said.
    #[error("API request failed: {status} {status_text}")]
    Http {
        /// HTTP status code of the response.
        status: u16,
        /// Status text accompanying the code (e.g. "Internal Server Error").
        status_text: String,
    },

    /// The request never produced a usable response.
    ///
    /// Covers DNS failures, refused connections and any other transport-level
    /// problem reported by the host. The string contains the host's
    /// description of what went wrong.
    #[error("Network error: {0}")]
    Transport(String),

    /// The response body was not the JSON shape the endpoint promises.
    ///
    /// Automatically converts from `serde_json::Error` using the `#[from]`
    /// attribute.
    #[error("Invalid API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Theme parsing or loading failed.
    ///
    /// Occurs when a built-in or custom TOML theme cannot be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Knihovka operations.
///
/// This is a type alias for `std::result::Result<T, KnihovkaError>` that
/// simplifies function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, KnihovkaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_carries_status_information() {
        let err = KnihovkaError::Http {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("Service Unavailable"));
    }

    #[test]
    fn decode_error_converts_from_serde_json() {
        let parse_failure = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let err = KnihovkaError::from(parse_failure);
        assert!(matches!(err, KnihovkaError::Decode(_)));
    }
}
