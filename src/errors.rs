//! Unified error type for the attendance desk.
//!
//! Every fallible operation in the crate returns [`Result`]. Local input errors are
//! raised before any network call. Transport errors mean the request did not complete.
//! A `success: false` answer is not an error here; it is reported as an outcome.

use thiserror::Error;

/// All errors produced by the attendance desk.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is incomplete.
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the configuration
        message: String,
    },

    /// Login was attempted with a blank username or password.
    #[error("Username and password are required.")]
    MissingCredentials,

    /// The service rejected the credentials.
    #[error("{message}")]
    AuthenticationFailed {
        /// Message shown to the user
        message: String,
    },

    /// The request to the remote service could not complete, or returned non-2xx.
    #[error("HTTP error calling {endpoint}: {message}")]
    Transport {
        /// Service action that was being called
        endpoint: String,
        /// Transport-level description
        message: String,
    },

    /// A count field received text that is not a whole number.
    #[error("Invalid count '{input}': enter a whole number between 0 and 99")]
    InvalidInput {
        /// The rejected text
        input: String,
    },

    /// A field identifier did not name one of the sixteen count fields.
    #[error("Unknown field '{name}'")]
    UnknownField {
        /// The identifier that failed to parse
        name: String,
    },

    /// A date argument was not a valid `YYYY-MM-DD` calendar date.
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected text
        input: String,
    },

    /// The session is waiting on a network call and cannot accept this action.
    #[error("Please wait: {activity} is still in progress")]
    Busy {
        /// The in-flight activity
        activity: String,
    },

    /// A form command was used before logging in.
    #[error("Not logged in. Use /login first.")]
    NotLoggedIn,

    /// I/O failure, e.g. while reading the configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is missing.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Encoding a record for submission failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Formatting a rendered form failed.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error.
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_credentials_message_matches_login_form() {
        assert_eq!(
            Error::MissingCredentials.to_string(),
            "Username and password are required."
        );
    }

    #[test]
    fn test_authentication_failed_shows_service_message_verbatim() {
        let err = Error::AuthenticationFailed {
            message: "Account locked".to_string(),
        };
        assert_eq!(err.to_string(), "Account locked");
    }
}
