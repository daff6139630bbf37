//! Error handling for the featgen scaffolding library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! # Examples
//!
//! ```
//! use featgen_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     // Operations that might fail...
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type for featgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for featgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Prompt backend error
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// No file configuration exists for the requested route
    #[error("No file configuration found for API method \"{method}\" with return type \"{}\"", display_return_type(.return_type))]
    UnresolvedRoute {
        method: String,
        return_type: Option<String>,
    },

    /// The user cancelled the prompt sequence
    #[error("Aborted by user")]
    Aborted,
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new prompt error
    pub fn prompt<S: Into<String>>(msg: S) -> Self {
        Self::Prompt(msg.into())
    }

    /// Whether this error is the early-return configuration case rather than a crash
    pub fn is_unresolved_route(&self) -> bool {
        matches!(self, Self::UnresolvedRoute { .. })
    }
}

fn display_return_type(return_type: &Option<String>) -> &str {
    return_type.as_deref().unwrap_or("undefined")
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Config(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Config(s)
    }
}
