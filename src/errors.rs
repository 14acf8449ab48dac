//! # Error Handling
//!
//! Query parsing and predicate evaluation never fail: malformed tags degrade to
//! substring matching. The errors in this module come from the edges of the
//! engine, namely configuration, the settings store, snapshot loading and
//! running the pipeline before any collection has been loaded.
//!
//! ## Logging
//!
//! Detail is logged through `tracing`. The library never installs a
//! subscriber, so nothing is printed unless the host application sets one up:
//!
//! ```rust,ignore
//! tracing_subscriber::fmt()
//!     .with_target(false)
//!     .compact()
//!     .init();
//! ```

use std::fmt;

#[derive(Debug)]
pub enum GearError {
    /// The pipeline ran before an item collection was loaded
    NotLoaded,

    /// A configuration value failed validation
    InvalidConfig {
        /// Offending field
        field: String,
        /// Human-readable reason
        message: String,
    },

    /// Reading or writing the settings file failed
    Io(std::io::Error),

    /// A settings file or player snapshot could not be (de)serialized
    Serialization(serde_json::Error),
}

impl GearError {
    /// Create a configuration validation error
    ///
    /// # Example
    /// ```rust,ignore
    /// return Err(GearError::invalid_config("page_size", "Must be at least 1"));
    /// ```
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the error is an expected state rather than a failure
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NotLoaded)
    }

    /// Log internal error details
    ///
    /// Expected states are logged at debug level, IO and serialization
    /// failures at error level.
    pub fn log_internal(&self) {
        match self {
            Self::NotLoaded => {
                tracing::debug!("Filter requested before gear was loaded");
            }
            Self::InvalidConfig { field, message } => {
                tracing::warn!(field = %field, message = %message, "Invalid configuration");
            }
            Self::Io(err) => {
                tracing::error!(error = ?err, "Settings IO error occurred");
            }
            Self::Serialization(err) => {
                tracing::error!(error = ?err, "Serialization error occurred");
            }
        }
    }
}

impl fmt::Display for GearError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotLoaded => write!(f, "No gear has been loaded"),
            Self::InvalidConfig { field, message } => {
                write!(f, "Invalid configuration for '{field}': {message}")
            }
            Self::Io(err) => write!(f, "Settings IO error: {err}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
        }
    }
}

impl std::error::Error for GearError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::NotLoaded | Self::InvalidConfig { .. } => None,
        }
    }
}

impl From<std::io::Error> for GearError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for GearError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}
