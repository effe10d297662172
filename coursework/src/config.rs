//! Posts client configuration loaded via OrthoConfig.
//!
//! Values come from `COURSEWORK_*` environment variables (and any
//! configuration file OrthoConfig discovers); command-line flags override them
//! in `main`.

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::placeholder::DEFAULT_ENDPOINT;

/// Posts listed when neither a limit nor `--all` is requested.
pub const DEFAULT_LIST_LIMIT: usize = 5;

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings could not be loaded from the environment or files.
    #[error("failed to load settings: {message}")]
    Load {
        /// Loader failure description.
        message: String,
    },
    /// The configured endpoint is not an absolute URL.
    #[error("invalid posts endpoint {endpoint:?}: {source}")]
    InvalidEndpoint {
        /// Endpoint text as configured.
        endpoint: String,
        /// Underlying parse failure.
        #[source]
        source: url::ParseError,
    },
}

/// Settings for the posts commands.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COURSEWORK")]
pub struct PostsSettings {
    /// Base URL of the posts API.
    pub endpoint: Option<String>,
    /// Posts listed by default; zero falls back to [`DEFAULT_LIST_LIMIT`].
    #[ortho_config(default = 5)]
    pub list_limit: usize,
    /// Per-request timeout in seconds; unset or zero disables the timeout.
    pub request_timeout_secs: Option<u64>,
}

impl PostsSettings {
    /// Load settings from the environment without reading process arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source holds malformed values.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from("coursework")]).map_err(|error| ConfigError::Load {
            message: error.to_string(),
        })
    }

    /// Configured endpoint, falling back to the public placeholder API.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] when the value does not parse.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        parse_endpoint(self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT))
    }

    /// Configured default list size, falling back to [`DEFAULT_LIST_LIMIT`].
    pub fn list_limit(&self) -> usize {
        match self.list_limit {
            0 => DEFAULT_LIST_LIMIT,
            limit => limit,
        }
    }

    /// Request timeout, if one is configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }
}

/// Parse an endpoint given on the command line or in settings.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEndpoint`] when the value does not parse.
pub fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidEndpoint {
        endpoint: raw.to_owned(),
        source,
    })
}
