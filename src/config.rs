//! Configuration for the `SmartCoil` bridge
//!
//! Everything is injected through the environment at startup. The shared
//! secret is held as a [`SecretString`] and never appears in logs or
//! `Debug` output.

use std::time::Duration;

use secrecy::SecretString;

use crate::{Error, Result};

/// Environment variable holding the backend base URL
pub const ENDPOINT_VAR: &str = "SMARTCOIL_ENDPOINT";

/// Environment variable holding the shared secret token
pub const TOKEN_VAR: &str = "SMARTCOIL_TOKEN";

/// Environment variable overriding the request timeout, in seconds
pub const TIMEOUT_VAR: &str = "SMARTCOIL_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Bridge configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the device backend (e.g. `https://abemo.pagekite.me`)
    pub endpoint: String,

    /// Shared secret sent with every backend command
    pub token: SecretString,

    /// Timeout for the single backend request per directive
    pub timeout: Duration,
}

impl Config {
    /// Create a configuration from explicit values
    #[must_use]
    pub fn new(endpoint: impl Into<String>, token: SecretString) -> Self {
        Self {
            endpoint: normalize_endpoint(endpoint.into()),
            token,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `SMARTCOIL_ENDPOINT` or
    /// `SMARTCOIL_TOKEN` is missing or empty, or if
    /// `SMARTCOIL_TIMEOUT_SECS` is set but not a positive integer.
    pub fn from_env() -> Result<Self> {
        let endpoint = require_var(ENDPOINT_VAR)?;
        let token = SecretString::from(require_var(TOKEN_VAR)?);

        let timeout = match std::env::var(TIMEOUT_VAR) {
            Ok(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| Error::Config(format!("{TIMEOUT_VAR} must be an integer")))?;
                if secs == 0 {
                    return Err(Error::Config(format!("{TIMEOUT_VAR} must be positive")));
                }
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            endpoint: normalize_endpoint(endpoint),
            token,
            timeout,
        })
    }
}

fn require_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{name} is not set"))),
    }
}

/// Strip a trailing slash so paths can be appended verbatim
fn normalize_endpoint(mut endpoint: String) -> String {
    while endpoint.ends_with('/') {
        endpoint.pop();
    }
    endpoint
}
