//! Device backend commands, transport, and response unwrapping
//!
//! Each control operation POSTs one JSON command to a fixed path on the
//! `SmartCoil` backend. The body always carries the shared secret and the
//! full original directive (the backend logs it); exactly one of `switch`,
//! `temperature`, or `speed` is present, or none for a state query.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::directive::DirectiveRequest;
use crate::{Error, Result};

/// Path for on/off commands
pub const TURN_PATH: &str = "/turn_smartcoil";

/// Path for target-temperature commands
pub const TEMPERATURE_PATH: &str = "/set_smartcoil_temperature";

/// Path for fan-speed commands
pub const SPEED_PATH: &str = "/set_smartcoil_speed";

/// Path for state queries
pub const STATE_PATH: &str = "/get_smartcoil_state";

/// Binary switch state understood by the backend
///
/// The device only supports on/off, not distinct heat/cool modes, so every
/// thermostat mode except `OFF` collapses to `On`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    /// Unit running
    On,
    /// Unit stopped
    Off,
}

impl SwitchState {
    /// Translate an Alexa thermostat mode into a switch state
    #[must_use]
    pub fn from_thermostat_mode(mode: &str) -> Self {
        if mode == "OFF" { Self::Off } else { Self::On }
    }
}

/// One outbound command to the device backend
///
/// Built per control invocation, sent once, discarded.
#[derive(Debug, Serialize)]
pub struct BackendCommand<'a> {
    /// Shared secret the backend validates
    pub token: &'a str,

    /// Switch state, set-power only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch: Option<SwitchState>,

    /// Target temperature, set-temperature only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Fan speed, set-speed only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<i64>,

    /// The original inbound directive, forwarded for backend-side tracing
    pub request: &'a DirectiveRequest,
}

impl<'a> BackendCommand<'a> {
    fn bare(token: &'a str, request: &'a DirectiveRequest) -> Self {
        Self {
            token,
            switch: None,
            temperature: None,
            speed: None,
            request,
        }
    }

    /// Command for `/turn_smartcoil`
    #[must_use]
    pub fn turn(token: &'a str, switch: SwitchState, request: &'a DirectiveRequest) -> Self {
        Self {
            switch: Some(switch),
            ..Self::bare(token, request)
        }
    }

    /// Command for `/set_smartcoil_temperature`
    #[must_use]
    pub fn set_temperature(token: &'a str, temperature: f64, request: &'a DirectiveRequest) -> Self {
        Self {
            temperature: Some(temperature),
            ..Self::bare(token, request)
        }
    }

    /// Command for `/set_smartcoil_speed`
    #[must_use]
    pub fn set_speed(token: &'a str, speed: i64, request: &'a DirectiveRequest) -> Self {
        Self {
            speed: Some(speed),
            ..Self::bare(token, request)
        }
    }

    /// Command for `/get_smartcoil_state`
    #[must_use]
    pub fn report_state(token: &'a str, request: &'a DirectiveRequest) -> Self {
        Self::bare(token, request)
    }
}

/// Transport seam to the device backend
///
/// The tunnel in front of the device delivers its JSON reply wrapped in a
/// JSON string literal, so a successful `post` returns a double-encoded
/// body; callers unwrap it with [`unwrap_response`]. Implementations must
/// not retry — retries belong to the surrounding infrastructure.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a JSON body to `path`, returning the raw response body
    ///
    /// # Errors
    ///
    /// Returns [`Error::Backend`] for any non-2xx status and
    /// [`Error::Http`] for network-level failures.
    async fn post(&self, path: &str, body: Value) -> Result<String>;
}

/// HTTPS transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the given backend base URL
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the underlying client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: Value) -> Result<String> {
        let url = format!("{}{path}", self.base_url);

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend { status, body });
        }

        let text = response.text().await?;

        // Tunnel contract: the body reaches the caller as a JSON string
        // literal wrapping the device's JSON reply.
        Ok(serde_json::to_string(&text)?)
    }
}

/// Unwrap a double-encoded backend response
///
/// Decodes `raw` as JSON, requires the result to be a string, then decodes
/// that string as JSON. Exactly two passes — not one, and not "decode until
/// not a string" — because that is the backend's wire contract.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] if either decode fails or the first
/// decode does not yield a string.
pub fn unwrap_response(raw: &str) -> Result<Value> {
    let outer: Value = serde_json::from_str(raw)
        .map_err(|e| Error::MalformedResponse(format!("outer decode failed: {e}")))?;

    let Value::String(inner) = outer else {
        return Err(Error::MalformedResponse(
            "outer decode did not yield a string".to_string(),
        ));
    };

    serde_json::from_str(&inner)
        .map_err(|e| Error::MalformedResponse(format!("inner decode failed: {e}")))
}
