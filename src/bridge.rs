//! The bridge: one directive in, one response out
//!
//! Routes an inbound directive, answers discovery locally, and forwards
//! control operations to the device backend through the [`Transport`] seam.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use crate::backend::{
    BackendCommand, HttpTransport, SPEED_PATH, STATE_PATH, SwitchState, TEMPERATURE_PATH,
    TURN_PATH, Transport, unwrap_response,
};
use crate::config::Config;
use crate::directive::{DirectiveRequest, Operation};
use crate::discovery::discover;
use crate::{Error, Result};

/// Directive adapter for the single `SmartCoil` unit
pub struct SmartcoilBridge {
    transport: Box<dyn Transport>,
    token: SecretString,
}

impl SmartcoilBridge {
    /// Create a bridge talking to the configured backend over HTTPS
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config.endpoint.clone(), config.timeout)?;
        Ok(Self::with_transport(Box::new(transport), config.token.clone()))
    }

    /// Create a bridge over an arbitrary transport
    #[must_use]
    pub fn with_transport(transport: Box<dyn Transport>, token: SecretString) -> Self {
        Self { transport, token }
    }

    /// Handle one directive, producing exactly one outcome
    ///
    /// Discovery is answered synchronously from the capability catalog.
    /// Control operations issue a single backend call and return the
    /// unwrapped device response. At most one network call happens per
    /// invocation, and none for discovery or unroutable directives.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnhandledDirective`] when the `(namespace, name)`
    /// pair matches no operation, [`Error::Directive`] when a routed payload
    /// field is missing, and transport/decoding errors from the backend
    /// round trip.
    pub async fn handle(&self, request: &DirectiveRequest) -> Result<Value> {
        let header = &request.directive.header;

        let Some(operation) = Operation::route(header) else {
            return Err(Error::UnhandledDirective {
                namespace: header.namespace.clone(),
                name: header.name.clone(),
            });
        };

        tracing::debug!(
            namespace = %header.namespace,
            name = %header.name,
            ?operation,
            "routing directive"
        );

        let token = self.token.expose_secret();
        let (path, command) = match operation {
            Operation::Discover => {
                return Ok(serde_json::to_value(discover(header))?);
            }
            Operation::SetPower => {
                let mode = request.directive.thermostat_mode()?;
                let switch = SwitchState::from_thermostat_mode(mode);
                (TURN_PATH, BackendCommand::turn(token, switch, request))
            }
            Operation::SetTemperature => {
                let temperature = request.directive.target_setpoint()?;
                (
                    TEMPERATURE_PATH,
                    BackendCommand::set_temperature(token, temperature, request),
                )
            }
            Operation::SetSpeed => {
                let speed = request.directive.range_value()?;
                (SPEED_PATH, BackendCommand::set_speed(token, speed, request))
            }
            Operation::ReportState => (STATE_PATH, BackendCommand::report_state(token, request)),
        };

        tracing::debug!(path, "forwarding command to backend");

        let raw = self.transport.post(path, serde_json::to_value(&command)?).await?;
        unwrap_response(&raw)
    }
}
