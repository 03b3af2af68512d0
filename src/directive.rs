//! Alexa Smart Home directive model and routing
//!
//! A directive's `(namespace, name)` header pair uniquely determines which
//! operation runs and which payload field is read. Everything else in the
//! envelope is opaque to the bridge and echoed back unmodified.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Envelope delivered by the Alexa platform: `{ "directive": { ... } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectiveRequest {
    /// The directive itself
    pub directive: Directive,
}

/// A single Smart Home directive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Directive {
    /// Interface and operation identification plus correlation metadata
    pub header: Header,

    /// Operation-specific payload; its shape depends on `(namespace, name)`
    #[serde(default)]
    pub payload: Value,

    /// Endpoint scope and id; absent on discovery directives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Value>,
}

/// Directive header
///
/// Only `namespace` and `name` are interpreted. The remaining fields
/// (`payloadVersion`, `messageId`, `correlationToken`, ...) are carried in
/// the flattened map so the backend and the discovery response see them
/// exactly as they arrived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    /// Interface identifier, e.g. `Alexa.ThermostatController`
    pub namespace: String,

    /// Operation name, e.g. `SetThermostatMode`
    pub name: String,

    /// Correlation metadata, echoed back untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The closed set of operations the bridge knows how to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Enumerate the endpoint and its capabilities (synchronous, no network)
    Discover,
    /// Turn the unit on or off via the thermostat mode
    SetPower,
    /// Change the target temperature
    SetTemperature,
    /// Change the fan speed
    SetSpeed,
    /// Query the current device state
    ReportState,
}

impl Operation {
    /// Route a directive header to an operation
    ///
    /// Returns `None` for any `(namespace, name)` pair outside the closed
    /// set; callers must surface that as an unhandled-directive error, not
    /// treat it as success.
    #[must_use]
    pub fn route(header: &Header) -> Option<Self> {
        match (header.namespace.as_str(), header.name.as_str()) {
            ("Alexa.Discovery", "Discover") => Some(Self::Discover),
            ("Alexa.ThermostatController", "SetThermostatMode") => Some(Self::SetPower),
            ("Alexa.ThermostatController", "SetTargetTemperature") => Some(Self::SetTemperature),
            ("Alexa.RangeController", "SetRangeValue") => Some(Self::SetSpeed),
            ("Alexa", "ReportState") => Some(Self::ReportState),
            _ => None,
        }
    }
}

impl Directive {
    /// Extract `payload.thermostatMode.value`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Directive`] if the field is missing or not a string.
    pub fn thermostat_mode(&self) -> Result<&str> {
        self.payload
            .pointer("/thermostatMode/value")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Directive("payload.thermostatMode.value missing".into()))
    }

    /// Extract `payload.targetSetpoint.value`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Directive`] if the field is missing or not a number.
    pub fn target_setpoint(&self) -> Result<f64> {
        self.payload
            .pointer("/targetSetpoint/value")
            .and_then(Value::as_f64)
            .ok_or_else(|| Error::Directive("payload.targetSetpoint.value missing".into()))
    }

    /// Extract `payload.rangeValue`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Directive`] if the field is missing or not an integer.
    pub fn range_value(&self) -> Result<i64> {
        self.payload
            .get("rangeValue")
            .and_then(Value::as_i64)
            .ok_or_else(|| Error::Directive("payload.rangeValue missing".into()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn header(namespace: &str, name: &str) -> Header {
        Header {
            namespace: namespace.to_string(),
            name: name.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn routes_the_known_pairs() {
        let cases = [
            ("Alexa.Discovery", "Discover", Operation::Discover),
            (
                "Alexa.ThermostatController",
                "SetThermostatMode",
                Operation::SetPower,
            ),
            (
                "Alexa.ThermostatController",
                "SetTargetTemperature",
                Operation::SetTemperature,
            ),
            ("Alexa.RangeController", "SetRangeValue", Operation::SetSpeed),
            ("Alexa", "ReportState", Operation::ReportState),
        ];

        for (namespace, name, expected) in cases {
            assert_eq!(Operation::route(&header(namespace, name)), Some(expected));
        }
    }

    #[test]
    fn unknown_pairs_do_not_route() {
        assert_eq!(Operation::route(&header("Alexa.PowerController", "TurnOn")), None);
        assert_eq!(Operation::route(&header("Alexa.Discovery", "Delete")), None);
        assert_eq!(Operation::route(&header("Alexa", "SetThermostatMode")), None);
    }

    #[test]
    fn header_preserves_unknown_fields() {
        let raw = json!({
            "namespace": "Alexa",
            "name": "ReportState",
            "payloadVersion": "3",
            "messageId": "abc-123",
            "correlationToken": "tok"
        });

        let parsed: Header = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(parsed.extra.len(), 3);
        assert_eq!(serde_json::to_value(&parsed).unwrap(), raw);
    }

    #[test]
    fn payload_extraction() {
        let directive: Directive = serde_json::from_value(json!({
            "header": {"namespace": "Alexa.ThermostatController", "name": "SetTargetTemperature"},
            "payload": {"targetSetpoint": {"value": 21.5, "scale": "CELSIUS"}}
        }))
        .unwrap();

        assert!((directive.target_setpoint().unwrap() - 21.5).abs() < f64::EPSILON);
        assert!(directive.thermostat_mode().is_err());
        assert!(directive.range_value().is_err());
    }
}
