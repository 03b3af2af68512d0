//! Capability catalog and discovery response construction
//!
//! The `SmartCoil` exposes three interfaces to Alexa:
//! - `Alexa.ThermostatController` — on/off via thermostat mode plus target
//!   temperature
//! - `Alexa.TemperatureSensor` — current indoor temperature
//! - `Alexa.RangeController` — fan speed, range 1..=3 with low/medium/high
//!   presets
//!
//! Discovery is pure and synchronous: a static endpoint descriptor plus the
//! inbound header with `name` rewritten to `Discover.Response`. It never
//! touches the network.

use serde::{Deserialize, Serialize};

use crate::directive::Header;

/// Endpoint id the backend recognizes
pub const ENDPOINT_ID: &str = "smartcoil_id";

/// Instance id of the fan-speed range capability
pub const FAN_SPEED_INSTANCE: &str = "Fancoil.Speed";

/// Response envelope for a `Discover` directive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryResponse {
    /// The single event carried by the envelope
    pub event: DiscoveryEvent,
}

/// Event body of a discovery response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryEvent {
    /// Inbound header with `name` rewritten to `Discover.Response`
    pub header: Header,
    /// The enumerated endpoints
    pub payload: DiscoveryPayload,
}

/// Discovery payload: the endpoints this skill manages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryPayload {
    /// Always exactly one endpoint, the `SmartCoil` itself
    pub endpoints: Vec<EndpointDescriptor>,
}

/// Static description of one controllable endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    /// Stable endpoint identifier
    pub endpoint_id: String,
    /// Manufacturer display name
    pub manufacturer_name: String,
    /// Name users say to Alexa
    pub friendly_name: String,
    /// Human-readable description
    pub description: String,
    /// Alexa display categories
    pub display_categories: Vec<String>,
    /// Supported interfaces, in declaration order
    pub capabilities: Vec<Capability>,
}

/// One supported interface
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    /// Always `AlexaInterface`
    #[serde(rename = "type")]
    pub kind: String,
    /// Interface identifier, e.g. `Alexa.TemperatureSensor`
    pub interface: String,
    /// Interface version
    pub version: String,
    /// Instance id, only present on the range capability
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Friendly names for the capability itself (range capability only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capability_resources: Option<Resources>,
    /// Reportable properties
    pub properties: CapabilityProperties,
    /// Interface-specific configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Configuration>,
}

/// Properties block of a capability
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityProperties {
    /// Property names the endpoint reports
    pub supported: Vec<SupportedProperty>,
    /// Whether the endpoint pushes state changes
    pub proactively_reported: bool,
    /// Whether Alexa may query state on demand
    pub retrievable: bool,
}

/// A single reportable property name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportedProperty {
    /// Property name, e.g. `targetSetpoint`
    pub name: String,
}

/// Interface-specific configuration payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Configuration {
    /// Thermostat configuration
    #[serde(rename_all = "camelCase")]
    Thermostat {
        /// The device cannot schedule setpoints
        supports_scheduling: bool,
        /// Modes the thermostat accepts
        supported_modes: Vec<String>,
    },
    /// Range configuration (fan speed)
    #[serde(rename_all = "camelCase")]
    Range {
        /// Numeric bounds and step of the range
        supported_range: SupportedRange,
        /// Named discrete values within the range
        presets: Vec<Preset>,
    },
}

/// Numeric range with a step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedRange {
    /// Lowest accepted value
    pub minimum_value: i64,
    /// Highest accepted value
    pub maximum_value: i64,
    /// Step between accepted values
    pub precision: i64,
}

/// A named discrete value within a range
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// The discrete range value
    pub range_value: i64,
    /// How users may refer to this value
    pub preset_resources: Resources,
}

/// Friendly-name resources for a capability or preset
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resources {
    /// Ordered list of names, assets first
    pub friendly_names: Vec<FriendlyName>,
}

/// One way of referring to a capability or preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "@type", content = "value", rename_all = "lowercase")]
pub enum FriendlyName {
    /// Machine-readable Alexa asset identifier
    #[serde(rename_all = "camelCase")]
    Asset {
        /// Asset catalog id, e.g. `Alexa.Value.Low`
        asset_id: String,
    },
    /// Literal, locale-tagged label
    Text {
        /// The label itself
        text: String,
        /// BCP-47 locale tag
        locale: String,
    },
}

impl FriendlyName {
    /// An asset-catalog name
    #[must_use]
    pub fn asset(asset_id: &str) -> Self {
        Self::Asset {
            asset_id: asset_id.to_string(),
        }
    }

    /// A literal, locale-tagged name
    #[must_use]
    pub fn text(text: &str, locale: &str) -> Self {
        Self::Text {
            text: text.to_string(),
            locale: locale.to_string(),
        }
    }
}

impl CapabilityProperties {
    fn reporting(names: &[&str]) -> Self {
        Self {
            supported: names
                .iter()
                .map(|name| SupportedProperty {
                    name: (*name).to_string(),
                })
                .collect(),
            proactively_reported: true,
            retrievable: true,
        }
    }
}

impl EndpointDescriptor {
    /// The static descriptor of the single managed `SmartCoil` unit
    #[must_use]
    pub fn smartcoil() -> Self {
        Self {
            endpoint_id: ENDPOINT_ID.to_string(),
            manufacturer_name: "SmartCoil".to_string(),
            friendly_name: "smartcoil".to_string(),
            description: "Smart Fancoil Unit".to_string(),
            display_categories: vec!["THERMOSTAT".to_string()],
            capabilities: vec![
                thermostat_capability(),
                temperature_sensor_capability(),
                fan_speed_capability(),
            ],
        }
    }
}

fn thermostat_capability() -> Capability {
    Capability {
        kind: "AlexaInterface".to_string(),
        interface: "Alexa.ThermostatController".to_string(),
        version: "3".to_string(),
        instance: None,
        capability_resources: None,
        properties: CapabilityProperties::reporting(&["targetSetpoint", "thermostatMode"]),
        configuration: Some(Configuration::Thermostat {
            supports_scheduling: false,
            supported_modes: vec!["HEAT".to_string(), "COOL".to_string()],
        }),
    }
}

fn temperature_sensor_capability() -> Capability {
    Capability {
        kind: "AlexaInterface".to_string(),
        interface: "Alexa.TemperatureSensor".to_string(),
        version: "3".to_string(),
        instance: None,
        capability_resources: None,
        properties: CapabilityProperties::reporting(&["temperature"]),
        configuration: None,
    }
}

/// Fan-speed range capability
///
/// The extremes carry both asset ids and a locale-tagged text label; the
/// medium preset carries only its asset id. This asymmetry is the backend's
/// fan-speed vocabulary and is deliberate.
fn fan_speed_capability() -> Capability {
    Capability {
        kind: "AlexaInterface".to_string(),
        interface: "Alexa.RangeController".to_string(),
        version: "3".to_string(),
        instance: Some(FAN_SPEED_INSTANCE.to_string()),
        capability_resources: Some(Resources {
            friendly_names: vec![FriendlyName::asset("Alexa.Setting.FanSpeed")],
        }),
        properties: CapabilityProperties::reporting(&["rangeValue"]),
        configuration: Some(Configuration::Range {
            supported_range: SupportedRange {
                minimum_value: 1,
                maximum_value: 3,
                precision: 1,
            },
            presets: vec![
                Preset {
                    range_value: 1,
                    preset_resources: Resources {
                        friendly_names: vec![
                            FriendlyName::asset("Alexa.Value.Minimum"),
                            FriendlyName::asset("Alexa.Value.Low"),
                            FriendlyName::text("Lowest", "en-US"),
                        ],
                    },
                },
                Preset {
                    range_value: 2,
                    preset_resources: Resources {
                        friendly_names: vec![FriendlyName::asset("Alexa.Value.Medium")],
                    },
                },
                Preset {
                    range_value: 3,
                    preset_resources: Resources {
                        friendly_names: vec![
                            FriendlyName::asset("Alexa.Value.Maximum"),
                            FriendlyName::asset("Alexa.Value.High"),
                            FriendlyName::text("Highest", "en-US"),
                        ],
                    },
                },
            ],
        }),
    }
}

/// Build the discovery response for an inbound `Discover` header
///
/// The header is echoed with `name` rewritten to `Discover.Response`; every
/// other header field passes through untouched.
#[must_use]
pub fn discover(header: &Header) -> DiscoveryResponse {
    let mut header = header.clone();
    header.name = "Discover.Response".to_string();

    DiscoveryResponse {
        event: DiscoveryEvent {
            header,
            payload: DiscoveryPayload {
                endpoints: vec![EndpointDescriptor::smartcoil()],
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn one_endpoint_three_capabilities() {
        let endpoint = EndpointDescriptor::smartcoil();
        let interfaces: Vec<_> = endpoint
            .capabilities
            .iter()
            .map(|c| c.interface.as_str())
            .collect();
        assert_eq!(
            interfaces,
            [
                "Alexa.ThermostatController",
                "Alexa.TemperatureSensor",
                "Alexa.RangeController"
            ]
        );
    }

    #[test]
    fn presets_stay_within_the_declared_range() {
        let endpoint = EndpointDescriptor::smartcoil();
        let range = endpoint
            .capabilities
            .iter()
            .find_map(|c| match &c.configuration {
                Some(Configuration::Range {
                    supported_range,
                    presets,
                }) => Some((supported_range, presets)),
                _ => None,
            })
            .expect("range capability present");

        let (bounds, presets) = range;
        assert_eq!(presets.len(), 3);
        for preset in presets {
            assert!(preset.range_value >= bounds.minimum_value);
            assert!(preset.range_value <= bounds.maximum_value);
        }
    }

    #[test]
    fn medium_preset_has_only_its_asset_id() {
        let endpoint = EndpointDescriptor::smartcoil();
        let presets = endpoint
            .capabilities
            .iter()
            .find_map(|c| match &c.configuration {
                Some(Configuration::Range { presets, .. }) => Some(presets),
                _ => None,
            })
            .expect("range capability present");

        let medium = presets.iter().find(|p| p.range_value == 2).unwrap();
        assert_eq!(
            medium.preset_resources.friendly_names,
            [FriendlyName::asset("Alexa.Value.Medium")]
        );

        // The extremes carry a text label; medium must not grow one.
        for preset in presets.iter().filter(|p| p.range_value != 2) {
            assert!(preset
                .preset_resources
                .friendly_names
                .iter()
                .any(|n| matches!(n, FriendlyName::Text { .. })));
        }
    }

    #[test]
    fn friendly_names_serialize_with_at_type_tag() {
        assert_eq!(
            serde_json::to_value(FriendlyName::asset("Alexa.Value.Low")).unwrap(),
            json!({"@type": "asset", "value": {"assetId": "Alexa.Value.Low"}})
        );
        assert_eq!(
            serde_json::to_value(FriendlyName::text("Lowest", "en-US")).unwrap(),
            json!({"@type": "text", "value": {"text": "Lowest", "locale": "en-US"}})
        );
    }

    #[test]
    fn discover_rewrites_only_the_header_name() {
        let header: Header = serde_json::from_value(json!({
            "namespace": "Alexa.Discovery",
            "name": "Discover",
            "payloadVersion": "3",
            "messageId": "msg-1"
        }))
        .unwrap();

        let response = discover(&header);
        assert_eq!(response.event.header.name, "Discover.Response");
        assert_eq!(response.event.header.namespace, "Alexa.Discovery");
        assert_eq!(
            response.event.header.extra.get("messageId"),
            Some(&json!("msg-1"))
        );
        assert_eq!(response.event.payload.endpoints.len(), 1);
    }
}
