//! `SmartCoil` Bridge - Alexa Smart Home directive adapter
//!
//! Translates Alexa Smart Home directives into commands against a single
//! remote `SmartCoil` fan-coil unit and shapes the device's response back
//! into the envelope the platform expects.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              Alexa Smart Home platform               │
//! │        Discover │ SetThermostatMode │ ...           │
//! └────────────────────┬────────────────────────────────┘
//!                      │ directive
//! ┌────────────────────▼────────────────────────────────┐
//! │                SmartCoil Bridge                      │
//! │   Router │ Catalog │ Translator │ Unwrapper         │
//! └────────────────────┬────────────────────────────────┘
//!                      │ HTTPS POST
//! ┌────────────────────▼────────────────────────────────┐
//! │            SmartCoil device backend                  │
//! │   /turn │ /set_temperature │ /set_speed │ /state    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Discovery is answered locally from the capability catalog; every other
//! routed directive performs exactly one backend call.

pub mod backend;
pub mod bridge;
pub mod config;
pub mod directive;
pub mod discovery;
pub mod error;

pub use backend::{BackendCommand, HttpTransport, SwitchState, Transport, unwrap_response};
pub use bridge::SmartcoilBridge;
pub use config::Config;
pub use directive::{Directive, DirectiveRequest, Header, Operation};
pub use discovery::{DiscoveryResponse, EndpointDescriptor, discover};
pub use error::{Error, Result};
