//! Publish/Acknowledge Glue Between Thermostats and a Message Broker
//!
//! ## Overview
//!
//! The thermostat core only decides *whether* something should be sent and
//! *what* the text is. This crate is the thin layer the surrounding
//! application attaches to it:
//!
//! - [`Endpoint`]: the topic pair one controller listens on and publishes to
//! - [`EndpointRegistry`]: hands out explicit ids when several controllers
//!   share a device
//! - [`Connector`]: the transport seam, implemented over MQTT, serial or
//!   whatever the device has
//! - [`ThermostatLink`]: ticks one thermostat, publishes its status and
//!   alarms, and acknowledges each message only once the transport accepted it
//!
//! Endpoints are attached to a controller by composition. The thermostat never
//! sees topic strings.
//!
//! ## Delivery Semantics
//!
//! ```text
//! sample(value)
//!   tick ──► send? ──► publish status ──ok──► acknowledge_sent()
//!                            │
//!                            └─err──► baselines untouched, next tick retries
//!   low pending?  ──► publish alarm ──ok──► acknowledge_low_alarm_sent()
//!   high pending? ──► publish alarm ──ok──► acknowledge_high_alarm_sent()
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use stagestat_connectors::{Endpoint, MemoryConnector, ThermostatLink};
//! use stagestat_core::{StageEncoding, Thermostat};
//!
//! let thermostat = Thermostat::new(2, StageEncoding::Linear)?;
//! let endpoint = Endpoint::new("house/boiler/ctrl", "house/boiler/data")?;
//! let mut link = ThermostatLink::new(thermostat, endpoint, MemoryConnector::new());
//!
//! let report = link.sample(42.0)?;
//! assert!(report.status_sent);
//! assert_eq!(link.connector().messages()[0].topic, "house/boiler/data");
//! # Ok::<(), stagestat_connectors::ConnectorError>(())
//! ```

pub mod endpoint;
pub mod link;
pub mod memory;

// Re-export common types
pub use endpoint::{Endpoint, EndpointId, EndpointRegistry, MAX_TOPIC_LEN};
pub use link::{LinkReport, ThermostatLink};
pub use memory::{MemoryConnector, PublishedMessage};

use stagestat_core::ControlError;
use thiserror::Error;

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Not connected")]
    NotConnected,

    #[error("Registry full")]
    RegistryFull,

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Thermostat error: {0}")]
    Control(#[from] ControlError),
}

/// Trait for all transports a link can publish through
pub trait Connector {
    type Error;

    /// Publish one message
    fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error>;

    /// Check if connected
    fn is_connected(&self) -> bool;
}
