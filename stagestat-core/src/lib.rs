//! Control core for staged-output thermostats
//!
//! Decides which of N relay-driven stages should be on, when a status update
//! is worth transmitting, and when the operator must hear about a process
//! that runs too cold or too hot.
//!
//! Key constraints:
//! - Builds without std or an allocator
//! - No heap allocation in the hot path
//! - One synchronous, total call per sampling tick
//!
//! ```no_run
//! use stagestat_core::{StageEncoding, Thermostat};
//!
//! let mut thermostat = Thermostat::new(3, StageEncoding::Linear)?;
//! thermostat.set_setpoint(55.0, 2.0);
//! thermostat.set_alarm_levels(true, 15.0, true, 10.0);
//!
//! loop {
//!     let temperature = 48.5; // read_sensor()
//!     if thermostat.tick(temperature) {
//!         let line = thermostat.status_message()?;
//!         // publish(line) then:
//!         thermostat.acknowledge_sent();
//!     }
//!     if thermostat.low_alarm_pending() {
//!         // publish(thermostat.alarm_message(AlarmKind::Low)?) then:
//!         thermostat.acknowledge_low_alarm_sent();
//!     }
//!     // sleep one tick
//! #   break;
//! }
//! # Ok::<(), stagestat_core::ControlError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod alarm;
pub mod average;
pub mod config;
pub mod constants;
pub mod errors;
pub mod format;
pub mod gate;
pub mod hysteresis;
pub mod stages;
pub mod thermostat;

// Public API
pub use alarm::{AlarmKind, AlarmMonitor, AlarmPhase, StartupSuppression};
pub use average::SampleAverage;
pub use config::{AlarmConfig, ThermostatConfig};
pub use errors::{ControlError, ControlResult};
pub use gate::TransmissionGate;
pub use hysteresis::HysteresisEngine;
pub use stages::{StageEncoder, StageEncoding};
pub use thermostat::{Thermostat, ThermostatStatus};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
