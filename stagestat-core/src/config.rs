//! Thermostat configuration
//!
//! Everything a deployment tunes, in one serde-friendly struct. Applications
//! typically deserialize it from their settings store and hand it to
//! [`Thermostat::from_config`](crate::Thermostat::from_config).
//!
//! ```rust
//! use stagestat_core::{AlarmConfig, StageEncoding, Thermostat, ThermostatConfig};
//!
//! let config = ThermostatConfig {
//!     stages: 3,
//!     encoding: StageEncoding::BinaryCount,
//!     setpoint: 55.0,
//!     hysteresis: 2.0,
//!     low_alarm: AlarmConfig::enabled(15.0),
//!     ..ThermostatConfig::default()
//! };
//!
//! let thermostat = Thermostat::from_config(&config)?;
//! assert_eq!(thermostat.setpoint(), 55.0);
//! # Ok::<(), stagestat_core::ControlError>(())
//! ```

use crate::{
    constants::{
        ALWAYS_SEND_CNT, DEFAULT_DELAY_OFF_TICKS, DEFAULT_HYSTERESIS, DEFAULT_SETPOINT,
        DEFAULT_VALUE_DIFF, FIRST_ALARM_ALLOWED, LOW_VALUE_COUNT_MAX,
    },
    stages::StageEncoding,
};

/// One alarm side
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlarmConfig {
    /// Report this alarm
    pub enabled: bool,
    /// Offset from the setpoint
    pub level: f32,
}

impl AlarmConfig {
    /// Enabled alarm at `level` from the setpoint
    pub const fn enabled(level: f32) -> Self {
        Self { enabled: true, level }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThermostatConfig {
    /// Number of output stages, at most 7
    pub stages: u8,
    /// How levels map to stage bits
    pub encoding: StageEncoding,
    /// Output cap; `None` means full capacity
    pub max_output: Option<u8>,

    /// Target value
    pub setpoint: f32,
    /// Band below the setpoint
    pub hysteresis: f32,
    /// Ticks below the band between escalations
    pub escalation_ticks: u32,
    /// Extra ticks to hold the output after reaching the setpoint
    pub delay_off_ticks: u32,

    /// Value change that forces a status send
    pub value_diff: f32,
    /// Heartbeat period in ticks
    pub send_timeout_ticks: u32,

    /// Ticks after start before alarms may fire
    pub startup_suppress_ticks: u32,
    /// Low alarm
    pub low_alarm: AlarmConfig,
    /// High alarm
    pub high_alarm: AlarmConfig,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            stages: 1,
            encoding: StageEncoding::Linear,
            max_output: None,
            setpoint: DEFAULT_SETPOINT,
            hysteresis: DEFAULT_HYSTERESIS,
            escalation_ticks: LOW_VALUE_COUNT_MAX,
            delay_off_ticks: DEFAULT_DELAY_OFF_TICKS,
            value_diff: DEFAULT_VALUE_DIFF,
            send_timeout_ticks: ALWAYS_SEND_CNT,
            startup_suppress_ticks: FIRST_ALARM_ALLOWED,
            low_alarm: AlarmConfig::default(),
            high_alarm: AlarmConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = ThermostatConfig::default();

        assert_eq!(config.setpoint, 60.0);
        assert_eq!(config.escalation_ticks, 180);
        assert_eq!(config.send_timeout_ticks, 1200);
        assert_eq!(config.startup_suppress_ticks, 600);
        assert!(!config.low_alarm.enabled);
        assert!(!config.high_alarm.enabled);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_uses_defaults() {
        let json = r#"{
            "stages": 3,
            "encoding": "BinaryCount",
            "setpoint": 45.5,
            "high_alarm": { "enabled": true, "level": 8.0 }
        }"#;

        let config: ThermostatConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.stages, 3);
        assert_eq!(config.encoding, StageEncoding::BinaryCount);
        assert_eq!(config.setpoint, 45.5);
        assert_eq!(config.high_alarm, AlarmConfig::enabled(8.0));
        assert_eq!(config.send_timeout_ticks, ALWAYS_SEND_CNT);
        assert_eq!(config.max_output, None);
    }
}
