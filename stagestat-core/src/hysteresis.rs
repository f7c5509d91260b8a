//! Hysteresis Engine
//!
//! The per-tick control law. Output is **Off** when the stage mask is zero
//! and **On** otherwise.
//!
//! ```text
//!  value
//!    ^
//!    |            shut off (after delay-off ticks)
//!    |  setpoint ------------------------------------
//!    |            deadband: hold current stages
//!    |  setpoint - hysteresis -----------------------
//!    |            below band: switch on, then one more
//!    |            stage every `escalation_ticks` ticks
//!    +------------------------------------------------> ticks
//! ```
//!
//! The deadband keeps relays from chattering around the setpoint. Slow
//! escalation means a short dip only costs one stage, while a process that
//! stays cold gradually gets full power.

use crate::{
    constants::{DEFAULT_DELAY_OFF_TICKS, DEFAULT_HYSTERESIS, DEFAULT_SETPOINT, LOW_VALUE_COUNT_MAX},
    stages::StageEncoder,
};

/// Staged on/off control with a hysteresis band and delayed shutoff
#[derive(Debug, Clone)]
pub struct HysteresisEngine {
    setpoint: f32,
    hysteresis: f32,

    /// Current stage mask
    output: u8,

    /// Ticks spent below the band since the last escalation
    low_value_count: u32,
    escalation_ticks: u32,

    delay_off_ticks: u32,
    delay_off_remaining: u32,
}

impl Default for HysteresisEngine {
    fn default() -> Self {
        Self {
            setpoint: DEFAULT_SETPOINT,
            hysteresis: DEFAULT_HYSTERESIS,
            output: 0,
            low_value_count: 0,
            escalation_ticks: LOW_VALUE_COUNT_MAX,
            delay_off_ticks: DEFAULT_DELAY_OFF_TICKS,
            delay_off_remaining: DEFAULT_DELAY_OFF_TICKS,
        }
    }
}

impl HysteresisEngine {
    /// Engine with default setpoint and everything off
    pub fn new() -> Self {
        Self::default()
    }

    /// Target value
    pub fn setpoint(&self) -> f32 {
        self.setpoint
    }

    /// Width of the band below the setpoint
    pub fn hysteresis(&self) -> f32 {
        self.hysteresis
    }

    /// Current stage mask
    pub fn output(&self) -> u8 {
        self.output
    }

    /// True while any stage is on
    pub fn is_on(&self) -> bool {
        self.output != 0
    }

    /// Ticks counted below the band toward the next escalation
    pub fn low_value_count(&self) -> u32 {
        self.low_value_count
    }

    /// Ticks left before a pending shutoff happens
    pub fn delay_off_remaining(&self) -> u32 {
        self.delay_off_remaining
    }

    /// Configured delay-off window
    pub fn delay_off_ticks(&self) -> u32 {
        self.delay_off_ticks
    }

    /// Configured escalation cadence
    pub fn escalation_ticks(&self) -> u32 {
        self.escalation_ticks
    }

    /// Change the control band. Runtime counters are kept.
    pub fn set_setpoint(&mut self, setpoint: f32, hysteresis: f32) {
        self.setpoint = setpoint;
        self.hysteresis = libm::fabsf(hysteresis);
    }

    /// Hold the output this many extra ticks once the setpoint is reached
    pub fn set_delay_off(&mut self, ticks: u32) {
        self.delay_off_ticks = ticks;
        self.delay_off_remaining = ticks;
    }

    /// Ticks below the band between escalations. Zero is treated as one.
    pub fn set_escalation_ticks(&mut self, ticks: u32) {
        self.escalation_ticks = ticks.max(1);
    }

    /// Replace the mask, e.g. after the output cap was lowered
    pub(crate) fn force_output(&mut self, mask: u8) {
        self.output = mask;
    }

    /// Advance one tick with a new measurement. Returns the new stage mask.
    ///
    /// A mask left above a lowered encoder cap is clamped down first.
    pub fn update(&mut self, value: f32, encoder: &StageEncoder) -> u8 {
        self.output = encoder.clamp(self.output);
        let low_limit = self.setpoint - self.hysteresis;

        if !self.is_on() {
            if value < low_limit {
                self.escalate(encoder);
                log_debug!("output on at {}, mask {:#05b}", value, self.output);
            }
            return self.output;
        }

        if value < low_limit {
            self.low_value_count = self.low_value_count.saturating_add(1);
            if self.low_value_count >= self.escalation_ticks {
                self.escalate(encoder);
                log_debug!("escalated at {}, mask {:#05b}", value, self.output);
            }
        } else if value < self.setpoint {
            // Deadband: hold
        } else if self.delay_off_remaining > 0 {
            self.delay_off_remaining -= 1;
        } else {
            log_debug!("output off at {}", value);
            self.output = 0;
            self.low_value_count = 0;
            self.delay_off_remaining = self.delay_off_ticks;
        }

        self.output
    }

    fn escalate(&mut self, encoder: &StageEncoder) {
        self.output = encoder.next_level(self.output);
        self.low_value_count = 0;
    }
}
