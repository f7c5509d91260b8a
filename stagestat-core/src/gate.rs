//! Transmission Gate
//!
//! Decides once per tick whether the status is worth sending. A send is
//! recommended when any of these hold, checked in order:
//!
//! 1. the heartbeat countdown has run out
//! 2. the value moved more than the diff threshold since the last send
//! 3. the setpoint changed since the last send
//! 4. the stage mask changed since the last send
//!
//! Baselines only move on [`TransmissionGate::acknowledge`], which the caller
//! issues after the message actually left the device. A lost message is
//! therefore retried on the next tick.

use crate::constants::{ALWAYS_SEND_CNT, DEFAULT_VALUE_DIFF};

/// Send-throttling state
#[derive(Debug, Clone)]
pub struct TransmissionGate {
    diff_threshold: f32,
    timeout_ticks: u32,

    /// Counts down every tick; zero or below forces a send
    countdown: i32,

    last_value: f32,
    last_setpoint: f32,
    last_output: u8,
}

impl Default for TransmissionGate {
    fn default() -> Self {
        Self {
            diff_threshold: DEFAULT_VALUE_DIFF,
            timeout_ticks: ALWAYS_SEND_CNT,
            // Nothing sent yet, so the first tick always sends
            countdown: 0,
            last_value: 0.0,
            last_setpoint: 0.0,
            last_output: 0,
        }
    }
}

impl TransmissionGate {
    /// Gate with default threshold and heartbeat
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimum value change that forces a send
    pub fn diff_threshold(&self) -> f32 {
        self.diff_threshold
    }

    /// Heartbeat period in ticks
    pub fn timeout_ticks(&self) -> u32 {
        self.timeout_ticks
    }

    /// Ticks left before the heartbeat forces a send (may be negative)
    pub fn countdown(&self) -> i32 {
        self.countdown
    }

    /// Last acknowledged value
    pub fn last_value(&self) -> f32 {
        self.last_value
    }

    /// Last acknowledged setpoint
    pub fn last_setpoint(&self) -> f32 {
        self.last_setpoint
    }

    /// Last acknowledged stage mask
    pub fn last_output(&self) -> u8 {
        self.last_output
    }

    /// Set the value change that forces a send
    pub fn set_diff_threshold(&mut self, threshold: f32) {
        self.diff_threshold = libm::fabsf(threshold);
    }

    /// Set the heartbeat period. Zero is treated as one. Applies from the next
    /// acknowledgment.
    pub fn set_timeout_ticks(&mut self, ticks: u32) {
        self.timeout_ticks = ticks.max(1);
    }

    /// Evaluate the current state and count down the heartbeat
    pub fn evaluate(&mut self, value: f32, setpoint: f32, output: u8) -> bool {
        let send = self.countdown <= 0
            || libm::fabsf(value - self.last_value) > self.diff_threshold
            || setpoint != self.last_setpoint
            || output != self.last_output;

        self.countdown = self.countdown.saturating_sub(1);
        send
    }

    /// Commit the sent state as the new baseline and restart the heartbeat
    pub fn acknowledge(&mut self, value: f32, setpoint: f32, output: u8) {
        self.last_value = value;
        self.last_setpoint = setpoint;
        self.last_output = output;
        self.countdown = i32::try_from(self.timeout_ticks).unwrap_or(i32::MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acknowledged(value: f32, setpoint: f32, output: u8) -> TransmissionGate {
        let mut gate = TransmissionGate::new();
        gate.acknowledge(value, setpoint, output);
        gate
    }

    #[test]
    fn first_tick_always_sends() {
        let mut gate = TransmissionGate::new();
        assert!(gate.evaluate(0.0, 0.0, 0));
    }

    #[test]
    fn diff_measured_from_last_sent_value() {
        let mut gate = acknowledged(60.0, 50.0, 0);
        gate.set_diff_threshold(1.0);

        assert!(!gate.evaluate(59.5, 50.0, 0));
        assert!(gate.evaluate(58.5, 50.0, 0));
    }

    #[test]
    fn diff_equal_to_threshold_does_not_send() {
        let mut gate = acknowledged(20.0, 50.0, 0);
        gate.set_diff_threshold(0.5);

        assert!(!gate.evaluate(20.5, 50.0, 0));
    }

    #[test]
    fn setpoint_or_output_change_sends() {
        let mut gate = acknowledged(20.0, 50.0, 1);

        assert!(gate.evaluate(20.0, 51.0, 1));
        assert!(gate.evaluate(20.0, 50.0, 3));
        assert!(!gate.evaluate(20.0, 50.0, 1));
    }

    #[test]
    fn heartbeat_after_timeout() {
        let mut gate = TransmissionGate::new();
        gate.set_timeout_ticks(5);
        gate.acknowledge(20.0, 50.0, 0);

        for _ in 0..5 {
            assert!(!gate.evaluate(20.0, 50.0, 0));
        }
        assert!(gate.evaluate(20.0, 50.0, 0));
        // Stays forced until acknowledged
        assert!(gate.evaluate(20.0, 50.0, 0));

        gate.acknowledge(20.0, 50.0, 0);
        assert!(!gate.evaluate(20.0, 50.0, 0));
    }

    #[test]
    fn countdown_saturates() {
        let mut gate = TransmissionGate::new();
        gate.countdown = i32::MIN + 1;

        assert!(gate.evaluate(0.0, 0.0, 0));
        assert!(gate.evaluate(0.0, 0.0, 0));
        assert_eq!(gate.countdown(), i32::MIN);
    }
}
