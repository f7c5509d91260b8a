//! Staged Thermostat Controller
//!
//! ## Overview
//!
//! [`Thermostat`] composes the control pieces into one tick-driven
//! controller. The caller owns the loop:
//!
//! ```text
//!  measurement --> tick() --> HysteresisEngine --> stage mask
//!                     |                               |
//!                     +--> TransmissionGate <---------+--> send recommended?
//!                     |
//!                     +--> StartupSuppression --> AlarmMonitor (low, high)
//!
//!  after a successful publish:  acknowledge_sent()
//!                               acknowledge_low_alarm_sent()
//!                               acknowledge_high_alarm_sent()
//! ```
//!
//! Every tick runs to completion without I/O or allocation. The controller
//! is not internally synchronized; drive it from one task, or wrap it in a
//! mutex when several tasks need it.
//!
//! ## Example
//!
//! ```rust
//! use heapless::String;
//! use stagestat_core::{StageEncoding, Thermostat};
//!
//! let mut thermostat = Thermostat::new(3, StageEncoding::Linear)?;
//! thermostat.set_setpoint(50.0, 2.0);
//!
//! if thermostat.tick(40.0) {
//!     let mut line: String<64> = String::new();
//!     thermostat.format_status(&mut line)?;
//!     assert_eq!(line.as_str(), "value=40.00 ; setpoint=50.00 ; output=033%");
//!     // publish(line) ...
//!     thermostat.acknowledge_sent();
//! }
//! # Ok::<(), stagestat_core::ControlError>(())
//! ```

use heapless::String;

use crate::{
    alarm::{AlarmKind, AlarmMonitor, AlarmPhase, StartupSuppression},
    config::ThermostatConfig,
    constants::OUT_STRING_MAX_SIZE,
    errors::{ControlError, ControlResult},
    format,
    gate::TransmissionGate,
    hysteresis::HysteresisEngine,
    stages::{StageEncoder, StageEncoding},
};

/// Point-in-time view of the controller
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThermostatStatus {
    /// Last measurement
    pub value: f32,
    /// Target value
    pub setpoint: f32,
    /// Stage mask, bit *i* is stage *i*
    pub output_mask: u8,
    /// Output power in percent
    pub output_percent: u8,
    /// Low alarm phase
    pub low_alarm: AlarmPhase,
    /// High alarm phase
    pub high_alarm: AlarmPhase,
}

/// Multi-stage thermostat with send throttling and threshold alarms
#[derive(Debug, Clone)]
pub struct Thermostat {
    encoder: StageEncoder,
    engine: HysteresisEngine,
    gate: TransmissionGate,
    startup: StartupSuppression,
    low_alarm: AlarmMonitor,
    high_alarm: AlarmMonitor,

    /// Last measurement
    value: f32,
}

impl Thermostat {
    /// Controller with default tunables, output off and alarms disabled
    pub fn new(stages: u8, encoding: StageEncoding) -> ControlResult<Self> {
        Ok(Self {
            encoder: StageEncoder::new(stages, encoding)?,
            engine: HysteresisEngine::new(),
            gate: TransmissionGate::new(),
            startup: StartupSuppression::default(),
            low_alarm: AlarmMonitor::new(AlarmKind::Low),
            high_alarm: AlarmMonitor::new(AlarmKind::High),
            value: 0.0,
        })
    }

    /// Build a controller from a complete configuration
    pub fn from_config(config: &ThermostatConfig) -> ControlResult<Self> {
        let mut thermostat = Self::new(config.stages, config.encoding)?;

        if let Some(max) = config.max_output {
            thermostat.set_max_output(max)?;
        }
        thermostat.set_setpoint(config.setpoint, config.hysteresis);
        thermostat.engine.set_escalation_ticks(config.escalation_ticks);
        thermostat.set_delay_off(config.delay_off_ticks);
        thermostat.set_value_diff(config.value_diff);
        thermostat.set_send_timeout(config.send_timeout_ticks);
        thermostat.startup = StartupSuppression::new(config.startup_suppress_ticks);
        thermostat.set_alarm_levels(
            config.low_alarm.enabled,
            config.low_alarm.level,
            config.high_alarm.enabled,
            config.high_alarm.level,
        );

        Ok(thermostat)
    }

    // ===== PER-TICK ENTRY POINT =====

    /// Advance one tick with a new measurement.
    ///
    /// Updates the stages, steps the alarm monitors and returns whether a
    /// status send is recommended.
    pub fn tick(&mut self, value: f32) -> bool {
        self.value = value;

        let output = self.engine.update(value, &self.encoder);
        let setpoint = self.engine.setpoint();
        let send = self.gate.evaluate(value, setpoint, output);

        if self.startup.allow() {
            let at_max = self.encoder.is_at_max(output);
            self.low_alarm.evaluate(value, setpoint, at_max);
            self.high_alarm.evaluate(value, setpoint, at_max);
        }

        send
    }

    // ===== CONFIGURATION =====

    /// Set the target and the band below it
    pub fn set_setpoint(&mut self, setpoint: f32, hysteresis: f32) {
        self.engine.set_setpoint(setpoint, hysteresis);
    }

    /// Value change that forces a status send
    pub fn set_value_diff(&mut self, diff: f32) {
        self.gate.set_diff_threshold(diff);
    }

    /// Heartbeat period in ticks
    pub fn set_send_timeout(&mut self, ticks: u32) {
        self.gate.set_timeout_ticks(ticks);
    }

    /// Ticks below the band between escalations
    pub fn set_escalation_ticks(&mut self, ticks: u32) {
        self.engine.set_escalation_ticks(ticks);
    }

    /// Hold the output this many extra ticks after reaching the setpoint
    pub fn set_delay_off(&mut self, ticks: u32) {
        self.engine.set_delay_off(ticks);
    }

    /// Restart the startup alarm suppression window
    pub fn set_startup_suppression(&mut self, ticks: u32) {
        self.startup = StartupSuppression::new(ticks);
    }

    /// Configure both alarms. Alarm phases are kept.
    pub fn set_alarm_levels(
        &mut self,
        low_enabled: bool,
        low_level: f32,
        high_enabled: bool,
        high_level: f32,
    ) {
        self.low_alarm.configure(low_enabled, low_level);
        self.high_alarm.configure(high_enabled, high_level);
    }

    /// Cap the stage mask. A running output above the new cap is stepped
    /// down to the highest level the cap allows.
    pub fn set_max_output(&mut self, max: u8) -> ControlResult<()> {
        if let Err(err) = self.encoder.set_max_output(max) {
            log_warn!("rejected max output: {}", err);
            return Err(err);
        }

        let clamped = self.encoder.clamp(self.engine.output());
        self.engine.force_output(clamped);
        Ok(())
    }

    /// Switch one stage by hand, for commissioning and diagnostics.
    ///
    /// The next tick applies the control law to the resulting mask.
    pub fn force_stage(&mut self, stage: u8, on: bool) -> ControlResult<()> {
        let stages = self.encoder.stage_count();
        if stage >= stages {
            return Err(ControlError::StageOutOfRange { stage, stages });
        }

        let bit = 1u8 << stage;
        let mask = if on {
            self.engine.output() | bit
        } else {
            self.engine.output() & !bit
        };

        if mask > self.encoder.max_output() {
            return Err(ControlError::MaxOutputOutOfRange {
                requested: mask,
                capacity: self.encoder.max_output(),
            });
        }

        self.engine.force_output(mask);
        Ok(())
    }

    // ===== QUERIES =====

    /// Number of output stages
    pub fn stage_count(&self) -> u8 {
        self.encoder.stage_count()
    }

    /// Whether `stage` is on; `false` for stages past the count
    pub fn is_stage_active(&self, stage: u8) -> bool {
        self.encoder.is_stage_active(self.engine.output(), stage)
    }

    /// Stage mask
    pub fn output_mask(&self) -> u8 {
        self.engine.output()
    }

    /// Output power in percent
    pub fn output_percent(&self) -> u8 {
        self.encoder.percent(self.engine.output())
    }

    /// Last measurement
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Target value
    pub fn setpoint(&self) -> f32 {
        self.engine.setpoint()
    }

    /// Band below the setpoint
    pub fn hysteresis(&self) -> f32 {
        self.engine.hysteresis()
    }

    /// Stage encoder
    pub fn encoder(&self) -> &StageEncoder {
        &self.encoder
    }

    /// Control law state
    pub fn engine(&self) -> &HysteresisEngine {
        &self.engine
    }

    /// Send-throttling state
    pub fn gate(&self) -> &TransmissionGate {
        &self.gate
    }

    /// Snapshot for structured telemetry
    pub fn status(&self) -> ThermostatStatus {
        ThermostatStatus {
            value: self.value,
            setpoint: self.setpoint(),
            output_mask: self.output_mask(),
            output_percent: self.output_percent(),
            low_alarm: self.low_alarm.phase(),
            high_alarm: self.high_alarm.phase(),
        }
    }

    // ===== STATUS MESSAGES =====

    /// Write `value=<v> ; setpoint=<s> ; output=<p>%` into `out`
    pub fn format_status<const N: usize>(&self, out: &mut String<N>) -> ControlResult<()> {
        format::write_status(out, self.value, self.setpoint(), self.output_percent())
    }

    /// Status line in a default-sized buffer
    pub fn status_message(&self) -> ControlResult<String<OUT_STRING_MAX_SIZE>> {
        let mut out = String::new();
        self.format_status(&mut out)?;
        Ok(out)
    }

    /// Record that the current state reached the collector
    pub fn acknowledge_sent(&mut self) {
        self.gate
            .acknowledge(self.value, self.setpoint(), self.engine.output());
    }

    // ===== ALARMS =====

    /// Low alarm enabled and waiting to be sent
    pub fn low_alarm_pending(&self) -> bool {
        self.low_alarm.is_pending()
    }

    /// High alarm enabled and waiting to be sent
    pub fn high_alarm_pending(&self) -> bool {
        self.high_alarm.is_pending()
    }

    /// Low alarm state machine phase
    pub fn low_alarm_phase(&self) -> AlarmPhase {
        self.low_alarm.phase()
    }

    /// High alarm state machine phase
    pub fn high_alarm_phase(&self) -> AlarmPhase {
        self.high_alarm.phase()
    }

    /// Ticks left before alarms may fire
    pub fn startup_remaining(&self) -> u32 {
        self.startup.remaining()
    }

    /// Write the low alarm text into `out`
    pub fn format_low_alarm<const N: usize>(&self, out: &mut String<N>) -> ControlResult<()> {
        self.format_alarm(&self.low_alarm, out)
    }

    /// Write the high alarm text into `out`
    pub fn format_high_alarm<const N: usize>(&self, out: &mut String<N>) -> ControlResult<()> {
        self.format_alarm(&self.high_alarm, out)
    }

    /// Alarm text for one side in a default-sized buffer
    pub fn alarm_message(&self, kind: AlarmKind) -> ControlResult<String<OUT_STRING_MAX_SIZE>> {
        let mut out = String::new();
        match kind {
            AlarmKind::Low => self.format_low_alarm(&mut out)?,
            AlarmKind::High => self.format_high_alarm(&mut out)?,
        }
        Ok(out)
    }

    /// Low alarm reached the operator
    pub fn acknowledge_low_alarm_sent(&mut self) {
        self.low_alarm.acknowledge();
    }

    /// High alarm reached the operator
    pub fn acknowledge_high_alarm_sent(&mut self) {
        self.high_alarm.acknowledge();
    }

    fn format_alarm<const N: usize>(
        &self,
        monitor: &AlarmMonitor,
        out: &mut String<N>,
    ) -> ControlResult<()> {
        let setpoint = self.setpoint();
        format::write_alarm(
            out,
            monitor.kind(),
            self.value,
            monitor.threshold(setpoint),
            setpoint,
            self.output_percent(),
        )
    }
}
