//! Threshold Alarm Monitors
//!
//! Two independent monitors watch the process relative to the setpoint:
//!
//! - **Low**: the value fell below `setpoint - level` although every stage the
//!   cap allows is already on. The heater cannot keep up, something is broken.
//! - **High**: the value rose above `setpoint + level`. There is no output
//!   precondition; overshoot is reported whatever the stages are doing.
//!
//! ```text
//!                trigger                    acknowledge
//!  NotActive ------------> ActiveNotSent -------------> ActiveSent
//!      ^                        |                           |
//!      +------- recovery -------+---------- recovery -------+
//! ```
//!
//! Low recovers once the value is back above the setpoint, high once it is
//! back below. A monitor reports pending only in `ActiveNotSent`, so an
//! acknowledged alarm stays quiet until the process recovers and triggers
//! again.
//!
//! After power-up all alarms are held off by [`StartupSuppression`] while the
//! process is still heating up.

use core::fmt;

use crate::constants::FIRST_ALARM_ALLOWED;

/// Which side of the setpoint a monitor watches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AlarmKind {
    /// Value too far below the setpoint at full output
    Low = 0,
    /// Value too far above the setpoint
    High = 1,
}

impl AlarmKind {
    /// Label used in alarm messages
    pub const fn label(&self) -> &'static str {
        match self {
            AlarmKind::Low => "Low",
            AlarmKind::High => "High",
        }
    }
}

impl fmt::Display for AlarmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Alarm state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AlarmPhase {
    /// Condition not present
    #[default]
    NotActive = 0,
    /// Condition present, operator not yet notified
    ActiveNotSent = 1,
    /// Condition present and reported
    ActiveSent = 2,
}

/// One threshold alarm
#[derive(Debug, Clone)]
pub struct AlarmMonitor {
    kind: AlarmKind,
    enabled: bool,
    /// Offset from the setpoint
    level: f32,
    phase: AlarmPhase,
}

impl AlarmMonitor {
    /// Disabled monitor with zero offset
    pub const fn new(kind: AlarmKind) -> Self {
        Self {
            kind,
            enabled: false,
            level: 0.0,
            phase: AlarmPhase::NotActive,
        }
    }

    /// Side this monitor watches
    pub fn kind(&self) -> AlarmKind {
        self.kind
    }

    /// Whether pending alarms are reported
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Offset from the setpoint
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Current phase, tracked even while disabled
    pub fn phase(&self) -> AlarmPhase {
        self.phase
    }

    /// Enable or disable reporting and set the offset. The phase is kept.
    pub fn configure(&mut self, enabled: bool, level: f32) {
        self.enabled = enabled;
        self.level = libm::fabsf(level);
    }

    /// Absolute alarm threshold for a setpoint
    pub fn threshold(&self, setpoint: f32) -> f32 {
        match self.kind {
            AlarmKind::Low => setpoint - self.level,
            AlarmKind::High => setpoint + self.level,
        }
    }

    /// Run one step of the state machine.
    ///
    /// `output_at_max` only matters for the low alarm.
    pub fn evaluate(&mut self, value: f32, setpoint: f32, output_at_max: bool) {
        let next = match self.phase {
            AlarmPhase::NotActive if self.is_triggered(value, setpoint, output_at_max) => {
                AlarmPhase::ActiveNotSent
            }
            AlarmPhase::ActiveNotSent | AlarmPhase::ActiveSent
                if self.is_recovered(value, setpoint) =>
            {
                AlarmPhase::NotActive
            }
            phase => phase,
        };

        if next != self.phase {
            log_info!("{} alarm {:?} -> {:?} at {}", self.kind, self.phase, next, value);
            self.phase = next;
        }
    }

    /// Enabled and waiting to be sent
    pub fn is_pending(&self) -> bool {
        self.enabled && self.phase == AlarmPhase::ActiveNotSent
    }

    /// Mark the alarm as reported. Only moves `ActiveNotSent` forward.
    pub fn acknowledge(&mut self) {
        if self.phase == AlarmPhase::ActiveNotSent {
            self.phase = AlarmPhase::ActiveSent;
        }
    }

    fn is_triggered(&self, value: f32, setpoint: f32, output_at_max: bool) -> bool {
        match self.kind {
            AlarmKind::Low => value < self.threshold(setpoint) && output_at_max,
            AlarmKind::High => value > self.threshold(setpoint),
        }
    }

    fn is_recovered(&self, value: f32, setpoint: f32) -> bool {
        match self.kind {
            AlarmKind::Low => value > setpoint,
            AlarmKind::High => value < setpoint,
        }
    }
}

/// Holds alarms off for a number of ticks after start
#[derive(Debug, Clone)]
pub struct StartupSuppression {
    remaining: u32,
}

impl Default for StartupSuppression {
    fn default() -> Self {
        Self::new(FIRST_ALARM_ALLOWED)
    }
}

impl StartupSuppression {
    /// Suppress for `ticks` ticks; tick number `ticks` is the first allowed
    pub const fn new(ticks: u32) -> Self {
        Self { remaining: ticks }
    }

    /// Ticks left in the window
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Count one tick and report whether alarms may run on it
    pub fn allow(&mut self) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
        }
        self.remaining == 0
    }
}
