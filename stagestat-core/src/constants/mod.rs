//! Constants for StageStat Core
//!
//! Every tunable the controller ships with is defined here, with the reason
//! for its value. The controller is tick driven, so all durations are counted
//! in ticks of the caller's sampling loop (typically one tick per second).
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Control**: stage limits, escalation cadence and default setpoint
//! - **Time**: send heartbeat and startup suppression windows
//! - **Buffers**: message buffer sizes
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Durations are in ticks, name them with a `_TICKS` or `_CNT` suffix
//! 3. Group related constants together

/// Stage limits, escalation cadence and control defaults.
pub mod control;

/// Tick windows for send heartbeats and alarm suppression.
pub mod time;

/// Message buffer sizes.
pub mod buffers;

// Re-export commonly used constants for convenience
pub use control::{
    LOW_VALUE_COUNT_MAX, MAX_STAGE_COUNT, DEFAULT_SETPOINT, DEFAULT_HYSTERESIS,
    DEFAULT_VALUE_DIFF,
};

pub use time::{ALWAYS_SEND_CNT, FIRST_ALARM_ALLOWED, DEFAULT_DELAY_OFF_TICKS};

pub use buffers::OUT_STRING_MAX_SIZE;
