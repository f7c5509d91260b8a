//! Tick Window Constants
//!
//! Durations counted in control ticks. The comments assume the usual one
//! tick per second; scale them if your loop runs at another rate.

// ===== SEND HEARTBEAT =====

/// Always send the status after this many ticks without an acknowledged send.
///
/// 1200 ticks at 1 s per tick gives a heartbeat every 20 minutes even when
/// nothing changes, so the collector can tell a quiet process from a dead
/// controller.
pub const ALWAYS_SEND_CNT: u32 = 1200;

// ===== ALARM SUPPRESSION =====

/// Ticks after power-up before any alarm may fire.
///
/// The controlled process starts cold; ten minutes at 1 s per tick lets it
/// settle before low alarms become meaningful.
pub const FIRST_ALARM_ALLOWED: u32 = 600;

// ===== SHUTOFF =====

/// Extra ticks the output is held on after the setpoint is reached.
///
/// Zero switches off on the first tick at or above the setpoint.
pub const DEFAULT_DELAY_OFF_TICKS: u32 = 0;
