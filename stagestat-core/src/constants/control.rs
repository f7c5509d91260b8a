//! Control Loop Constants
//!
//! Limits and defaults for the staged hysteresis control loop.

// ===== STAGE LIMITS =====

/// Largest supported number of output stages.
///
/// The stage state is an 8-bit mask and the capacity `2^stages - 1` must
/// itself fit in that mask without wrapping, so at most 7 stages are
/// addressable.
pub const MAX_STAGE_COUNT: u8 = 7;

// ===== ESCALATION =====

/// Ticks spent below the hysteresis band before the next stage kicks in.
///
/// At one tick per second this engages one extra stage every three minutes
/// while the process stays cold, instead of switching every stage on for a
/// momentary dip.
pub const LOW_VALUE_COUNT_MAX: u32 = 180;

// ===== DEFAULTS =====

/// Setpoint used until the caller configures one.
pub const DEFAULT_SETPOINT: f32 = 60.0;

/// Hysteresis band used until the caller configures one.
///
/// Zero means the output switches on as soon as the value is below the
/// setpoint.
pub const DEFAULT_HYSTERESIS: f32 = 0.0;

/// Minimum value change that forces a status send.
///
/// Zero sends on any change at all.
pub const DEFAULT_VALUE_DIFF: f32 = 0.0;
