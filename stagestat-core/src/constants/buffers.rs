//! Buffer Sizes
//!
//! Capacities for the fixed-size message buffers the controller writes into.

/// Default capacity for status and alarm messages.
///
/// The longest message is the alarm text:
/// `"Alarm: High ; value=-1234.56 ; alarm=-1234.56 ; setpoint=-1234.56 ; output=100%"`
/// which is 79 bytes, leaving headroom for larger process values.
pub const OUT_STRING_MAX_SIZE: usize = 100;
