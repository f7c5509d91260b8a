//! Error Types for Thermostat Configuration and Message Building
//!
//! ## Design Philosophy
//!
//! The control loop itself never fails: every tick is a total function of the
//! current state and one new measurement. Errors only come from the edges of
//! the API, where a caller hands in something the controller cannot honor:
//!
//! 1. **Small Size**: Each variant carries a couple of integers at most, so
//!    errors are cheap to return from setters called inside a control task.
//!
//! 2. **No Heap Allocation**: All error data is inline. The core builds on
//!    bare-metal targets without an allocator.
//!
//! 3. **Copy Semantics**: Errors implement Copy so they can be logged and
//!    returned without ownership juggling.
//!
//! 4. **State Unchanged**: An operation that returns `Err` leaves the
//!    controller exactly as it was.
//!
//! ## Error Categories
//!
//! ### Configuration
//! - `StageCountUnsupported`: more stages than the output mask can represent
//! - `MaxOutputOutOfRange`: output cap above the stage capacity
//! - `StageOutOfRange`: manual stage write to a stage that does not exist
//!
//! ### Message Building
//! - `BufferTooSmall`: the caller's buffer cannot hold the whole message.
//!   Truncated messages are never produced.
//!
//! ## Example
//!
//! ```rust
//! use stagestat_core::{ControlError, StageEncoding, Thermostat};
//!
//! let mut thermostat = Thermostat::new(3, StageEncoding::Linear)?;
//! match thermostat.set_max_output(9) {
//!     Ok(()) => {}
//!     Err(ControlError::MaxOutputOutOfRange { capacity, .. }) => {
//!         // Three stages can never exceed 0b111
//!         assert_eq!(capacity, 7);
//!     }
//!     Err(_) => unreachable!(),
//! }
//! # Ok::<(), ControlError>(())
//! ```

use thiserror_no_std::Error;

/// Result type for controller operations
pub type ControlResult<T> = Result<T, ControlError>;

/// Controller errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// Stage count does not fit the output mask
    #[error("Stage count {requested} unsupported, at most {max} stages")]
    StageCountUnsupported {
        /// Stage count the caller asked for
        requested: u8,
        /// Largest supported stage count
        max: u8,
    },

    /// Output cap larger than the stages can represent
    #[error("Max output {requested} exceeds stage capacity {capacity}")]
    MaxOutputOutOfRange {
        /// Cap the caller asked for
        requested: u8,
        /// `2^stages - 1` for the configured stage count
        capacity: u8,
    },

    /// Stage index outside `0..stages`
    #[error("Stage {stage} out of range, thermostat has {stages} stages")]
    StageOutOfRange {
        /// Requested stage index
        stage: u8,
        /// Configured stage count
        stages: u8,
    },

    /// Message did not fit in the caller's buffer
    #[error("Message does not fit in {capacity} bytes")]
    BufferTooSmall {
        /// Capacity of the buffer that was offered
        capacity: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for ControlError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::StageCountUnsupported { requested, max } =>
                defmt::write!(fmt, "Stage count {} unsupported (max {})", requested, max),
            Self::MaxOutputOutOfRange { requested, capacity } =>
                defmt::write!(fmt, "Max output {} exceeds {}", requested, capacity),
            Self::StageOutOfRange { stage, stages } =>
                defmt::write!(fmt, "Stage {} out of range ({})", stage, stages),
            Self::BufferTooSmall { capacity } =>
                defmt::write!(fmt, "Buffer too small ({})", capacity),
        }
    }
}
