//! Stage Encoder
//!
//! ## Overview
//!
//! A staged thermostat drives N independent outputs (relays, heater
//! elements). Their state is an 8-bit mask where bit *i* set means stage *i*
//! is on. The control loop never manipulates bits directly; it only asks the
//! encoder for the next power level and whether the top level is reached.
//!
//! ## Encoding Policies
//!
//! ```text
//! 3 stages     Linear        BinaryCount
//! level 0      000           000
//! level 1      001           001
//! level 2      011           010
//! level 3      111           011
//! level 4       -            100
//!  ...                       ...
//! level 7       -            111
//! ```
//!
//! - **Linear**: each level switches on one more identical stage. The output
//!   percentage is the share of contiguous low stages that are on.
//! - **BinaryCount**: stages are weighted 1, 2, 4, ... (e.g. 1 kW, 2 kW,
//!   4 kW elements) and the mask counts up. The percentage is the mask
//!   relative to the output cap.
//!
//! ## Output Cap
//!
//! `max_output` limits the mask below the stage capacity `2^stages - 1`, for
//! installations where the supply cannot carry every element at once. The
//! encoder refuses to produce a level above the cap, so the invariant
//! `mask <= max_output <= capacity` holds for every mask it hands out.

use crate::{
    constants::MAX_STAGE_COUNT,
    errors::{ControlError, ControlResult},
};

/// How power levels map onto stage bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum StageEncoding {
    /// 001, 011, 111: one more stage per level
    Linear = 0,
    /// 001, 010, 011, ...: mask counts up in binary
    BinaryCount = 1,
}

/// Maps power levels to stage masks under one encoding policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageEncoder {
    stages: u8,
    encoding: StageEncoding,
    max_output: u8,
}

impl StageEncoder {
    /// Create an encoder with the output cap at full capacity.
    ///
    /// Fails for more than [`MAX_STAGE_COUNT`] stages.
    pub fn new(stages: u8, encoding: StageEncoding) -> ControlResult<Self> {
        if stages > MAX_STAGE_COUNT {
            return Err(ControlError::StageCountUnsupported {
                requested: stages,
                max: MAX_STAGE_COUNT,
            });
        }

        Ok(Self {
            stages,
            encoding,
            max_output: Self::capacity_for(stages),
        })
    }

    /// Largest mask `stages` bits can hold. Counts above
    /// [`MAX_STAGE_COUNT`] saturate at the capacity of that many stages.
    pub const fn capacity_for(stages: u8) -> u8 {
        let stages = if stages > MAX_STAGE_COUNT {
            MAX_STAGE_COUNT
        } else {
            stages
        };
        ((1u16 << stages) - 1) as u8
    }

    /// Number of addressable stages
    pub const fn stage_count(&self) -> u8 {
        self.stages
    }

    /// Active encoding policy
    pub const fn encoding(&self) -> StageEncoding {
        self.encoding
    }

    /// Current output cap
    pub const fn max_output(&self) -> u8 {
        self.max_output
    }

    /// `2^stages - 1`
    pub const fn capacity(&self) -> u8 {
        Self::capacity_for(self.stages)
    }

    /// Limit the mask to `max`. Fails if `max` exceeds the stage capacity.
    pub fn set_max_output(&mut self, max: u8) -> ControlResult<()> {
        let capacity = self.capacity();
        if max > capacity {
            return Err(ControlError::MaxOutputOutOfRange {
                requested: max,
                capacity,
            });
        }

        self.max_output = max;
        Ok(())
    }

    /// Mask one level above `mask`, or `mask` itself when no higher level
    /// fits under the cap.
    pub fn next_level(&self, mask: u8) -> u8 {
        if mask >= self.max_output {
            return mask;
        }

        let next = match self.encoding {
            StageEncoding::Linear => (mask << 1) | 1,
            StageEncoding::BinaryCount => mask + 1,
        };

        // A Linear cap like 0b101 is not itself a level; stop at 0b011.
        if next > self.max_output {
            mask
        } else {
            next
        }
    }

    /// True when [`next_level`](Self::next_level) cannot go any higher
    pub fn is_at_max(&self, mask: u8) -> bool {
        self.next_level(mask) == mask
    }

    /// Highest level at or below the cap, reached by stepping `mask` down.
    ///
    /// Used when the cap is lowered under a running output.
    pub fn clamp(&self, mask: u8) -> u8 {
        if mask <= self.max_output {
            return mask;
        }

        match self.encoding {
            StageEncoding::Linear => {
                let mut clamped = mask;
                while clamped > self.max_output {
                    clamped >>= 1;
                }
                clamped
            }
            StageEncoding::BinaryCount => self.max_output,
        }
    }

    /// Output power in percent, truncated toward zero.
    ///
    /// A mask above the cap is reported as its [`clamp`](Self::clamp)ed level.
    pub fn percent(&self, mask: u8) -> u8 {
        let mask = self.clamp(mask);
        match self.encoding {
            StageEncoding::Linear => {
                if self.stages == 0 {
                    return 0;
                }
                let steps = mask.trailing_ones() as u16;
                ((steps * 100) / self.stages as u16) as u8
            }
            StageEncoding::BinaryCount => {
                if self.max_output == 0 {
                    return 0;
                }
                ((mask as u16 * 100) / self.max_output as u16) as u8
            }
        }
    }

    /// Whether `stage` is on in `mask`. Stages past the count are never on.
    pub fn is_stage_active(&self, mask: u8, stage: u8) -> bool {
        if stage >= self.stages {
            return false;
        }
        mask & (1 << stage) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_levels_fill_from_bit_zero() {
        let encoder = StageEncoder::new(3, StageEncoding::Linear).unwrap();

        assert_eq!(encoder.next_level(0b000), 0b001);
        assert_eq!(encoder.next_level(0b001), 0b011);
        assert_eq!(encoder.next_level(0b011), 0b111);
        // Already at capacity
        assert_eq!(encoder.next_level(0b111), 0b111);
        assert!(encoder.is_at_max(0b111));
        assert!(!encoder.is_at_max(0b011));
    }

    #[test]
    fn binary_levels_count_up() {
        let encoder = StageEncoder::new(3, StageEncoding::BinaryCount).unwrap();

        let mut mask = 0;
        for expected in 1..=7 {
            mask = encoder.next_level(mask);
            assert_eq!(mask, expected);
        }
        assert!(encoder.is_at_max(mask));
    }

    #[test]
    fn linear_percent_truncates() {
        let encoder = StageEncoder::new(3, StageEncoding::Linear).unwrap();

        assert_eq!(encoder.percent(0b000), 0);
        assert_eq!(encoder.percent(0b001), 33);
        assert_eq!(encoder.percent(0b011), 66);
        assert_eq!(encoder.percent(0b111), 100);
    }

    #[test]
    fn binary_percent_relative_to_cap() {
        let mut encoder = StageEncoder::new(2, StageEncoding::BinaryCount).unwrap();

        assert_eq!(encoder.percent(1), 33);
        assert_eq!(encoder.percent(3), 100);

        encoder.set_max_output(2).unwrap();
        assert_eq!(encoder.percent(1), 50);
        assert_eq!(encoder.percent(2), 100);
    }

    #[test]
    fn zero_stages_report_zero_percent() {
        let encoder = StageEncoder::new(0, StageEncoding::Linear).unwrap();
        assert_eq!(encoder.percent(0), 0);
        assert_eq!(encoder.next_level(0), 0);
        assert!(encoder.is_at_max(0));

        let encoder = StageEncoder::new(0, StageEncoding::BinaryCount).unwrap();
        assert_eq!(encoder.percent(0), 0);
    }

    #[test]
    fn max_output_rejects_values_above_capacity() {
        let mut encoder = StageEncoder::new(3, StageEncoding::BinaryCount).unwrap();

        assert_eq!(
            encoder.set_max_output(8),
            Err(ControlError::MaxOutputOutOfRange { requested: 8, capacity: 7 })
        );
        assert_eq!(encoder.max_output(), 7);

        assert!(encoder.set_max_output(5).is_ok());
        assert_eq!(encoder.next_level(4), 5);
        assert_eq!(encoder.next_level(5), 5);
    }

    #[test]
    fn linear_cap_that_is_not_a_level() {
        let mut encoder = StageEncoder::new(3, StageEncoding::Linear).unwrap();
        encoder.set_max_output(0b101).unwrap();

        assert_eq!(encoder.next_level(0b001), 0b011);
        // 0b111 would exceed the cap
        assert_eq!(encoder.next_level(0b011), 0b011);
        assert!(encoder.is_at_max(0b011));
    }

    #[test]
    fn clamp_steps_down_to_cap() {
        let mut linear = StageEncoder::new(3, StageEncoding::Linear).unwrap();
        linear.set_max_output(0b011).unwrap();
        assert_eq!(linear.clamp(0b111), 0b011);
        assert_eq!(linear.clamp(0b001), 0b001);

        let mut binary = StageEncoder::new(3, StageEncoding::BinaryCount).unwrap();
        binary.set_max_output(4).unwrap();
        assert_eq!(binary.clamp(6), 4);
    }

    #[test]
    fn stage_query_outside_count_is_inactive() {
        let encoder = StageEncoder::new(3, StageEncoding::Linear).unwrap();

        assert!(encoder.is_stage_active(0b100, 2));
        assert!(!encoder.is_stage_active(0b100, 1));
        assert!(!encoder.is_stage_active(0xFF, 3));
        assert!(!encoder.is_stage_active(0xFF, 200));
    }

    #[test]
    fn too_many_stages() {
        assert_eq!(
            StageEncoder::new(8, StageEncoding::Linear),
            Err(ControlError::StageCountUnsupported { requested: 8, max: 7 })
        );
        assert!(StageEncoder::new(7, StageEncoding::BinaryCount).is_ok());
    }

    #[test]
    fn capacity_saturates_past_stage_limit() {
        assert_eq!(StageEncoder::capacity_for(0), 0);
        assert_eq!(StageEncoder::capacity_for(3), 0b111);
        assert_eq!(StageEncoder::capacity_for(MAX_STAGE_COUNT), 0x7F);
        assert_eq!(StageEncoder::capacity_for(16), 0x7F);
        assert_eq!(StageEncoder::capacity_for(u8::MAX), 0x7F);
    }

    #[test]
    fn percent_of_mask_above_cap_stays_in_range() {
        let mut binary = StageEncoder::new(3, StageEncoding::BinaryCount).unwrap();
        binary.set_max_output(1).unwrap();
        assert_eq!(binary.percent(7), 100);
        assert_eq!(binary.percent(0xFF), 100);

        let mut linear = StageEncoder::new(3, StageEncoding::Linear).unwrap();
        assert_eq!(linear.percent(0xFF), 100);
        linear.set_max_output(0b001).unwrap();
        assert_eq!(linear.percent(0b111), 33);
    }
}
