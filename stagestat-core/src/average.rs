//! Sample averaging between control ticks
//!
//! Sensors are often read several times per control tick. `SampleAverage`
//! accumulates those reads and yields one value per tick, dropping the single
//! highest and lowest read once there are at least three so one glitchy
//! conversion does not move the output.

/// Running trimmed mean over one tick's worth of samples
#[derive(Debug, Clone, Copy)]
pub struct SampleAverage {
    sum: f64,
    highest: f32,
    lowest: f32,
    count: u32,
}

impl Default for SampleAverage {
    fn default() -> Self {
        Self {
            sum: 0.0,
            highest: f32::NEG_INFINITY,
            lowest: f32::INFINITY,
            count: 0,
        }
    }
}

impl SampleAverage {
    /// Empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one sample. Non-finite samples are ignored.
    pub fn add(&mut self, sample: f32) {
        if !sample.is_finite() {
            return;
        }
        self.sum += sample as f64;
        self.highest = self.highest.max(sample);
        self.lowest = self.lowest.min(sample);
        self.count += 1;
    }

    /// Samples collected so far
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Mean of the window, trimmed when three or more samples are present
    pub fn value(&self) -> Option<f32> {
        match self.count {
            0 => None,
            1 | 2 => Some((self.sum / self.count as f64) as f32),
            n => {
                let trimmed = self.sum - self.highest as f64 - self.lowest as f64;
                Some((trimmed / (n - 2) as f64) as f32)
            }
        }
    }

    /// Start a new window
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Take the window's value and start a new one
    pub fn take(&mut self) -> Option<f32> {
        let value = self.value();
        self.reset();
        value
    }
}
