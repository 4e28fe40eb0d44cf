//! Stock batches

/// Quantity acquired at one instant, with its own countdown.
///
/// `remaining` never exceeds `duration`. A batch with a duration of 0 has no
/// timer and is never aged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockBatch {
    count: u32,
    remaining: f32,
    duration: f32,
}

impl StockBatch {
    /// Create a batch with a full timer
    pub fn new(count: u32, duration: f32) -> Self {
        let duration = duration.max(0.0);
        Self {
            count,
            remaining: duration,
            duration,
        }
    }

    /// Units in this batch
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Seconds until this batch expires
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Lifetime the batch started with
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Fraction of the lifetime left (1.0 when there is no timer)
    pub fn time_percent(&self) -> f32 {
        if self.duration > 0.0 {
            self.remaining / self.duration
        } else {
            1.0
        }
    }

    /// Whether this batch counts down
    pub fn has_timer(&self) -> bool {
        self.duration > 0.0
    }

    /// Take up to `amount` units. Returns how many were taken.
    pub(crate) fn take(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.count);
        self.count -= taken;
        taken
    }

    /// Advance the countdown. Returns true once the batch has expired.
    pub(crate) fn age(&mut self, delta_seconds: f32) -> bool {
        if !self.has_timer() {
            return false;
        }
        self.remaining -= delta_seconds;
        self.remaining <= 0.0
    }
}
