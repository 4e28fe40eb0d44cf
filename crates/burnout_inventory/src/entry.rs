//! Stock entries: every batch of one item kind in one slot

use crate::batch::StockBatch;
use crate::item::ItemDefinition;
use std::sync::Arc;

/// All stock of one item kind occupying one slot.
///
/// Batches are kept in acquisition order, oldest first. That order is both
/// the removal order and the expiry tie-break. No batch with a count of zero
/// is ever kept.
#[derive(Debug, Clone, PartialEq)]
pub struct StockEntry {
    kind: Arc<ItemDefinition>,
    batches: Vec<StockBatch>,
}

impl StockEntry {
    /// Create an entry holding one batch of `count` units
    pub fn new(kind: Arc<ItemDefinition>, count: u32) -> Self {
        let mut entry = Self {
            kind,
            batches: Vec::new(),
        };
        entry.append_batch(count);
        entry
    }

    /// Item kind held by this entry
    pub fn kind(&self) -> &Arc<ItemDefinition> {
        &self.kind
    }

    /// Append a newly acquired batch with a fresh timer.
    ///
    /// Existing batches keep their own countdowns; re-acquiring never
    /// refreshes older stock. Does nothing when `count` is 0.
    pub fn append_batch(&mut self, count: u32) {
        if count == 0 {
            return;
        }
        self.batches.push(StockBatch::new(count, self.kind.duration));
    }

    /// Remove up to `amount` units, oldest batch first.
    /// Returns the total left afterwards.
    pub fn remove_count(&mut self, amount: u32) -> u32 {
        let mut left = amount;

        for batch in self.batches.iter_mut() {
            if left == 0 {
                break;
            }
            left -= batch.take(left);
        }
        self.batches.retain(|batch| batch.count() > 0);

        self.count()
    }

    /// Age every batch by `delta_seconds` and drop the ones that ran out.
    ///
    /// Returns true only when this call dropped at least one batch and left
    /// the entry empty. Losing some batches while stock remains returns false.
    pub fn decay(&mut self, delta_seconds: f32) -> bool {
        if !self.has_timer()
            || self.batches.is_empty()
            || delta_seconds.is_nan()
            || delta_seconds <= 0.0
        {
            return false;
        }

        let before = self.batches.len();
        self.batches.retain_mut(|batch| !batch.age(delta_seconds));

        self.batches.len() != before && self.batches.is_empty()
    }

    /// Total units across all batches, saturating at `u32::MAX`
    pub fn count(&self) -> u32 {
        self.batches
            .iter()
            .map(StockBatch::count)
            .fold(0, u32::saturating_add)
    }

    /// Number of live batches
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Batch that will expire first
    pub fn soonest_batch(&self) -> Option<&StockBatch> {
        self.batches
            .iter()
            .min_by(|a, b| a.remaining().total_cmp(&b.remaining()))
    }

    /// Seconds until the next batch expires (0 when empty)
    pub fn remaining_time(&self) -> f32 {
        self.soonest_batch().map(StockBatch::remaining).unwrap_or(0.0)
    }

    /// Timer fraction of the soonest-expiring batch, against that batch's own
    /// duration. 1.0 for kinds without a timer.
    pub fn time_percent(&self) -> f32 {
        if !self.has_timer() {
            return 1.0;
        }
        self.soonest_batch()
            .map(StockBatch::time_percent)
            .unwrap_or(0.0)
    }

    /// Whether this kind's batches count down
    pub fn has_timer(&self) -> bool {
        self.kind.has_duration()
    }

    /// Whether every batch is gone
    pub fn is_expired(&self) -> bool {
        self.batches.is_empty()
    }

    /// Whether the entry holds no stock
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty() || self.count() == 0
    }

    /// Iterate over live batches without copying
    pub fn iter_batches(&self) -> impl Iterator<Item = &StockBatch> {
        self.batches.iter()
    }

    /// Copy of the batch states, oldest first
    pub fn batches(&self) -> Vec<StockBatch> {
        self.batches.clone()
    }
}
