//! Inventory error types

use thiserror::Error;

/// Reasons a store operation was rejected.
///
/// A rejected operation changes nothing and emits no notification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Slot index outside the configured capacity
    #[error("Slot {slot} is out of range (capacity {capacity})")]
    InvalidSlot { slot: usize, capacity: usize },

    /// Slot index is valid but holds nothing
    #[error("Slot {0} is empty")]
    EmptySlot(usize),

    /// No matching slot and no empty slot to place a new kind
    #[error("Inventory is full, cannot add '{item_id}'")]
    Full { item_id: String },

    /// Placing zero units of a kind not already held
    #[error("Cannot add zero units of '{item_id}'")]
    ZeroQuantity { item_id: String },

    /// Merging would push the slot total past `u32::MAX`
    #[error("Adding {count} of '{item_id}' would overflow the stack (held {held})")]
    CountOverflow {
        item_id: String,
        held: u32,
        count: u32,
    },

    /// Not enough keys held
    #[error("Not enough keys (needed {needed}, held {held})")]
    InsufficientKeys { needed: u32, held: u32 },
}

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;
