//! Burnout Inventory - Timed Stock Inventory
//!
//! Tracks the player's carried stock across a fixed set of slots.
//!
//! # Features
//!
//! - Item definitions shared through `Arc`, loadable from a TOML catalog
//! - Fixed slot array, one slot per item kind, lowest empty slot first
//! - Per-acquisition batches with independent expiry timers
//! - Oldest-first removal across batches
//! - Per-frame `tick` with automatic expiry
//! - Separate key counter capped at one
//! - Change notifications via callbacks or polled channels
//!
//! # Example
//!
//! ```ignore
//! use burnout_inventory::prelude::*;
//! use std::sync::Arc;
//!
//! let stim = Arc::new(
//!     ItemDefinition::new("stim", "Combat Stim")
//!         .with_consumable(true)
//!         .with_duration(30.0),
//! );
//!
//! let mut inventory = InventoryStore::new(&InventoryConfig::default());
//! inventory.subscribe(|event| println!("{:?}", event));
//! inventory.add(&stim, 2)?;
//!
//! // Game loop
//! inventory.tick(1.0 / 60.0);
//! ```

pub mod batch;
pub mod catalog;
pub mod config;
pub mod entry;
pub mod error;
pub mod inventory;
pub mod item;

pub mod prelude {
    pub use crate::batch::StockBatch;
    pub use crate::catalog::{CatalogError, CatalogResult, ItemCatalog};
    pub use crate::config::{ConfigError, ConfigResult, InventoryConfig, DEFAULT_CAPACITY};
    pub use crate::entry::StockEntry;
    pub use crate::error::{InventoryError, InventoryResult};
    pub use crate::inventory::{AddOutcome, InventoryEvent, InventoryStore, KeyGrant, KEY_CAP};
    pub use crate::item::{ItemCategory, ItemDefinition, ItemRarity};
}

pub use prelude::*;
