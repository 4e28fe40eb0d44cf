//! Item catalog loaded from TOML
//!
//! # Catalog Format
//!
//! ```toml
//! [[items]]
//! id = "adrenaline"
//! name = "Adrenaline Shot"
//! category = "consumable"
//! rarity = "uncommon"
//! consumable = true
//! duration = 30.0
//!
//! [[items]]
//! id = "card_key"
//! name = "Card Key"
//! category = "key"
//! ```

use crate::item::ItemDefinition;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors from catalog loading
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate item id: {0}")]
    DuplicateItem(String),

    #[error("Invalid item '{id}': {reason}")]
    InvalidItem { id: String, reason: String },
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Root TOML structure
#[derive(Debug, Deserialize)]
struct CatalogToml {
    #[serde(default)]
    items: Vec<ItemDefinition>,
}

/// Registry of shared item definitions, in registration order
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<Arc<ItemDefinition>>,
    by_id: HashMap<String, usize>,
}

impl ItemCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from a TOML string
    pub fn from_toml_str(content: &str) -> CatalogResult<Self> {
        let raw: CatalogToml = toml::from_str(content)?;
        let mut catalog = Self::new();
        for item in raw.items {
            catalog.register(item)?;
        }
        Ok(catalog)
    }

    /// Load a catalog file
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded {} item definitions from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    /// Validate and add a definition, returning the shared handle
    pub fn register(&mut self, item: ItemDefinition) -> CatalogResult<Arc<ItemDefinition>> {
        if item.id.trim().is_empty() {
            return Err(CatalogError::InvalidItem {
                id: item.id,
                reason: "id must not be empty".to_string(),
            });
        }
        if !item.duration.is_finite() || item.duration < 0.0 {
            return Err(CatalogError::InvalidItem {
                id: item.id,
                reason: format!("duration must be a non-negative number, got {}", item.duration),
            });
        }
        if self.by_id.contains_key(&item.id) {
            return Err(CatalogError::DuplicateItem(item.id));
        }

        let item = Arc::new(item);
        self.by_id.insert(item.id.clone(), self.items.len());
        self.items.push(item.clone());
        Ok(item)
    }

    /// Look up a definition by id
    pub fn get(&self, id: &str) -> Option<&Arc<ItemDefinition>> {
        self.by_id.get(id).map(|&index| &self.items[index])
    }

    /// Iterate in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ItemDefinition>> {
        self.items.iter()
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
