//! Scripted scenarios
//!
//! A scenario is a list of timed inventory actions replayed against a store
//! by a fixed-step loop.
//!
//! # Scenario Format
//!
//! ```toml
//! duration = 40.0   # seconds of simulated time
//! dt = 0.0166667    # step length, defaults to 1/60
//!
//! [[steps]]
//! at = 0.0
//! action = { kind = "add", item = "adrenaline", count = 2 }
//!
//! [[steps]]
//! at = 12.5
//! action = { kind = "use", slot = 0 }
//! ```

use burnout_inventory::{InventoryStore, ItemCatalog, ItemDefinition};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors from scenario loading
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown item in step {step}: {item}")]
    UnknownItem { step: usize, item: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for scenario operations
pub type ScenarioResult<T> = Result<T, ScenarioError>;

fn one() -> u32 {
    1
}

fn default_dt() -> f32 {
    1.0 / 60.0
}

/// One scripted inventory call
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    Add {
        item: String,
        #[serde(default = "one")]
        count: u32,
    },
    Remove {
        slot: usize,
        #[serde(default = "one")]
        count: u32,
    },
    Use {
        slot: usize,
    },
    AddKey {
        #[serde(default = "one")]
        count: u32,
    },
    UseKey {
        #[serde(default = "one")]
        count: u32,
    },
}

/// Action scheduled at a point in simulated time
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    /// Seconds since start
    pub at: f32,
    /// What to do
    pub action: Action,
}

/// Complete scenario
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Simulated seconds to run
    pub duration: f32,
    /// Fixed step length
    #[serde(default = "default_dt")]
    pub dt: f32,
    /// Steps, replayed in time order
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse from a TOML string
    pub fn from_toml_str(content: &str) -> ScenarioResult<Self> {
        let mut scenario: Self = toml::from_str(content)?;
        scenario.validate()?;
        // Stable: steps sharing a timestamp keep file order
        scenario.steps.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(scenario)
    }

    /// Load from a file
    pub fn load(path: impl AsRef<Path>) -> ScenarioResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let scenario = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded scenario from {} ({} steps over {}s)",
            path.as_ref().display(),
            scenario.steps.len(),
            scenario.duration
        );
        Ok(scenario)
    }

    fn validate(&self) -> ScenarioResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ScenarioError::Validation(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if !(self.duration.is_finite() && self.duration >= 0.0) {
            return Err(ScenarioError::Validation(format!(
                "duration must be non-negative, got {}",
                self.duration
            )));
        }
        if let Some(step) = self.steps.iter().find(|s| !s.at.is_finite() || s.at < 0.0) {
            return Err(ScenarioError::Validation(format!(
                "step time must be non-negative, got {}",
                step.at
            )));
        }
        Ok(())
    }

    /// Check every referenced item exists, resolving ids to shared definitions
    pub fn resolve(&self, catalog: &ItemCatalog) -> ScenarioResult<Vec<ResolvedStep>> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let item = match &step.action {
                    Action::Add { item, .. } => {
                        let definition =
                            catalog.get(item).ok_or_else(|| ScenarioError::UnknownItem {
                                step: index,
                                item: item.clone(),
                            })?;
                        Some(definition.clone())
                    }
                    _ => None,
                };
                Ok(ResolvedStep {
                    at: step.at,
                    action: step.action.clone(),
                    item,
                })
            })
            .collect()
    }
}

/// Step with its item definition looked up
#[derive(Debug, Clone)]
pub struct ResolvedStep {
    pub at: f32,
    pub action: Action,
    item: Option<Arc<ItemDefinition>>,
}

impl ResolvedStep {
    /// Apply to a store. Returns false if the store rejected the call.
    pub fn apply(&self, store: &mut InventoryStore) -> bool {
        let result = match (&self.action, &self.item) {
            (Action::Add { count, .. }, Some(item)) => store.add(item, *count).map(|_| ()),
            (Action::Add { item, .. }, None) => {
                log::error!("Step for '{}' was not resolved", item);
                return false;
            }
            (Action::Remove { slot, count }, _) => store.remove(*slot, *count).map(|_| ()),
            (Action::Use { slot }, _) => store.use_item(*slot),
            (Action::AddKey { count }, _) => {
                store.add_key(*count);
                Ok(())
            }
            (Action::UseKey { count }, _) => store.use_key(*count).map(|_| ()),
        };
        result.is_ok()
    }
}
