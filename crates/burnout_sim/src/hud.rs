//! Presentation-side mirror of the inventory
//!
//! Rebuilds what a HUD would show purely from notifications. It never holds
//! a reference into the store.

use burnout_event::Receiver;
use burnout_inventory::{InventoryEvent, StockEntry};

/// What one HUD slot shows
#[derive(Debug, Clone, PartialEq)]
pub struct SlotView {
    pub name: String,
    pub count: u32,
    pub time_percent: f32,
    pub remaining: f32,
    pub has_timer: bool,
}

impl From<&StockEntry> for SlotView {
    fn from(entry: &StockEntry) -> Self {
        Self {
            name: entry.kind().name.clone(),
            count: entry.count(),
            time_percent: entry.time_percent(),
            remaining: entry.remaining_time(),
            has_timer: entry.has_timer(),
        }
    }
}

/// Running tallies of one-shot notifications
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HudCounters {
    pub added: u32,
    pub removed: u32,
    pub used: u32,
    pub slot_updates: u32,
}

/// Notification-driven HUD state
pub struct HudMirror {
    events: Receiver<InventoryEvent>,
    slots: Vec<Option<SlotView>>,
    key_count: u32,
    counters: HudCounters,
}

impl HudMirror {
    /// Create a mirror for a store with `capacity` slots
    pub fn new(events: Receiver<InventoryEvent>, capacity: usize) -> Self {
        Self {
            events,
            slots: vec![None; capacity],
            key_count: 0,
            counters: HudCounters::default(),
        }
    }

    /// Apply every queued notification. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events.try_recv() {
            self.apply(&event);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, event: &InventoryEvent) {
        match event {
            InventoryEvent::SlotChanged { slot, entry } => {
                self.counters.slot_updates += 1;
                if let Some(view) = self.slots.get_mut(*slot) {
                    *view = entry.as_ref().map(SlotView::from);
                } else {
                    log::warn!("HUD has no slot {}", slot);
                }
            }
            InventoryEvent::KeyCountChanged { count } => self.key_count = *count,
            InventoryEvent::ItemAdded { .. } => self.counters.added += 1,
            InventoryEvent::ItemRemoved { item } => {
                self.counters.removed += 1;
                log::debug!("HUD: {} gone", item.name);
            }
            InventoryEvent::ItemUsed { item, slot } => {
                self.counters.used += 1;
                log::debug!("HUD: {} used from slot {}", item.name, slot);
            }
        }
    }

    /// Current view of a slot
    pub fn slot(&self, slot: usize) -> Option<&SlotView> {
        self.slots.get(slot)?.as_ref()
    }

    /// Keys shown
    pub fn key_count(&self) -> u32 {
        self.key_count
    }

    /// Notification tallies
    pub fn counters(&self) -> HudCounters {
        self.counters
    }

    /// One line per slot plus the key line
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = self
            .slots
            .iter()
            .enumerate()
            .map(|(index, view)| match view {
                Some(v) if v.has_timer => format!(
                    "[{}] {} x{} ({:.1}s, {:.0}%)",
                    index,
                    v.name,
                    v.count,
                    v.remaining,
                    v.time_percent * 100.0
                ),
                Some(v) => format!("[{}] {} x{}", index, v.name, v.count),
                None => format!("[{}] (empty)", index),
            })
            .collect();
        lines.push(format!("Keys: {}", self.key_count));
        lines.join("\n")
    }
}
