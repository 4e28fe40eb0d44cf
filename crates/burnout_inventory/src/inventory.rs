//! Inventory store

use crate::config::InventoryConfig;
use crate::entry::StockEntry;
use crate::error::{InventoryError, InventoryResult};
use crate::item::ItemDefinition;
use burnout_event::{Dispatcher, Priority, Receiver, SubscriberId};
use std::fmt;
use std::sync::Arc;

/// Most keys that can be held at once
pub const KEY_CAP: u32 = 1;

/// Inventory notifications.
///
/// Slot payloads are copies taken after the change was fully applied.
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryEvent {
    /// A slot's contents changed (`None` = slot is now empty)
    SlotChanged {
        slot: usize,
        entry: Option<StockEntry>,
    },
    /// Key counter changed
    KeyCountChanged { count: u32 },
    /// Stock of an item was acquired
    ItemAdded { item: Arc<ItemDefinition> },
    /// The last unit of an item left its slot
    ItemRemoved { item: Arc<ItemDefinition> },
    /// An item was used from a slot
    ItemUsed {
        item: Arc<ItemDefinition>,
        slot: usize,
    },
}

/// Result of acquiring a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyGrant {
    /// Counter went from empty to held
    Granted,
    /// Already at the cap; nothing changed
    AlreadyHeld,
}

/// Where an acquisition ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Merged into the slot already holding this kind, as a new batch
    Stacked { slot: usize },
    /// Placed into a previously empty slot
    Placed { slot: usize },
    /// Routed to the key counter. Reported as success even when at the cap.
    KeyCounter(KeyGrant),
}

impl AddOutcome {
    /// Slot the stock landed in, if it went to a slot
    pub fn slot(&self) -> Option<usize> {
        match self {
            Self::Stacked { slot } | Self::Placed { slot } => Some(*slot),
            Self::KeyCounter(_) => None,
        }
    }
}

/// Fixed-capacity slot inventory with per-batch expiry and a separate key
/// counter.
///
/// Each item kind occupies at most one slot. Slot indices are stable; a slot
/// is either empty or holds a non-empty [`StockEntry`]. All mutation goes
/// through this type and every state change is announced through the
/// registered subscribers before the call returns.
pub struct InventoryStore {
    /// Inventory slots (None = empty)
    slots: Vec<Option<StockEntry>>,
    /// Keys held, at most [`KEY_CAP`]
    key_count: u32,
    /// Change subscribers
    events: Dispatcher<InventoryEvent>,
}

impl InventoryStore {
    /// Create a store from configuration
    pub fn new(config: &InventoryConfig) -> Self {
        Self::with_capacity(config.capacity)
    }

    /// Create a store with the given number of slots
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            key_count: 0,
            events: Dispatcher::new(),
        }
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Register a callback for every notification
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriberId
    where
        F: Fn(&InventoryEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(handler)
    }

    /// Register a callback with priority
    pub fn subscribe_with_priority<F>(&mut self, handler: F, priority: Priority) -> SubscriberId
    where
        F: Fn(&InventoryEvent) + Send + Sync + 'static,
    {
        self.events.subscribe_with_priority(handler, priority)
    }

    /// Remove a callback
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Open a polled notification channel
    pub fn subscribe_channel(&mut self) -> Receiver<InventoryEvent> {
        self.events.subscribe_channel()
    }

    // ------------------------------------------------------------------
    // Stock changes
    // ------------------------------------------------------------------

    /// Acquire `count` units of an item.
    ///
    /// Key items go to the key counter. Other kinds merge into their existing
    /// slot as a new batch, or take the lowest empty slot.
    ///
    /// Merging zero units appends nothing but is still announced. Placing
    /// zero units of a kind not yet held is rejected, as is a merge whose
    /// total would not fit in a `u32`.
    pub fn add(&mut self, item: &Arc<ItemDefinition>, count: u32) -> InventoryResult<AddOutcome> {
        if item.is_key() {
            return Ok(AddOutcome::KeyCounter(self.add_key(count)));
        }

        if let Some(slot) = self.find_item(&item.id) {
            if let Some(entry) = self.slots[slot].as_mut() {
                let held = entry.count();
                if held.checked_add(count).is_none() {
                    return Err(rejected(InventoryError::CountOverflow {
                        item_id: item.id.clone(),
                        held,
                        count,
                    }));
                }
                entry.append_batch(count);
                log::info!(
                    "Added {} x{} (slot {}, total {}, batches {})",
                    item.name,
                    count,
                    slot,
                    entry.count(),
                    entry.batch_count()
                );
            }
            self.notify_slot(slot);
            self.events.emit(InventoryEvent::ItemAdded { item: item.clone() });
            return Ok(AddOutcome::Stacked { slot });
        }

        if count == 0 {
            return Err(rejected(InventoryError::ZeroQuantity {
                item_id: item.id.clone(),
            }));
        }

        let Some(slot) = self.find_empty_slot() else {
            return Err(rejected(InventoryError::Full {
                item_id: item.id.clone(),
            }));
        };

        self.slots[slot] = Some(StockEntry::new(item.clone(), count));
        log::info!("Added {} x{} (slot {})", item.name, count, slot);
        self.notify_slot(slot);
        self.events.emit(InventoryEvent::ItemAdded { item: item.clone() });
        Ok(AddOutcome::Placed { slot })
    }

    /// Remove up to `count` units from a slot, oldest stock first.
    ///
    /// Asking for more than is held removes everything. Returns the units
    /// left in the slot.
    pub fn remove(&mut self, slot: usize, count: u32) -> InventoryResult<u32> {
        let entry = self.occupied_mut(slot).map_err(rejected)?;
        let item = entry.kind().clone();
        let left = entry.remove_count(count);

        if left == 0 {
            self.slots[slot] = None;
            log::info!("Removed {} (slot {} emptied)", item.name, slot);
            self.events.emit(InventoryEvent::SlotChanged { slot, entry: None });
            self.events.emit(InventoryEvent::ItemRemoved { item });
        } else {
            log::info!(
                "Removed {} x{} (slot {}, {} left)",
                item.name,
                count,
                slot,
                left
            );
            self.notify_slot(slot);
        }

        Ok(left)
    }

    /// Use the item in a slot.
    ///
    /// Always announces the use; consumable kinds then lose one unit.
    pub fn use_item(&mut self, slot: usize) -> InventoryResult<()> {
        let item = self.occupied(slot).map_err(rejected)?.kind().clone();

        log::info!("Used {} (slot {})", item.name, slot);
        self.events.emit(InventoryEvent::ItemUsed {
            item: item.clone(),
            slot,
        });

        if item.consumable {
            self.remove(slot, 1)?;
        }

        Ok(())
    }

    /// Advance every batch timer by `delta_seconds` (call once per frame).
    ///
    /// Slots are visited in index order. A slot whose batches all ran out is
    /// cleared; a slot that lost some batches is re-announced; a timed slot
    /// with no structural change is still re-announced so countdown displays
    /// stay current.
    pub fn tick(&mut self, delta_seconds: f32) {
        for slot in 0..self.slots.len() {
            let Some(entry) = self.slots[slot].as_mut() else {
                continue;
            };

            let before_count = entry.count();
            let before_batches = entry.batch_count();
            let all_expired = entry.decay(delta_seconds);
            let after_count = entry.count();
            let after_batches = entry.batch_count();
            let has_timer = entry.has_timer();
            let item = entry.kind().clone();

            if all_expired {
                self.slots[slot] = None;
                log::info!("{} expired (slot {} emptied)", item.name, slot);
                self.events.emit(InventoryEvent::SlotChanged { slot, entry: None });
                self.events.emit(InventoryEvent::ItemRemoved { item });
            } else if before_count != after_count || before_batches != after_batches {
                log::debug!(
                    "{} batch expired (slot {}, {} -> {} units, {} -> {} batches)",
                    item.name,
                    slot,
                    before_count,
                    after_count,
                    before_batches,
                    after_batches
                );
                self.notify_slot(slot);
            } else if has_timer {
                log::trace!("{} timer refresh (slot {})", item.name, slot);
                self.notify_slot(slot);
            }
        }
    }

    /// Empty every slot. The key counter is untouched.
    pub fn clear(&mut self) {
        for slot in 0..self.slots.len() {
            if self.slots[slot].take().is_some() {
                self.events.emit(InventoryEvent::SlotChanged { slot, entry: None });
            }
        }
        log::info!("Inventory cleared");
    }

    // ------------------------------------------------------------------
    // Key counter
    // ------------------------------------------------------------------

    /// Acquire a key. The counter never exceeds [`KEY_CAP`], however many
    /// are requested.
    pub fn add_key(&mut self, count: u32) -> KeyGrant {
        if self.key_count >= KEY_CAP {
            log::warn!("Key already held (max {})", KEY_CAP);
            return KeyGrant::AlreadyHeld;
        }

        self.key_count = KEY_CAP;
        log::info!(
            "Key acquired (requested {}, holding {})",
            count,
            self.key_count
        );
        self.events.emit(InventoryEvent::KeyCountChanged {
            count: self.key_count,
        });
        KeyGrant::Granted
    }

    /// Spend keys. Returns the keys left.
    pub fn use_key(&mut self, count: u32) -> InventoryResult<u32> {
        if self.key_count < count {
            return Err(rejected(InventoryError::InsufficientKeys {
                needed: count,
                held: self.key_count,
            }));
        }

        self.key_count -= count;
        log::info!("Used {} key(s), {} left", count, self.key_count);
        self.events.emit(InventoryEvent::KeyCountChanged {
            count: self.key_count,
        });
        Ok(self.key_count)
    }

    /// Check if at least `min_count` keys are held
    pub fn has_key(&self, min_count: u32) -> bool {
        self.key_count >= min_count
    }

    /// Keys currently held
    pub fn key_count(&self) -> u32 {
        self.key_count
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Get inventory capacity
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Get slot contents (`None` for empty or out-of-range slots)
    pub fn slot(&self, slot: usize) -> Option<&StockEntry> {
        self.slots.get(slot)?.as_ref()
    }

    /// Copy of every slot. Changing the copy does not touch the store.
    pub fn all_slots(&self) -> Vec<Option<StockEntry>> {
        self.slots.clone()
    }

    /// Occupied slots with their index
    pub fn iter(&self) -> impl Iterator<Item = (usize, &StockEntry)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|entry| (i, entry)))
    }

    /// Find the slot holding an item kind
    pub fn find_item(&self, item_id: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|entry| entry.kind().id == item_id))
    }

    /// Find the lowest empty slot
    pub fn find_empty_slot(&self) -> Option<usize> {
        self.slots.iter().position(|s| s.is_none())
    }

    /// Get number of used slots
    pub fn used_slots(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Check if no slot is free
    pub fn is_full(&self) -> bool {
        self.find_empty_slot().is_none()
    }

    /// Check if no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.used_slots() == 0
    }

    /// Units held of an item kind
    pub fn count_item(&self, item_id: &str) -> u32 {
        self.iter()
            .filter(|(_, entry)| entry.kind().id == item_id)
            .map(|(_, entry)| entry.count())
            .sum()
    }

    /// Check if the item is held with at least `min_count` units
    pub fn has_at_least(&self, item_id: &str, min_count: u32) -> bool {
        self.find_item(item_id).is_some() && self.count_item(item_id) >= min_count
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn occupied(&self, slot: usize) -> InventoryResult<&StockEntry> {
        let capacity = self.capacity();
        match self.slots.get(slot) {
            None => Err(InventoryError::InvalidSlot { slot, capacity }),
            Some(None) => Err(InventoryError::EmptySlot(slot)),
            Some(Some(entry)) => Ok(entry),
        }
    }

    fn occupied_mut(&mut self, slot: usize) -> InventoryResult<&mut StockEntry> {
        let capacity = self.capacity();
        match self.slots.get_mut(slot) {
            None => Err(InventoryError::InvalidSlot { slot, capacity }),
            Some(None) => Err(InventoryError::EmptySlot(slot)),
            Some(Some(entry)) => Ok(entry),
        }
    }

    /// Announce the current contents of a slot
    fn notify_slot(&mut self, slot: usize) {
        let entry = self.slots.get(slot).cloned().flatten();
        self.events.emit(InventoryEvent::SlotChanged { slot, entry });
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new(&InventoryConfig::default())
    }
}

impl fmt::Debug for InventoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InventoryStore")
            .field("slots", &self.slots)
            .field("key_count", &self.key_count)
            .field("subscribers", &self.events.subscriber_count())
            .finish()
    }
}

fn rejected(err: InventoryError) -> InventoryError {
    log::warn!("Inventory operation rejected: {}", err);
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemCategory;
    use burnout_event::drain;
    use parking_lot::Mutex;

    fn item(id: &str) -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition::new(id, id))
    }

    fn timed(id: &str, duration: f32) -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition::new(id, id).with_duration(duration))
    }

    fn potion() -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition::new("potion", "Potion").with_consumable(true))
    }

    fn card_key() -> Arc<ItemDefinition> {
        Arc::new(ItemDefinition::new("card_key", "Card Key").with_category(ItemCategory::Key))
    }

    fn record(store: &mut InventoryStore) -> Arc<Mutex<Vec<InventoryEvent>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        store.subscribe(move |e: &InventoryEvent| sink.lock().push(e.clone()));
        log
    }

    #[test]
    fn test_inventory_creation() {
        let store = InventoryStore::default();

        assert_eq!(store.capacity(), 5);
        assert_eq!(store.used_slots(), 0);
        assert!(store.is_empty());
        assert!(!store.is_full());
        assert_eq!(store.key_count(), 0);
    }

    #[test]
    fn test_add_places_in_lowest_empty_slot() {
        let mut store = InventoryStore::with_capacity(3);
        let events = record(&mut store);
        let sword = item("sword");

        let outcome = store.add(&sword, 1).unwrap();

        assert_eq!(outcome, AddOutcome::Placed { slot: 0 });
        assert_eq!(store.slot(0).unwrap().count(), 1);

        let events = events.lock();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], InventoryEvent::SlotChanged { slot: 0, entry: Some(e) } if e.count() == 1));
        assert!(matches!(&events[1], InventoryEvent::ItemAdded { item } if item.id == "sword"));
    }

    #[test]
    fn test_merge_not_duplicate() {
        let mut store = InventoryStore::default();
        let stim = item("stim");

        store.add(&stim, 1).unwrap();
        let outcome = store.add(&stim, 1).unwrap();

        assert_eq!(outcome, AddOutcome::Stacked { slot: 0 });
        assert_eq!(store.used_slots(), 1);
        assert_eq!(store.slot(0).unwrap().count(), 2);
        assert_eq!(store.slot(0).unwrap().batch_count(), 2);
        assert!(store.slot(1).is_none());
    }

    #[test]
    fn test_merge_finds_later_slot() {
        let mut store = InventoryStore::default();
        let (a, b) = (item("a"), item("b"));
        store.add(&a, 1).unwrap();
        store.add(&b, 1).unwrap();
        store.remove(0, 1).unwrap();

        // Slot 0 is free, but b must merge into slot 1
        assert_eq!(store.add(&b, 2).unwrap(), AddOutcome::Stacked { slot: 1 });
        assert!(store.slot(0).is_none());
        assert_eq!(store.count_item("b"), 3);
    }

    #[test]
    fn test_capacity() {
        let mut store = InventoryStore::default();
        for i in 0..5 {
            store.add(&item(&format!("item{}", i)), 1).unwrap();
        }
        assert!(store.is_full());

        let events = record(&mut store);
        let before = store.all_slots();
        let result = store.add(&item("sixth"), 1);

        assert_eq!(
            result,
            Err(InventoryError::Full {
                item_id: "sixth".to_string()
            })
        );
        assert_eq!(store.all_slots(), before);
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_full_store_still_merges() {
        let mut store = InventoryStore::with_capacity(1);
        let stim = item("stim");
        store.add(&stim, 1).unwrap();

        assert!(store.is_full());
        assert_eq!(store.add(&stim, 4).unwrap(), AddOutcome::Stacked { slot: 0 });
        assert_eq!(store.count_item("stim"), 5);
    }

    #[test]
    fn test_add_zero_rejected() {
        let mut store = InventoryStore::default();
        let events = record(&mut store);

        let result = store.add(&item("stim"), 0);

        assert!(matches!(result, Err(InventoryError::ZeroQuantity { .. })));
        assert!(store.is_empty());
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_merge_zero_is_announced() {
        let mut store = InventoryStore::default();
        let stim = item("stim");
        store.add(&stim, 2).unwrap();
        let events = record(&mut store);

        assert_eq!(store.add(&stim, 0), Ok(AddOutcome::Stacked { slot: 0 }));
        assert_eq!(store.count_item("stim"), 2);
        assert_eq!(store.slot(0).unwrap().batch_count(), 1);

        let events = events.lock();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], InventoryEvent::SlotChanged { slot: 0, entry: Some(e) } if e.count() == 2));
        assert!(matches!(&events[1], InventoryEvent::ItemAdded { item } if item.id == "stim"));
    }

    #[test]
    fn test_merge_past_u32_max_rejected() {
        let mut store = InventoryStore::default();
        let ammo = item("ammo");
        store.add(&ammo, u32::MAX).unwrap();
        let events = record(&mut store);
        let before = store.all_slots();

        let result = store.add(&ammo, 1);

        assert_eq!(
            result,
            Err(InventoryError::CountOverflow {
                item_id: "ammo".to_string(),
                held: u32::MAX,
                count: 1,
            })
        );
        assert_eq!(store.all_slots(), before);
        assert!(store.has_at_least("ammo", 1));
        assert_eq!(store.count_item("ammo"), u32::MAX);
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_remove_partial() {
        let mut store = InventoryStore::default();
        store.add(&item("ammo"), 10).unwrap();
        let events = record(&mut store);

        assert_eq!(store.remove(0, 4), Ok(6));

        let events = events.lock();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], InventoryEvent::SlotChanged { slot: 0, entry: Some(e) } if e.count() == 6));
    }

    #[test]
    fn test_remove_clamps_and_clears() {
        let mut store = InventoryStore::default();
        store.add(&item("ammo"), 3).unwrap();
        let events = record(&mut store);

        assert_eq!(store.remove(0, 99), Ok(0));
        assert!(store.slot(0).is_none());

        let events = events.lock();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], InventoryEvent::SlotChanged { slot: 0, entry: None });
        assert!(matches!(&events[1], InventoryEvent::ItemRemoved { item } if item.id == "ammo"));
    }

    #[test]
    fn test_remove_validation() {
        let mut store = InventoryStore::with_capacity(2);
        let events = record(&mut store);

        assert_eq!(
            store.remove(2, 1),
            Err(InventoryError::InvalidSlot { slot: 2, capacity: 2 })
        );
        assert_eq!(store.remove(0, 1), Err(InventoryError::EmptySlot(0)));
        assert!(events.lock().is_empty());
    }

    #[test]
    fn test_use_consumable() {
        let mut store = InventoryStore::default();
        store.add(&potion(), 2).unwrap();
        let events = record(&mut store);

        store.use_item(0).unwrap();

        assert_eq!(store.slot(0).unwrap().count(), 1);
        let events = events.lock();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], InventoryEvent::ItemUsed { item, slot: 0 } if item.id == "potion"));
        assert!(matches!(&events[1], InventoryEvent::SlotChanged { slot: 0, entry: Some(_) }));
    }

    #[test]
    fn test_use_last_consumable_empties_slot() {
        let mut store = InventoryStore::default();
        store.add(&potion(), 1).unwrap();
        let events = record(&mut store);

        store.use_item(0).unwrap();

        assert!(store.slot(0).is_none());
        let events = events.lock();
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[0], InventoryEvent::ItemUsed { .. }));
        assert_eq!(events[1], InventoryEvent::SlotChanged { slot: 0, entry: None });
        assert!(matches!(&events[2], InventoryEvent::ItemRemoved { .. }));
    }

    #[test]
    fn test_use_non_consumable() {
        let mut store = InventoryStore::default();
        store.add(&item("radio"), 1).unwrap();
        let events = record(&mut store);

        store.use_item(0).unwrap();

        assert_eq!(store.slot(0).unwrap().count(), 1);
        assert_eq!(events.lock().len(), 1);
    }

    #[test]
    fn test_use_validation() {
        let mut store = InventoryStore::default();

        assert_eq!(store.use_item(0), Err(InventoryError::EmptySlot(0)));
        assert!(matches!(
            store.use_item(7),
            Err(InventoryError::InvalidSlot { slot: 7, .. })
        ));
    }

    #[test]
    fn test_tick_full_expiry() {
        let mut store = InventoryStore::default();
        store.add(&timed("shield", 2.0), 1).unwrap();
        let events = record(&mut store);

        store.tick(2.5);

        assert!(store.slot(0).is_none());
        let events = events.lock();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], InventoryEvent::SlotChanged { slot: 0, entry: None });
        assert!(matches!(&events[1], InventoryEvent::ItemRemoved { item } if item.id == "shield"));
    }

    #[test]
    fn test_tick_partial_expiry() {
        let mut store = InventoryStore::default();
        let shield = timed("shield", 10.0);
        store.add(&shield, 2).unwrap();
        store.tick(5.0);
        store.add(&shield, 3).unwrap();
        let events = record(&mut store);

        store.tick(6.0);

        let entry = store.slot(0).unwrap();
        assert_eq!(entry.count(), 3);
        assert_eq!(entry.batch_count(), 1);
        let events = events.lock();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], InventoryEvent::SlotChanged { slot: 0, entry: Some(e) } if e.count() == 3));
    }

    #[test]
    fn test_tick_refreshes_timed_slots() {
        let mut store = InventoryStore::default();
        store.add(&timed("shield", 10.0), 1).unwrap();
        store.add(&item("radio"), 1).unwrap();
        let events = record(&mut store);

        store.tick(1.0);
        store.tick(1.0);

        // Only the timed slot is re-announced, once per tick
        let events = events.lock();
        assert_eq!(events.len(), 2);
        for event in events.iter() {
            assert!(matches!(event, InventoryEvent::SlotChanged { slot: 0, entry: Some(_) }));
        }
        assert_eq!(store.slot(0).unwrap().remaining_time(), 8.0);
    }

    #[test]
    fn test_tick_processes_slots_in_order() {
        let mut store = InventoryStore::default();
        store.add(&timed("a", 1.0), 1).unwrap();
        store.add(&timed("b", 5.0), 1).unwrap();
        store.add(&timed("c", 1.0), 1).unwrap();
        let events = record(&mut store);

        store.tick(1.0);

        let slots: Vec<usize> = events
            .lock()
            .iter()
            .filter_map(|e| match e {
                InventoryEvent::SlotChanged { slot, .. } => Some(*slot),
                _ => None,
            })
            .collect();
        assert_eq!(slots, vec![0, 1, 2]);
        assert_eq!(store.used_slots(), 1);
        assert_eq!(store.find_item("b"), Some(1));
    }

    #[test]
    fn test_key_cap() {
        let mut store = InventoryStore::default();
        let events = record(&mut store);

        assert_eq!(store.add_key(1), KeyGrant::Granted);
        assert_eq!(store.add_key(1), KeyGrant::AlreadyHeld);
        assert_eq!(store.key_count(), 1);
        assert_eq!(events.lock().len(), 1);

        assert_eq!(store.use_key(1), Ok(0));
        assert_eq!(
            store.use_key(1),
            Err(InventoryError::InsufficientKeys { needed: 1, held: 0 })
        );
        assert!(!store.has_key(1));
    }

    #[test]
    fn test_add_key_many_at_once() {
        let mut store = InventoryStore::default();

        store.add_key(5);

        assert_eq!(store.key_count(), 1);
        assert!(store.has_key(1));
        assert!(!store.has_key(2));
    }

    #[test]
    fn test_key_item_routes_to_counter() {
        let mut store = InventoryStore::default();
        let key = card_key();

        assert_eq!(
            store.add(&key, 1),
            Ok(AddOutcome::KeyCounter(KeyGrant::Granted))
        );
        // Cap absorbs the surplus, still reported as success
        assert_eq!(
            store.add(&key, 1),
            Ok(AddOutcome::KeyCounter(KeyGrant::AlreadyHeld))
        );
        assert!(store.is_empty());
        assert_eq!(store.key_count(), 1);
    }

    #[test]
    fn test_has_at_least() {
        let mut store = InventoryStore::default();
        store.add(&item("ammo"), 3).unwrap();

        assert!(store.has_at_least("ammo", 3));
        assert!(!store.has_at_least("ammo", 4));
        assert!(!store.has_at_least("missing", 0));
    }

    #[test]
    fn test_all_slots_is_a_copy() {
        let mut store = InventoryStore::default();
        store.add(&item("ammo"), 3).unwrap();

        let first = store.all_slots();
        let mut second = store.all_slots();
        assert_eq!(first, second);

        second[0] = None;
        second[1] = Some(StockEntry::new(item("fake"), 9));

        assert_eq!(store.slot(0).unwrap().count(), 3);
        assert!(store.slot(1).is_none());
        assert_eq!(store.all_slots(), first);
    }

    #[test]
    fn test_clear() {
        let mut store = InventoryStore::default();
        store.add(&item("a"), 1).unwrap();
        store.add(&item("b"), 1).unwrap();
        store.add_key(1);
        store.remove(0, 1).unwrap();
        let events = record(&mut store);

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.key_count(), 1);
        assert_eq!(
            *events.lock(),
            vec![InventoryEvent::SlotChanged { slot: 1, entry: None }]
        );
    }

    #[test]
    fn test_channel_subscriber() {
        let mut store = InventoryStore::default();
        let rx = store.subscribe_channel();

        store.add(&item("ammo"), 1).unwrap();
        store.add_key(1);

        let events = drain(&rx);
        assert_eq!(events.len(), 3);
        assert_eq!(events[2], InventoryEvent::KeyCountChanged { count: 1 });
    }

    #[test]
    fn test_unsubscribe() {
        let mut store = InventoryStore::default();
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let id = store.subscribe(move |e: &InventoryEvent| sink.lock().push(e.clone()));

        assert!(store.unsubscribe(id));
        store.add(&item("ammo"), 1).unwrap();

        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_event_payload_is_detached() {
        let mut store = InventoryStore::default();
        let rx = store.subscribe_channel();
        store.add(&item("ammo"), 5).unwrap();

        let mut events = drain(&rx);
        if let InventoryEvent::SlotChanged { entry: Some(entry), .. } = &mut events[0] {
            entry.remove_count(5);
        }

        assert_eq!(store.slot(0).unwrap().count(), 5);
    }
}
