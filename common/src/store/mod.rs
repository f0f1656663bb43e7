//! Card list mirrored to one persisted slot. A mutation only replaces the
//! in-memory view after its write succeeds; writes from other tabs replace
//! it outright (last writer wins).

pub mod backend;
pub mod error;
pub mod memory;

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use log::{debug, warn};

use crate::model::card::CardRecord;

pub use backend::{ExternalChange, StorageBackend, Subscription};
pub use error::PersistenceError;
pub use memory::MemorySlot;

type ChangeListener = Rc<dyn Fn(&[CardRecord])>;

#[derive(Default)]
struct StoreState {
    cards: RefCell<Vec<CardRecord>>,
    listeners: RefCell<Vec<(u64, ChangeListener)>>,
    next_listener: Cell<u64>,
}

impl StoreState {
    fn reconcile(&self, value: Option<String>) {
        let cards = match value {
            None => Vec::new(),
            Some(raw) => match decode(&raw) {
                Ok(cards) => cards,
                Err(e) => {
                    warn!("ignoring external card list change: {}", e);
                    return;
                }
            },
        };
        debug!("card list replaced by external write ({} cards)", cards.len());
        *self.cards.borrow_mut() = cards;

        let snapshot = self.cards.borrow().clone();
        let listeners: Vec<ChangeListener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

pub struct CardStore<B: StorageBackend> {
    backend: B,
    state: Rc<StoreState>,
    _external: Subscription,
}

impl<B: StorageBackend> CardStore<B> {
    /// Loads the slot and starts listening for external writes. An absent,
    /// unreadable or corrupt slot gives an empty store.
    pub fn open(backend: B) -> Self {
        let cards = match backend.read() {
            Ok(Some(raw)) => decode(&raw).unwrap_or_else(|e| {
                warn!("stored cards are corrupt, starting empty: {}", e);
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("could not read stored cards, starting empty: {}", e);
                Vec::new()
            }
        };

        let state = Rc::new(StoreState {
            cards: RefCell::new(cards),
            ..StoreState::default()
        });

        let weak: Weak<StoreState> = Rc::downgrade(&state);
        let external = backend.on_external_change(Box::new(move |value| {
            if let Some(state) = weak.upgrade() {
                state.reconcile(value);
            }
        }));

        Self {
            backend,
            state,
            _external: external,
        }
    }

    /// All cards in insertion order.
    pub fn list_all(&self) -> Vec<CardRecord> {
        self.state.cards.borrow().clone()
    }

    pub fn get(&self, id: &str) -> Option<CardRecord> {
        self.state.cards.borrow().iter().find(|c| c.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.cards.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.cards.borrow().is_empty()
    }

    /// Appends `record`. The caller guarantees its id is not in the store yet.
    pub fn insert(&self, record: CardRecord) {
        let mut next = self.list_all();
        debug!("inserting card {}", record.id);
        next.push(record);
        self.commit(next);
    }

    /// Removes the card with `id`; a missing id is a no-op.
    pub fn delete_by_id(&self, id: &str) {
        let mut next = self.list_all();
        match next.iter().position(|c| c.id == id) {
            Some(idx) => {
                next.remove(idx);
                debug!("deleting card {}", id);
                self.commit(next);
            }
            None => debug!("delete of unknown card {} ignored", id),
        }
    }

    /// Empties the store and removes the persisted slot.
    pub fn clear_all(&self) {
        match self.backend.remove() {
            Ok(()) => self.state.cards.borrow_mut().clear(),
            Err(e) => warn!("could not clear stored cards: {}", e),
        }
    }

    /// Calls `callback` with the reconciled list after every external write.
    /// The registration lasts as long as the returned guard.
    pub fn subscribe_to_external_changes(
        &self,
        callback: impl Fn(&[CardRecord]) + 'static,
    ) -> Subscription {
        let id = self.state.next_listener.get();
        self.state.next_listener.set(id + 1);
        self.state
            .listeners
            .borrow_mut()
            .push((id, Rc::new(callback)));

        let weak = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = weak.upgrade() {
                state.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
            }
        })
    }

    fn commit(&self, next: Vec<CardRecord>) {
        let encoded = match serde_json::to_string(&next) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("could not encode cards: {}", e);
                return;
            }
        };
        match self.backend.write(&encoded) {
            Ok(()) => *self.state.cards.borrow_mut() = next,
            Err(e) => warn!("could not persist cards, keeping previous list: {}", e),
        }
    }
}

/// Decodes a slot value. Later records that repeat an earlier id are dropped.
pub fn decode(raw: &str) -> Result<Vec<CardRecord>, PersistenceError> {
    let cards: Vec<CardRecord> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();
    let total = cards.len();
    let unique: Vec<CardRecord> = cards
        .into_iter()
        .filter(|c| seen.insert(c.id.clone()))
        .collect();
    if unique.len() != total {
        warn!("dropped {} cards with duplicate ids", total - unique.len());
    }
    Ok(unique)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::card::TemplateId;
    use crate::model::student::StudentRecord;

    fn card(id: &str) -> CardRecord {
        CardRecord::with_id(
            id,
            StudentRecord {
                name: format!("Student {}", id),
                roll_number: id.to_string(),
                class: "3".to_string(),
                division: "B".to_string(),
                allergies: Vec::new(),
                photo: None,
                rack_number: "R9".to_string(),
                bus_route: "Route 2".to_string(),
            },
            TemplateId::Modern,
            "2024-05-06T07:08:09.000Z",
        )
    }

    #[test]
    fn decode_drops_repeated_ids() {
        let raw = serde_json::to_string(&vec![card("a"), card("b"), card("a")]).unwrap();
        let ids: Vec<String> = decode(&raw).unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn unknown_delete_does_not_touch_the_slot() {
        let slot = MemorySlot::new();
        let store = CardStore::open(slot.clone());
        store.delete_by_id("missing");
        assert_eq!(slot.raw(), None);
    }

    #[test]
    fn get_finds_by_id() {
        let store = CardStore::open(MemorySlot::new());
        store.insert(card("a"));
        store.insert(card("b"));

        assert_eq!(store.get("b").map(|c| c.id), Some("b".to_string()));
        assert!(store.get("c").is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn store_drop_releases_backend_listener() {
        let slot = MemorySlot::new();
        let store = CardStore::open(slot.clone());
        assert_eq!(slot.listener_count(), 1);

        drop(store);
        assert_eq!(slot.listener_count(), 0);
    }
}
