//! In-process storage slot.
//!
//! Every handle obtained through `another_tab` shares the value of the slot
//! it came from, and writes through one handle are reported to listeners
//! registered through the others, the way the browser reports `localStorage`
//! writes to the other tabs of an origin. Used by tests and by hosts without
//! browser storage.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::backend::{ExternalChange, StorageBackend, Subscription};
use super::error::PersistenceError;

struct Listener {
    id: u64,
    owner: u64,
    callback: Rc<dyn Fn(Option<String>)>,
}

#[derive(Default)]
struct Hub {
    value: RefCell<Option<String>>,
    listeners: RefCell<Vec<Listener>>,
    next_listener: Cell<u64>,
    next_handle: Cell<u64>,
    fail_writes: Cell<bool>,
}

impl Hub {
    fn notify(&self, writer: u64, value: Option<String>) {
        let callbacks: Vec<Rc<dyn Fn(Option<String>)>> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.owner != writer)
            .map(|l| l.callback.clone())
            .collect();

        for callback in callbacks {
            callback(value.clone());
        }
    }
}

#[derive(Clone)]
pub struct MemorySlot {
    hub: Rc<Hub>,
    handle: u64,
}

impl Default for MemorySlot {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySlot {
    /// A fresh, empty slot.
    pub fn new() -> Self {
        Self {
            hub: Rc::new(Hub::default()),
            handle: 0,
        }
    }

    /// Another handle onto the same slot, acting as a separate tab.
    pub fn another_tab(&self) -> Self {
        let handle = self.hub.next_handle.get() + 1;
        self.hub.next_handle.set(handle);
        Self {
            hub: self.hub.clone(),
            handle,
        }
    }

    /// Makes every later `write` fail as if the quota were exceeded.
    pub fn set_fail_writes(&self, fail: bool) {
        self.hub.fail_writes.set(fail);
    }

    /// Current raw slot content.
    pub fn raw(&self) -> Option<String> {
        self.hub.value.borrow().clone()
    }

    /// Overwrites the slot content without notifying anyone.
    pub fn seed(&self, value: impl Into<String>) {
        *self.hub.value.borrow_mut() = Some(value.into());
    }

    pub fn listener_count(&self) -> usize {
        self.hub.listeners.borrow().len()
    }
}

impl StorageBackend for MemorySlot {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.raw())
    }

    fn write(&self, value: &str) -> Result<(), PersistenceError> {
        if self.hub.fail_writes.get() {
            return Err(PersistenceError::Write("quota exceeded".to_string()));
        }
        *self.hub.value.borrow_mut() = Some(value.to_string());
        self.hub.notify(self.handle, Some(value.to_string()));
        Ok(())
    }

    fn remove(&self) -> Result<(), PersistenceError> {
        self.hub.value.borrow_mut().take();
        self.hub.notify(self.handle, None);
        Ok(())
    }

    fn on_external_change(&self, callback: ExternalChange) -> Subscription {
        let id = self.hub.next_listener.get();
        self.hub.next_listener.set(id + 1);
        self.hub.listeners.borrow_mut().push(Listener {
            id,
            owner: self.handle,
            callback: Rc::from(callback),
        });

        let hub = Rc::downgrade(&self.hub);
        Subscription::new(move || {
            if let Some(hub) = hub.upgrade() {
                hub.listeners.borrow_mut().retain(|l| l.id != id);
            }
        })
    }
}
