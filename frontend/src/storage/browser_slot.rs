//! `localStorage` backend. The browser fires `storage` events only in the
//! other tabs of the origin, which matches the external change hook.

use common::store::{ExternalChange, PersistenceError, StorageBackend, Subscription};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Storage, StorageEvent};

use crate::helpers::js_message;

pub struct BrowserSlot {
    key: String,
}

impl BrowserSlot {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<Storage, PersistenceError> {
        let window = web_sys::window()
            .ok_or_else(|| PersistenceError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| PersistenceError::Unavailable(js_message(&e)))?
            .ok_or_else(|| PersistenceError::Unavailable("localStorage is disabled".to_string()))
    }
}

impl StorageBackend for BrowserSlot {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|e| PersistenceError::Unavailable(js_message(&e)))
    }

    fn write(&self, value: &str) -> Result<(), PersistenceError> {
        self.storage()?
            .set_item(&self.key, value)
            .map_err(|e| PersistenceError::Write(js_message(&e)))
    }

    fn remove(&self) -> Result<(), PersistenceError> {
        self.storage()?
            .remove_item(&self.key)
            .map_err(|e| PersistenceError::Write(js_message(&e)))
    }

    fn on_external_change(&self, callback: ExternalChange) -> Subscription {
        let Some(window) = web_sys::window() else {
            return Subscription::noop();
        };

        let local = window.local_storage().ok().flatten();
        let key = self.key.clone();
        let listener = Closure::<dyn Fn(StorageEvent)>::new(move |event: StorageEvent| {
            let from_local = local.is_some() && event.storage_area() == local;
            if affects_slot(event.key().as_deref(), from_local, &key) {
                callback(event.new_value());
            }
        });

        if let Err(e) =
            window.add_event_listener_with_callback("storage", listener.as_ref().unchecked_ref())
        {
            log::warn!("cannot watch {} for other tabs: {}", self.key, js_message(&e));
            return Subscription::noop();
        }

        Subscription::new(move || {
            let _ = window
                .remove_event_listener_with_callback("storage", listener.as_ref().unchecked_ref());
        })
    }
}

/// Whether a `storage` event touches the slot `key`. Events from
/// `sessionStorage` share the event name and are ignored. A null event key
/// means the other tab called `localStorage.clear()`; its new value is null.
fn affects_slot(event_key: Option<&str>, from_local_storage: bool, key: &str) -> bool {
    from_local_storage && event_key.is_none_or(|changed| changed == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_storage_changes_are_ignored() {
        assert!(!affects_slot(Some("studentCards"), false, "studentCards"));
        assert!(!affects_slot(None, false, "studentCards"));
    }

    #[test]
    fn only_the_watched_key_counts() {
        assert!(affects_slot(Some("studentCards"), true, "studentCards"));
        assert!(!affects_slot(Some("theme"), true, "studentCards"));
    }

    #[test]
    fn local_storage_clear_counts() {
        assert!(affects_slot(None, true, "studentCards"));
    }
}
