use super::error::PersistenceError;

/// Callback invoked with the new slot value after another writer changed it;
/// `None` means the slot was removed.
pub type ExternalChange = Box<dyn Fn(Option<String>)>;

/// One durable, named key-value slot holding the encoded card list.
///
/// `on_external_change` only reports writes made by *other* handles to the
/// same slot (another browser tab), never the handle's own writes.
pub trait StorageBackend {
    fn read(&self) -> Result<Option<String>, PersistenceError>;
    fn write(&self, value: &str) -> Result<(), PersistenceError>;
    fn remove(&self) -> Result<(), PersistenceError>;
    fn on_external_change(&self, callback: ExternalChange) -> Subscription;
}

/// Scoped registration. Dropping it runs the release action exactly once.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release, for backends that never see
    /// external writers.
    pub fn noop() -> Self {
        Self { release: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
