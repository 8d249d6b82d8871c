//! Change observers keyed by content URI.

use crate::error::{Error, Result};
use crate::uri::ContentUri;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Callback invoked with the URI that changed.
pub type ChangeCallback = Arc<dyn Fn(&ContentUri) + Send + Sync>;

/// Handle returned by observer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

struct Registration {
    id: ObserverId,
    uri: ContentUri,
    descendants: bool,
    callback: ChangeCallback,
}

impl Registration {
    /// A change at `changed` reaches observers on that URI, on any URI below
    /// it, and on ancestors that asked for descendant changes.
    fn matches(&self, changed: &ContentUri) -> bool {
        self.uri == *changed
            || changed.is_ancestor_of(&self.uri)
            || (self.descendants && self.uri.is_ancestor_of(changed))
    }
}

/// Thread-safe set of observers.
pub struct ObserverRegistry {
    next_id: AtomicU64,
    entries: RwLock<Vec<Registration>>,
}

impl ObserverRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Adds an observer.
    pub fn register(
        &self,
        uri: &ContentUri,
        notify_for_descendants: bool,
        callback: ChangeCallback,
    ) -> Result<ObserverId> {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut entries = self.entries.write().map_err(|_| Error::LockPoisoned)?;
        entries.push(Registration {
            id,
            uri: uri.clone(),
            descendants: notify_for_descendants,
            callback,
        });
        Ok(id)
    }

    /// Removes an observer, returning whether it was present.
    pub fn unregister(&self, id: ObserverId) -> Result<bool> {
        let mut entries = self.entries.write().map_err(|_| Error::LockPoisoned)?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        Ok(entries.len() != before)
    }

    /// Number of registered observers.
    pub fn len(&self) -> Result<usize> {
        Ok(self.entries.read().map_err(|_| Error::LockPoisoned)?.len())
    }

    /// True when no observer is registered.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Invokes every matching observer and returns how many ran.
    ///
    /// Callbacks run after the registry lock is released, so they may
    /// register or unregister observers themselves.
    pub fn notify(&self, changed: &ContentUri) -> Result<usize> {
        let callbacks: Vec<ChangeCallback> = {
            let entries = self.entries.read().map_err(|_| Error::LockPoisoned)?;
            entries
                .iter()
                .filter(|entry| entry.matches(changed))
                .map(|entry| Arc::clone(&entry.callback))
                .collect()
        };

        for callback in &callbacks {
            callback(changed);
        }
        Ok(callbacks.len())
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.entries.read().map(|e| e.len()).unwrap_or_default();
        f.debug_struct("ObserverRegistry")
            .field("observers", &count)
            .finish()
    }
}
