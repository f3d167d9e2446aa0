//! In-memory catalog with atomically replaced snapshots.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use extgate_types::ExtensionRecord;

/// Immutable view of every known extension at one point in time.
#[derive(Debug, Default)]
pub struct Snapshot {
    generation: u64,
    extensions: HashMap<String, ExtensionRecord>,
}

impl Snapshot {
    pub fn new(generation: u64, extensions: HashMap<String, ExtensionRecord>) -> Self {
        Self {
            generation,
            extensions,
        }
    }

    /// Monotonic counter of the replacement that installed this snapshot.
    /// The initial empty snapshot is generation 0.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, id: &str) -> Option<&ExtensionRecord> {
        self.extensions.get(id)
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtensionRecord> {
        self.extensions.values()
    }

    /// Records ordered by id, for stable listings.
    pub fn sorted(&self) -> Vec<&ExtensionRecord> {
        let mut records: Vec<_> = self.extensions.values().collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records
    }
}

/// Shared catalog of extensions.
///
/// Readers grab an `Arc` to the current [`Snapshot`] and work on it without
/// holding any lock. The write lock is only taken to swap the pointer, so a
/// reader sees either the whole old snapshot or the whole new one.
#[derive(Debug)]
pub struct Catalog {
    current: RwLock<Arc<Snapshot>>,
    generation: AtomicU64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot::default())),
            generation: AtomicU64::new(0),
        }
    }

    /// Create a catalog already holding `records`.
    pub fn with_records(records: impl IntoIterator<Item = ExtensionRecord>) -> Self {
        let catalog = Self::new();
        catalog.replace(into_map(records));
        catalog
    }

    /// The snapshot currently installed. Callers should take this once per
    /// request and answer the whole request from it.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn lookup(&self, id: &str) -> Option<ExtensionRecord> {
        self.snapshot().get(id).cloned()
    }

    pub fn size(&self) -> usize {
        self.snapshot().len()
    }

    /// Install a new snapshot built from `extensions` and return its
    /// generation.
    pub fn replace(&self, extensions: HashMap<String, ExtensionRecord>) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(Snapshot::new(generation, extensions));

        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        // Two writers racing must not roll the catalog back to an older load.
        if current.generation() < generation {
            *current = snapshot;
        }

        generation
    }
}

/// Key records by their id. Later records win on duplicate ids.
pub fn into_map(
    records: impl IntoIterator<Item = ExtensionRecord>,
) -> HashMap<String, ExtensionRecord> {
    records
        .into_iter()
        .map(|record| (record.id.clone(), record))
        .collect()
}
