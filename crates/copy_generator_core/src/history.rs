//! crates/copy_generator_core/src/history.rs
//!
//! A bounded, newest-first record of past generations, mirrored into a
//! key/value store after every change.
//!
//! Persistence is best-effort in both directions: an unreadable or corrupt
//! stored value starts the cache empty, and a failed write leaves the
//! in-memory sequence updated. Neither is reported to the caller.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{FormState, HistoryEntry, HistoryId};
use crate::ports::KeyValueStore;

/// Storage key the serialized history lives under.
pub const HISTORY_STORAGE_KEY: &str = "copygen_history_v1";

/// Maximum number of entries kept.
pub const HISTORY_CAPACITY: usize = 25;

pub struct HistoryCache {
    entries: Vec<HistoryEntry>,
    store: Arc<dyn KeyValueStore>,
    last_id: HistoryId,
}

impl HistoryCache {
    /// Loads the cache from `store`, falling back to an empty history.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let mut entries = match store.get(HISTORY_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Stored history is malformed, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read stored history, starting empty: {}", e);
                Vec::new()
            }
        };
        entries.truncate(HISTORY_CAPACITY);
        info!("Loaded {} history entries.", entries.len());

        let last_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        Self {
            entries,
            store,
            last_id,
        }
    }

    /// Records a finished generation at the front and returns its id.
    pub fn record(&mut self, form: FormState, output: String) -> HistoryId {
        let id = self.next_id();
        self.append(HistoryEntry { id, form, output });
        id
    }

    /// Inserts `entry` at the front, evicting from the back beyond capacity.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.last_id = self.last_id.max(entry.id);
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist();
    }

    /// Looks up an entry without touching the sequence.
    pub fn restore(&self, id: HistoryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // Current epoch millis, bumped past anything handed out or loaded before.
    fn next_id(&mut self) -> HistoryId {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    fn persist(&mut self) {
        self.entries.truncate(HISTORY_CAPACITY);
        let raw = match serde_json::to_string(&self.entries) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not serialize history: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(HISTORY_STORAGE_KEY, &raw) {
            warn!("Could not persist history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BulletCount, CopyLength, Tone};
    use crate::testing::MemoryStore;

    fn form(name: &str) -> FormState {
        FormState {
            name: name.to_string(),
            tone: Tone::Professional,
            length: CopyLength::Long,
            bullet_count: BulletCount::new(5),
            ..FormState::default()
        }
    }

    #[test]
    fn missing_key_starts_empty() {
        let cache = HistoryCache::load(Arc::new(MemoryStore::default()));
        assert!(cache.is_empty());
    }

    #[test]
    fn invalid_json_starts_empty() {
        let store = MemoryStore::with_value(HISTORY_STORAGE_KEY, "{not json");
        let cache = HistoryCache::load(Arc::new(store));
        assert!(cache.is_empty());
    }

    #[test]
    fn unreadable_store_starts_empty() {
        let cache = HistoryCache::load(Arc::new(MemoryStore::failing_reads()));
        assert!(cache.is_empty());
    }

    #[test]
    fn record_puts_newest_first_and_persists() {
        let store = Arc::new(MemoryStore::default());
        let mut cache = HistoryCache::load(store.clone());

        let first = cache.record(form("Mug"), "One".to_string());
        let second = cache.record(form("Kettle"), "Two".to_string());

        assert!(second > first);
        assert_eq!(cache.entries()[0].form.name, "Kettle");
        assert_eq!(cache.entries()[1].form.name, "Mug");

        let stored: Vec<HistoryEntry> =
            serde_json::from_str(&store.value(HISTORY_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(stored, cache.entries());
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let store = Arc::new(MemoryStore::default());
        let mut cache = HistoryCache::load(store.clone());

        for i in 0..(HISTORY_CAPACITY * 2 + 3) {
            cache.record(form(&format!("Item {i}")), format!("Copy {i}"));
            assert!(cache.len() <= HISTORY_CAPACITY);
        }

        assert_eq!(cache.len(), HISTORY_CAPACITY);
        let newest = HISTORY_CAPACITY * 2 + 2;
        assert_eq!(cache.entries()[0].form.name, format!("Item {newest}"));
        let stored: Vec<HistoryEntry> =
            serde_json::from_str(&store.value(HISTORY_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(stored.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn oversized_stored_history_is_trimmed() {
        let entries: Vec<HistoryEntry> = (0..40)
            .map(|i| HistoryEntry {
                id: 1000 - i,
                form: form("Old"),
                output: String::new(),
            })
            .collect();
        let store = MemoryStore::with_value(
            HISTORY_STORAGE_KEY,
            &serde_json::to_string(&entries).unwrap(),
        );

        let cache = HistoryCache::load(Arc::new(store));

        assert_eq!(cache.len(), HISTORY_CAPACITY);
        assert_eq!(cache.entries()[0].id, 1000);
    }

    #[test]
    fn ids_stay_ahead_of_loaded_entries() {
        let future = Utc::now().timestamp_millis() + 60_000;
        let stored = vec![HistoryEntry {
            id: future,
            form: form("From the future"),
            output: "Later".to_string(),
        }];
        let store = MemoryStore::with_value(
            HISTORY_STORAGE_KEY,
            &serde_json::to_string(&stored).unwrap(),
        );
        let mut cache = HistoryCache::load(Arc::new(store));

        let id = cache.record(form("Now"), "Now".to_string());

        assert_eq!(id, future + 1);
    }

    #[test]
    fn restore_is_a_pure_read() {
        let mut cache = HistoryCache::load(Arc::new(MemoryStore::default()));
        let id = cache.record(form("Mug"), "One".to_string());
        cache.record(form("Kettle"), "Two".to_string());
        let before = cache.entries().to_vec();

        let entry = cache.restore(id).cloned().unwrap();
        let again = cache.restore(id).cloned().unwrap();

        assert_eq!(entry, again);
        assert_eq!(entry.form, form("Mug"));
        assert_eq!(entry.output, "One");
        assert_eq!(cache.entries(), before.as_slice());
        assert!(cache.restore(-1).is_none());
    }

    #[test]
    fn failed_writes_still_update_memory() {
        let mut cache = HistoryCache::load(Arc::new(MemoryStore::failing_writes()));
        cache.record(form("Mug"), "One".to_string());
        assert_eq!(cache.len(), 1);
    }
}
