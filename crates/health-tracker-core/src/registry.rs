//! Append-only entity registries (patients, emergency contacts).
//!
//! A registry owns the in-memory list for one storage key and writes the
//! whole list back as JSON after every append. Records are never edited or
//! removed.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::timestamp_id;
use crate::store::{KeyValueStore, StoreError};

/// Registry errors.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// A record kept in an [`EntityRegistry`].
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Caller-supplied fields, everything but the id.
    type Draft;

    /// Build the record from its draft and a freshly stamped id.
    fn from_draft(id: i64, draft: Self::Draft) -> Self;

    fn id(&self) -> i64;
}

/// Ordered, append-only list mirrored to one storage key.
pub struct EntityRegistry<T: Entity> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    items: Vec<T>,
}

impl<T: Entity> EntityRegistry<T> {
    /// Load the list persisted under `key`.
    ///
    /// Absent or malformed data yields an empty list; the parse failure is
    /// logged and not returned. A failed store read is returned, since an
    /// empty list would overwrite the saved one on the next append.
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> RegistryResult<Self> {
        let key = key.into();
        let items = match store.get(&key)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(key = %key, error = %e, "discarding malformed persisted list");
                Vec::new()
            }),
            None => Vec::new(),
        };
        debug!(key = %key, count = items.len(), "registry loaded");
        Ok(Self { store, key, items })
    }

    /// Append a record built from `draft` and persist the full list.
    pub fn add(&mut self, draft: T::Draft) -> RegistryResult<&T> {
        let entity = T::from_draft(timestamp_id(), draft);
        self.push(entity)
    }

    /// Append an already-built record and persist the full list.
    pub fn push(&mut self, entity: T) -> RegistryResult<&T> {
        let mut next = self.items.clone();
        next.push(entity);
        let json = serde_json::to_string(&next)?;
        self.store.set(&self.key, &json)?;
        self.items = next;

        debug!(key = %self.key, count = self.items.len(), "registry appended");
        Ok(&self.items[self.items.len() - 1])
    }

    /// Records in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactDraft, EmergencyContact, Patient, PatientDraft};
    use crate::store::{MemoryStore, StoreResult};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn store() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn test_add_grows_by_one_and_persists() {
        let store = store();
        let mut patients = EntityRegistry::<Patient>::load(store.clone(), "patients").unwrap();
        assert!(patients.is_empty());

        let added = patients.add(PatientDraft::new("A", "30", "X")).unwrap().clone();
        assert_eq!(patients.len(), 1);
        assert_eq!(added.name, "A");

        let reloaded = EntityRegistry::<Patient>::load(store, "patients").unwrap();
        assert_eq!(reloaded.items(), &[added]);
    }

    #[test]
    fn test_preserves_insertion_order() {
        let store = store();
        let mut contacts =
            EntityRegistry::<EmergencyContact>::load(store.clone(), "contacts").unwrap();
        contacts.add(ContactDraft::new("First", "1", "a")).unwrap();
        contacts.add(ContactDraft::new("Second", "2", "b")).unwrap();
        contacts.add(ContactDraft::new("Third", "3", "c")).unwrap();

        let names: Vec<_> = EntityRegistry::<EmergencyContact>::load(store, "contacts")
            .unwrap()
            .items()
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_malformed_data_resets_to_empty() {
        let store = store();
        store.set("patients", "{not json").unwrap();

        let patients = EntityRegistry::<Patient>::load(store, "patients").unwrap();
        assert!(patients.is_empty());
    }

    #[test]
    fn test_wrong_shape_resets_to_empty() {
        let store = store();
        store.set("patients", r#"{"id": 1}"#).unwrap();

        let patients = EntityRegistry::<Patient>::load(store, "patients").unwrap();
        assert!(patients.is_empty());
    }

    #[test]
    fn test_add_after_malformed_overwrites() {
        let store = store();
        store.set("patients", "garbage").unwrap();

        let mut patients = EntityRegistry::<Patient>::load(store.clone(), "patients").unwrap();
        patients.add(PatientDraft::new("A", "30", "X")).unwrap();

        let raw = store.get("patients").unwrap().unwrap();
        let parsed: Vec<Patient> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_ids_are_timestamps() {
        let before = chrono::Utc::now().timestamp_millis();
        let mut patients = EntityRegistry::<Patient>::load(store(), "patients").unwrap();
        let id = patients.add(PatientDraft::default()).unwrap().id();
        let after = chrono::Utc::now().timestamp_millis();
        assert!(id >= before && id <= after);
    }

    /// Store whose reads can be switched off.
    #[derive(Default)]
    struct UnreadableStore {
        inner: MemoryStore,
        reads_fail: AtomicBool,
    }

    impl KeyValueStore for UnreadableStore {
        fn get(&self, key: &str) -> StoreResult<Option<String>> {
            if self.reads_fail.load(Ordering::SeqCst) {
                return Err(StoreError::Poisoned);
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> StoreResult<()> {
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> StoreResult<()> {
            self.inner.remove(key)
        }

        fn clear(&self) -> StoreResult<()> {
            self.inner.clear()
        }
    }

    #[test]
    fn test_read_failure_is_returned_and_keeps_saved_list() {
        let store = Arc::new(UnreadableStore::default());
        let shared: Arc<dyn KeyValueStore> = store.clone();

        let mut patients = EntityRegistry::<Patient>::load(shared.clone(), "patients").unwrap();
        patients.add(PatientDraft::new("A", "30", "X")).unwrap();
        patients.add(PatientDraft::new("B", "41", "Y")).unwrap();

        store.reads_fail.store(true, Ordering::SeqCst);
        let result = EntityRegistry::<Patient>::load(shared.clone(), "patients");
        assert!(matches!(result, Err(RegistryError::Store(_))));

        store.reads_fail.store(false, Ordering::SeqCst);
        let names: Vec<_> = EntityRegistry::<Patient>::load(shared, "patients")
            .unwrap()
            .items()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_keys_are_independent() {
        let store = store();
        let mut patients = EntityRegistry::<Patient>::load(store.clone(), "patients").unwrap();
        patients.add(PatientDraft::new("A", "30", "X")).unwrap();

        let contacts = EntityRegistry::<EmergencyContact>::load(store, "contacts").unwrap();
        assert!(contacts.is_empty());
    }
}
