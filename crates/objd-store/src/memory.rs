use std::collections::BTreeMap;
use std::sync::RwLock;

use objd_types::{ObjectKey, ObjectRecord, RecordCodec};

use crate::error::StoreResult;
use crate::traits::ObjectStore;

/// In-memory, `BTreeMap`-based object store.
///
/// Intended for tests and embedding. Records are held in their encoded form,
/// exactly as the durable backend stores them, and keys iterate in the same
/// byte order.
pub struct InMemoryObjectStore {
    objects: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn list_keys(&self) -> StoreResult<Vec<String>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.keys().cloned().collect())
    }

    fn read(&self, key: &ObjectKey) -> StoreResult<Option<ObjectRecord>> {
        let map = self.objects.read().expect("lock poisoned");
        match map.get(key.as_str()) {
            Some(bytes) => Ok(Some(RecordCodec::decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn write(&self, key: &ObjectKey, record: &ObjectRecord) -> StoreResult<()> {
        let encoded = RecordCodec::encode(record)?;
        let mut map = self.objects.write().expect("lock poisoned");
        map.insert(key.to_string(), encoded);
        Ok(())
    }

    fn delete(&self, key: &ObjectKey) -> StoreResult<bool> {
        let mut map = self.objects.write().expect("lock poisoned");
        Ok(map.remove(key.as_str()).is_some())
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &count)
            .finish()
    }
}
