use objd_types::{ObjectKey, ObjectRecord};

use crate::error::StoreResult;

/// Keyed object store.
///
/// All implementations must satisfy these invariants:
/// - An object exists iff a record is retrievable under its exact key.
/// - Each call is atomic: readers see either the old or the new record,
///   never a mix.
/// - `write` is an upsert; there is no separate create/update path.
/// - The store does not validate record contents. Callers reject empty
///   content types and oversized payloads before writing.
pub trait ObjectStore: Send + Sync {
    /// All keys in storage order.
    fn list_keys(&self) -> StoreResult<Vec<String>>;

    /// Read the record stored under `key`.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    fn read(&self, key: &ObjectKey) -> StoreResult<Option<ObjectRecord>>;

    /// Create or fully replace the record stored under `key`.
    fn write(&self, key: &ObjectKey, record: &ObjectRecord) -> StoreResult<()>;

    /// Delete the record under `key`. Returns `true` if the object existed.
    ///
    /// The existence check and the removal happen in the same write
    /// transaction.
    fn delete(&self, key: &ObjectKey) -> StoreResult<bool>;
}
