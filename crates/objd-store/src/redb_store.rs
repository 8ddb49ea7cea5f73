//! Durable single-file object store backed by `redb`.
//!
//! `redb` gives ACID transactions with a single writer and concurrent
//! readers. Each [`ObjectStore`] call maps onto exactly one transaction:
//! reads use `begin_read`, writes and deletes use `begin_write`.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use redb::{Database, DatabaseError, ReadableTable, TableDefinition};

use objd_types::{ObjectKey, ObjectRecord, RecordCodec};

use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;

/// The single namespace holding every object: key → JSON-encoded record.
pub const OBJECTS_TABLE: TableDefinition<'static, &'static str, &'static [u8]> =
    TableDefinition::new("objects");

/// Pause between attempts while another handle holds the database lock.
const LOCK_RETRY_INTERVAL: Duration = Duration::from_millis(50);

/// Object store persisted in one `redb` database file.
pub struct RedbObjectStore {
    db: Database,
    path: PathBuf,
}

impl RedbObjectStore {
    /// Open (or create) the database at `path`.
    ///
    /// While the file is locked by another handle the open is retried until
    /// `timeout` elapses, then [`StoreError::LockTimeout`] is returned. Any
    /// other failure is returned immediately. The `"objects"` table is
    /// created if it does not exist yet.
    pub fn open(path: impl AsRef<Path>, timeout: Duration) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::open_with(path, timeout, |p| Database::create(p))
    }

    /// Open a database that must already exist.
    ///
    /// Same lock handling as [`RedbObjectStore::open`], but a missing file is
    /// [`StoreError::Missing`] instead of a fresh empty database.
    pub fn open_existing(path: impl AsRef<Path>, timeout: Duration) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(StoreError::Missing(path));
        }
        Self::open_with(path, timeout, |p| Database::open(p))
    }

    fn open_with<F>(path: PathBuf, timeout: Duration, open: F) -> StoreResult<Self>
    where
        F: Fn(&Path) -> Result<Database, DatabaseError>,
    {
        let started = Instant::now();
        let db = loop {
            match open(&path) {
                Ok(db) => break db,
                Err(DatabaseError::DatabaseAlreadyOpen) => {
                    let waited = started.elapsed();
                    if waited >= timeout {
                        return Err(StoreError::LockTimeout { path, waited });
                    }
                    tracing::debug!(path = %path.display(), "database locked, retrying");
                    thread::sleep(LOCK_RETRY_INTERVAL.min(timeout - waited));
                }
                Err(e) => return Err(e.into()),
            }
        };

        let store = Self { db, path };
        store.ensure_namespace()?;
        tracing::info!(path = %store.path.display(), "object store opened");
        Ok(store)
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the objects table if missing. Idempotent.
    fn ensure_namespace(&self) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        txn.open_table(OBJECTS_TABLE)?;
        txn.commit()?;
        Ok(())
    }
}

impl ObjectStore for RedbObjectStore {
    fn list_keys(&self) -> StoreResult<Vec<String>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(OBJECTS_TABLE)?;

        let mut keys = Vec::new();
        for entry in table.iter()? {
            let (key, _) = entry?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }

    fn read(&self, key: &ObjectKey) -> StoreResult<Option<ObjectRecord>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(OBJECTS_TABLE)?;

        let value = table.get(key.as_str())?;
        let record = match value {
            Some(guard) => Some(RecordCodec::decode(guard.value())?),
            None => None,
        };
        Ok(record)
    }

    fn write(&self, key: &ObjectKey, record: &ObjectRecord) -> StoreResult<()> {
        let encoded = RecordCodec::encode(record)?;

        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(OBJECTS_TABLE)?;
            table.insert(key.as_str(), encoded.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn delete(&self, key: &ObjectKey) -> StoreResult<bool> {
        let txn = self.db.begin_write()?;
        let existed = {
            let mut table = txn.open_table(OBJECTS_TABLE)?;
            let removed = table.remove(key.as_str())?;
            removed.is_some()
        };

        if existed {
            txn.commit()?;
        } else {
            txn.abort()?;
        }
        Ok(existed)
    }
}

impl std::fmt::Debug for RedbObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbObjectStore")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TIMEOUT: Duration = Duration::from_millis(200);

    fn key(raw: &str) -> ObjectKey {
        ObjectKey::parse(raw).unwrap()
    }

    fn open_temp() -> (TempDir, RedbObjectStore) {
        let dir = TempDir::new().unwrap();
        let store = RedbObjectStore::open(dir.path().join("objects.db"), TIMEOUT).unwrap();
        (dir, store)
    }

    #[test]
    fn fresh_store_is_empty() {
        let (_dir, store) = open_temp();
        assert!(store.list_keys().unwrap().is_empty());
    }

    #[test]
    fn write_and_read() {
        let (_dir, store) = open_temp();
        let rec = ObjectRecord::new("application/json", "Dane testowe");
        store.write(&key("abc"), &rec).unwrap();

        assert_eq!(store.read(&key("abc")).unwrap(), Some(rec));
        assert!(store.read(&key("abcd")).unwrap().is_none());
    }

    #[test]
    fn write_overwrites() {
        let (_dir, store) = open_temp();
        store
            .write(&key("abc"), &ObjectRecord::new("text/plain", "Dane testowe"))
            .unwrap();
        store
            .write(&key("abc"), &ObjectRecord::new("text/plain", "Nowe dane testowe"))
            .unwrap();

        let rec = store.read(&key("abc")).unwrap().unwrap();
        assert_eq!(rec.data, "Nowe dane testowe");
        assert_eq!(store.list_keys().unwrap(), vec!["abc"]);
    }

    #[test]
    fn delete_reports_existence() {
        let (_dir, store) = open_temp();
        store
            .write(&key("abc"), &ObjectRecord::new("text/plain", "x"))
            .unwrap();

        assert!(store.delete(&key("abc")).unwrap());
        assert!(!store.delete(&key("abc")).unwrap());
        assert!(store.read(&key("abc")).unwrap().is_none());
    }

    #[test]
    fn list_keys_in_storage_order() {
        let (_dir, store) = open_temp();
        for k in ["key1", "Key2", "KEY3"] {
            store
                .write(&key(k), &ObjectRecord::new("text/plain", k))
                .unwrap();
        }
        assert_eq!(store.list_keys().unwrap(), vec!["KEY3", "Key2", "key1"]);
    }

    #[test]
    fn stored_value_is_json_record() {
        let (_dir, store) = open_temp();
        store
            .write(&key("abc"), &ObjectRecord::new("application/json", "Dane testowe"))
            .unwrap();

        let txn = store.db.begin_read().unwrap();
        let table = txn.open_table(OBJECTS_TABLE).unwrap();
        let raw = table.get("abc").unwrap().unwrap();
        assert_eq!(
            raw.value(),
            br#"{"Content-Type":"application/json","Data":"Dane testowe"}"#
        );
    }

    #[test]
    fn data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("objects.db");
        {
            let store = RedbObjectStore::open(&path, TIMEOUT).unwrap();
            store
                .write(&key("persist"), &ObjectRecord::new("text/plain", "still here"))
                .unwrap();
        }

        let store = RedbObjectStore::open(&path, TIMEOUT).unwrap();
        let rec = store.read(&key("persist")).unwrap().unwrap();
        assert_eq!(rec.data, "still here");
    }

    #[test]
    fn open_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("objects.db");
        let store = RedbObjectStore::open(&path, TIMEOUT).unwrap();
        assert_eq!(store.path(), path.as_path());
        assert!(path.exists());
    }

    #[test]
    fn open_existing_refuses_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("typo.db");
        let err = RedbObjectStore::open_existing(&path, TIMEOUT).unwrap_err();

        assert!(matches!(err, StoreError::Missing(ref p) if p == &path), "got {err:?}");
        assert!(!path.exists());
    }

    #[test]
    fn open_existing_sees_stored_objects() {
        let (dir, store) = open_temp();
        store
            .write(&key("abc"), &ObjectRecord::new("text/plain", "x"))
            .unwrap();
        drop(store);

        let reopened = RedbObjectStore::open_existing(dir.path().join("objects.db"), TIMEOUT).unwrap();
        assert_eq!(reopened.list_keys().unwrap(), vec!["abc"]);
    }

    #[test]
    fn locked_database_times_out() {
        let (dir, _held) = open_temp();
        let started = Instant::now();
        let err = RedbObjectStore::open(dir.path().join("objects.db"), TIMEOUT).unwrap_err();

        assert!(matches!(err, StoreError::LockTimeout { .. }), "got {err:?}");
        assert!(started.elapsed() >= TIMEOUT);
    }
}
