//! The object façade: request validation and CRUD orchestration over an
//! [`ObjectStore`].
//!
//! Each operation is one backend transaction. Backend calls are synchronous,
//! so they run on tokio's blocking pool.

use std::sync::Arc;

use objd_store::{ObjectStore, StoreResult};
use objd_types::{ObjectKey, ObjectRecord, MAX_PAYLOAD_SIZE};

use crate::error::{ServerError, ServerResult};

/// Shared handle to the object store, injected into every handler.
#[derive(Clone)]
pub struct ObjectService {
    store: Arc<dyn ObjectStore>,
}

impl ObjectService {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// All object keys in storage order.
    pub async fn list(&self) -> ServerResult<Vec<String>> {
        self.run(|store| store.list_keys()).await
    }

    /// Fetch the record under `key`, or [`ServerError::NotFound`].
    pub async fn get(&self, key: ObjectKey) -> ServerResult<ObjectRecord> {
        let lookup = key.clone();
        self.run(move |store| store.read(&lookup))
            .await?
            .ok_or_else(|| ServerError::NotFound(key.to_string()))
    }

    /// Admission checks that run before the request body is read.
    ///
    /// The key itself was already validated by [`ObjectKey::parse`]; this
    /// covers the declared body length and the content type, in that order.
    /// Returns the content type to store.
    pub fn check_put(declared_len: Option<u64>, content_type: Option<&str>) -> ServerResult<String> {
        if declared_len.is_some_and(|len| len > MAX_PAYLOAD_SIZE as u64) {
            return Err(ServerError::PayloadTooLarge { max: MAX_PAYLOAD_SIZE });
        }
        match content_type {
            Some(ct) if !ct.is_empty() => Ok(ct.to_string()),
            _ => Err(ServerError::MissingContentType),
        }
    }

    /// Create or fully replace the record under `key`.
    ///
    /// Overwrites are silent; the caller reports "created" either way.
    pub async fn put(&self, key: ObjectKey, content_type: String, body: &[u8]) -> ServerResult<()> {
        if body.len() > MAX_PAYLOAD_SIZE {
            return Err(ServerError::PayloadTooLarge { max: MAX_PAYLOAD_SIZE });
        }
        if content_type.is_empty() {
            return Err(ServerError::MissingContentType);
        }

        let record = ObjectRecord::from_body(content_type, body);
        let size = record.size();
        let stored = key.clone();
        self.run(move |store| store.write(&stored, &record)).await?;
        tracing::debug!(key = %key, size, "object stored");
        Ok(())
    }

    /// Delete the record under `key`, or [`ServerError::NotFound`] if there
    /// was nothing to delete.
    pub async fn delete(&self, key: ObjectKey) -> ServerResult<()> {
        let target = key.clone();
        if self.run(move |store| store.delete(&target)).await? {
            tracing::debug!(key = %key, "object deleted");
            Ok(())
        } else {
            Err(ServerError::NotFound(key.to_string()))
        }
    }

    async fn run<T, F>(&self, op: F) -> ServerResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ObjectStore) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let result = tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| ServerError::Internal(format!("store task failed: {e}")))?;
        Ok(result?)
    }
}

impl std::fmt::Debug for ObjectService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectService").finish_non_exhaustive()
    }
}
