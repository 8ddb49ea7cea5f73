//! Object storage for objd.
//!
//! Objects live in a single namespace (the `"objects"` table) keyed by
//! [`ObjectKey`](objd_types::ObjectKey). Values are JSON-encoded
//! [`ObjectRecord`](objd_types::ObjectRecord)s.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`RedbObjectStore`] -- durable single-file store on top of `redb`
//! - [`InMemoryObjectStore`] -- `BTreeMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Every operation runs in exactly one backend transaction.
//! 2. Reads use read transactions and never observe a partial write.
//! 3. Writes are serialized by the backend (single writer).
//! 4. A write under an existing key replaces the record in place.
//! 5. Keys are listed in storage order (byte order of the key).
//! 6. All backend errors are propagated, never retried.

pub mod error;
pub mod memory;
pub mod redb_store;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryObjectStore;
pub use redb_store::{RedbObjectStore, OBJECTS_TABLE};
pub use traits::ObjectStore;
