//! HTTP server for objd.
//!
//! Exposes the object store as a small REST API:
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/api/objects/` | 200, JSON array of ids |
//! | PUT | `/api/objects/{id}` | 201, empty body |
//! | GET | `/api/objects/{id}` | 200, JSON record |
//! | DELETE | `/api/objects/{id}` | 200, empty body |
//!
//! Ids must match `[a-zA-Z0-9]{1,100}`; payloads are capped at 1024 bytes.
//! Every other path under `/api/objects/` is answered with 400.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod service;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::ObjdServer;
pub use service::ObjectService;
