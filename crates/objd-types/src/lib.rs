//! Foundation types for objd.
//!
//! objd stores small opaque objects under restricted-alphabet keys. This
//! crate holds everything the storage and HTTP layers agree on.
//!
//! # Key Types
//!
//! - [`ObjectKey`]: Validated object identifier (`[a-zA-Z0-9]{1,100}`)
//! - [`ObjectRecord`]: Stored record: content type plus payload
//! - [`RecordCodec`]: JSON wire form shared by storage and HTTP responses
//!
//! # Limits
//!
//! - [`MAX_KEY_LEN`]: maximum identifier length in characters
//! - [`MAX_PAYLOAD_SIZE`]: maximum payload size in bytes

pub mod codec;
pub mod error;
pub mod key;
pub mod record;

pub use codec::RecordCodec;
pub use error::{TypeError, TypeResult};
pub use key::{ObjectKey, MAX_KEY_LEN};
pub use record::{ObjectRecord, MAX_PAYLOAD_SIZE};
