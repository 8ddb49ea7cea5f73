//! Object key validation.
//!
//! Valid keys:
//! - Must be non-empty
//! - Must contain only ASCII letters and digits (`[a-zA-Z0-9]`)
//! - Must be at most [`MAX_KEY_LEN`] characters long
//!
//! Syntax is checked before length, so a key that is both too long and
//! malformed reports the syntax error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// Maximum identifier length in characters.
pub const MAX_KEY_LEN: usize = 100;

/// A validated object identifier.
///
/// The store's key space is the identifier space: two records never share a
/// key, and a write under an existing key replaces the record.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Parse and validate a raw identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use objd_types::ObjectKey;
    ///
    /// assert!(ObjectKey::parse("abc123").is_ok());
    /// assert!(ObjectKey::parse("").is_err());
    /// assert!(ObjectKey::parse("abc-").is_err());
    /// ```
    pub fn parse(raw: &str) -> TypeResult<Self> {
        Self::check_syntax(raw)?;
        // ASCII-only at this point, so bytes == characters.
        if raw.len() > MAX_KEY_LEN {
            return Err(TypeError::KeyTooLong {
                len: raw.len(),
                max: MAX_KEY_LEN,
            });
        }
        Ok(Self(raw.to_string()))
    }

    /// Check `^[a-zA-Z0-9]+$` without the length limit.
    pub fn check_syntax(raw: &str) -> TypeResult<()> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(TypeError::InvalidKeySyntax(raw.to_string()));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({})", self.0)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ObjectKey {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ObjectKey {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ObjectKey> for String {
    fn from(key: ObjectKey) -> Self {
        key.0
    }
}
