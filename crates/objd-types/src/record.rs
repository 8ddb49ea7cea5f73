use serde::{Deserialize, Serialize};

/// Maximum payload size in bytes.
pub const MAX_PAYLOAD_SIZE: usize = 1024;

/// The stored record: the payload's content type plus the payload itself.
///
/// Field names on the wire are `Content-Type` and `Data`, in that order.
/// External clients match on the exact spelling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRecord {
    #[serde(rename = "Content-Type")]
    pub content_type: String,
    #[serde(rename = "Data")]
    pub data: String,
}

impl ObjectRecord {
    pub fn new(content_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Build a record from a raw request body.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD.
    pub fn from_body(content_type: impl Into<String>, body: &[u8]) -> Self {
        Self::new(content_type, String::from_utf8_lossy(body))
    }

    /// Payload size in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
