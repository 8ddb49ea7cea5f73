use crate::error::{TypeError, TypeResult};
use crate::record::ObjectRecord;

/// JSON codec for [`ObjectRecord`].
///
/// The same bytes are written to the store and returned to HTTP clients:
/// `{"Content-Type":"<type>","Data":"<payload>"}`.
pub struct RecordCodec;

impl RecordCodec {
    pub fn encode(record: &ObjectRecord) -> TypeResult<Vec<u8>> {
        serde_json::to_vec(record).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    pub fn decode(data: &[u8]) -> TypeResult<ObjectRecord> {
        serde_json::from_slice(data).map_err(|e| TypeError::Deserialization(e.to_string()))
    }

    /// Encode a list of keys as a JSON array. An empty list encodes as `[]`.
    pub fn encode_keys<S: AsRef<str>>(keys: &[S]) -> TypeResult<Vec<u8>> {
        let keys: Vec<&str> = keys.iter().map(AsRef::as_ref).collect();
        serde_json::to_vec(&keys).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exact_wire_form() {
        let rec = ObjectRecord::new("application/json", "Dane testowe");
        let bytes = RecordCodec::encode(&rec).unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"Content-Type":"application/json","Data":"Dane testowe"}"#
        );
    }

    #[test]
    fn payload_is_escaped() {
        let rec = ObjectRecord::new("text/plain", "say \"hi\"\n");
        let bytes = RecordCodec::encode(&rec).unwrap();
        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"{"Content-Type":"text/plain","Data":"say \"hi\"\n"}"#
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            RecordCodec::decode(b"not json"),
            Err(TypeError::Deserialization(_))
        ));
        assert!(RecordCodec::decode(br#"{"Data":"x"}"#).is_err());
    }

    #[test]
    fn empty_key_list_is_empty_array() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(RecordCodec::encode_keys(&empty[..]).unwrap(), b"[]");
    }

    #[test]
    fn key_list_keeps_order() {
        let keys = ["KEY3", "Key2", "key1"];
        assert_eq!(
            RecordCodec::encode_keys(&keys[..]).unwrap(),
            br#"["KEY3","Key2","key1"]"#
        );
    }

    proptest! {
        #[test]
        fn decode_returns_what_was_encoded(
            content_type in "[ -~]{1,40}",
            data in "\\PC{0,256}",
        ) {
            let rec = ObjectRecord::new(content_type, data);
            let decoded = RecordCodec::decode(&RecordCodec::encode(&rec).unwrap()).unwrap();
            prop_assert_eq!(decoded, rec);
        }
    }
}
