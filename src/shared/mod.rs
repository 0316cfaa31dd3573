//! Shared serde helpers for the Meridian wire format.
//!
//! The node's JSON gateway renders 64-bit integers as decimal strings and
//! binary transaction payloads as base64, following the protobuf JSON
//! mapping. These modules adapt those encodings to native Rust types.

/// Serializes a `u64` as a decimal string; accepts either a string or a
/// bare number on the way in (hand-written market files tend to use bare
/// numbers, the node always sends strings).
pub mod string_u64 {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s
                .parse::<u64>()
                .map_err(|_| de::Error::custom(format!("invalid u64 string: {:?}", s))),
        }
    }
}

/// Same as [`string_u64`], for signed 64-bit fields (timestamps).
pub mod string_i64 {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s
                .parse::<i64>()
                .map_err(|_| de::Error::custom(format!("invalid i64 string: {:?}", s))),
        }
    }
}

/// `Vec<u8>` <-> base64 string, used for unsigned transaction blobs.
pub mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text.as_bytes()).map_err(de::Error::custom)
    }
}

/// `skip_serializing_if` predicate for zero-valued timestamp fields.
pub(crate) fn i64_is_zero(value: &i64) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Wire {
        #[serde(with = "super::string_u64")]
        amount: u64,
        #[serde(with = "super::string_i64")]
        at: i64,
    }

    #[test]
    fn test_string_u64_round_trip() {
        let json = serde_json::to_string(&Wire { amount: 100_000, at: -5 }).unwrap();
        assert_eq!(json, r#"{"amount":"100000","at":"-5"}"#);

        let wire: Wire = serde_json::from_str(&json).unwrap();
        assert_eq!(wire.amount, 100_000);
        assert_eq!(wire.at, -5);
    }

    #[test]
    fn test_string_u64_accepts_bare_numbers() {
        let wire: Wire = serde_json::from_str(r#"{"amount": 42, "at": 7}"#).unwrap();
        assert_eq!(wire.amount, 42);
        assert_eq!(wire.at, 7);
    }

    #[test]
    fn test_string_u64_rejects_garbage() {
        let result = serde_json::from_str::<Wire>(r#"{"amount": "12x", "at": "0"}"#);
        assert!(result.is_err());
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Blob {
        #[serde(with = "super::base64_bytes")]
        blob: Vec<u8>,
    }

    #[test]
    fn test_base64_bytes() {
        let json = serde_json::to_string(&Blob { blob: b"meridian".to_vec() }).unwrap();
        assert_eq!(json, r#"{"blob":"bWVyaWRpYW4="}"#);

        let blob: Blob = serde_json::from_str(&json).unwrap();
        assert_eq!(blob.blob, b"meridian");
    }

    #[test]
    fn test_base64_bytes_rejects_invalid() {
        assert!(serde_json::from_str::<Blob>(r#"{"blob":"!!"}"#).is_err());
    }
}
