//! Record types stored in a vault.
//!
//! Two record kinds exist: `CredentialRecord` (a password entry with a
//! rotation history) and `CardRecord` (a payment card).  Both are plain
//! data — persistence and encryption happen elsewhere.

pub mod card;
pub mod credential;

pub use card::{CardDetails, CardRecord, CardSummary, CardUpdate};
pub use credential::{CredentialDetails, CredentialRecord, CredentialSummary};

use rand::RngCore;

/// Generate a new opaque record id: 16 random bytes as 32 hex chars.
///
/// Assigned once at creation and never changed.
pub fn new_record_id() -> String {
    use std::fmt::Write;

    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    let mut id = String::with_capacity(32);
    for b in bytes {
        let _ = write!(id, "{b:02x}");
    }
    id
}

// ---------------------------------------------------------------------------
// Serde helpers for base64-encoded ciphertext fields
// ---------------------------------------------------------------------------

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;

pub(crate) fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let encoded = BASE64.encode(data);
    serializer.serialize_str(&encoded)
}

pub(crate) fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}

/// Like `base64_encode`, but for a sequence of ciphertexts (the
/// password history).
pub(crate) fn base64_encode_seq<S>(
    data: &[Vec<u8>],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeSeq;
    let mut seq = serializer.serialize_seq(Some(data.len()))?;
    for item in data {
        seq.serialize_element(&BASE64.encode(item))?;
    }
    seq.end()
}

pub(crate) fn base64_decode_seq<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<Vec<u8>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let strings = Vec::<String>::deserialize(deserializer)?;
    strings
        .into_iter()
        .map(|s| BASE64.decode(&s).map_err(serde::de::Error::custom))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_ids_are_32_hex_chars() {
        let id = new_record_id();
        assert_eq!(id.len(), 32);
        assert!(id.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn record_ids_are_unique() {
        let a = new_record_id();
        let b = new_record_id();
        assert_ne!(a, b);
    }
}
