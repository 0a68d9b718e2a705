//! The password entry type and its projections.
//!
//! `CredentialRecord` keeps the active password ciphertext plus an
//! append-only history of every ciphertext the entry has ever held.
//! Ciphertext fields use custom serde helpers so they serialize as
//! base64 strings in JSON rather than raw byte arrays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{base64_decode, base64_decode_seq, base64_encode, base64_encode_seq};

/// A stored password entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Opaque unique id, assigned at creation.
    pub id: String,

    /// The owning user.  Set once at creation, never mutated.
    pub owner_id: String,

    /// User-chosen label, unique per (owner, name).
    pub name: String,

    /// Optional display username (not sensitive).
    #[serde(default)]
    pub username: String,

    /// Ciphertext of the active password (nonce + ciphertext).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub secret: Vec<u8>,

    /// Append-only chronological ciphertext history.  The last entry
    /// is always the current `secret`.
    #[serde(
        serialize_with = "base64_encode_seq",
        deserialize_with = "base64_decode_seq"
    )]
    pub secret_history: Vec<Vec<u8>>,

    /// Optimistic-concurrency counter, bumped by storage on every write.
    #[serde(default)]
    pub version: u64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Number of passwords this entry has held (current one included).
    pub fn history_len(&self) -> usize {
        self.secret_history.len()
    }
}

/// Listing projection — never carries any ciphertext.
#[derive(Debug, Clone)]
pub struct CredentialSummary {
    pub id: String,
    pub name: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&CredentialRecord> for CredentialSummary {
    fn from(record: &CredentialRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            username: record.username.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Full decrypted view, returned only by the explicit details operation.
#[derive(Debug)]
pub struct CredentialDetails {
    pub id: String,
    pub name: String,
    pub username: String,
    /// The decrypted password.
    pub password: String,
    pub created_at: DateTime<Utc>,
}
