//! The payment card entry type and its projections.
//!
//! Only the card number and CVV are sensitive; they are stored as
//! ciphertext.  Cards keep no rotation history — reuse prevention
//! applies to passwords only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{base64_decode, base64_encode};

/// A stored payment card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardRecord {
    /// Opaque unique id, assigned at creation.
    pub id: String,

    /// The owning user.  Set once at creation, never mutated.
    pub owner_id: String,

    /// User-chosen label, unique per (owner, label).
    pub label: String,

    pub holder_name: String,

    /// Expiry in display form (e.g. "12/27").  Not sensitive.
    pub expiry: String,

    /// Card network (e.g. "Visa").
    pub card_type: String,

    #[serde(default)]
    pub notes: String,

    /// Ciphertext of the card number (nonce + ciphertext).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub number_ciphertext: Vec<u8>,

    /// Ciphertext of the security code (nonce + ciphertext).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub cvv_ciphertext: Vec<u8>,

    /// Optimistic-concurrency counter, bumped by storage on every write.
    #[serde(default)]
    pub version: u64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing projection — never carries any ciphertext.
#[derive(Debug, Clone)]
pub struct CardSummary {
    pub id: String,
    pub label: String,
    pub holder_name: String,
    pub expiry: String,
    pub card_type: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl From<&CardRecord> for CardSummary {
    fn from(record: &CardRecord) -> Self {
        Self {
            id: record.id.clone(),
            label: record.label.clone(),
            holder_name: record.holder_name.clone(),
            expiry: record.expiry.clone(),
            card_type: record.card_type.clone(),
            notes: record.notes.clone(),
            created_at: record.created_at,
        }
    }
}

/// Full decrypted view, returned only by the explicit details operation.
#[derive(Debug)]
pub struct CardDetails {
    pub id: String,
    pub label: String,
    pub holder_name: String,
    /// The decrypted card number.
    pub number: String,
    /// The decrypted security code.
    pub cvv: String,
    pub expiry: String,
    pub card_type: String,
    pub notes: String,
}

/// Partial update for a card: one optional slot per mutable field.
///
/// Only fields that are `Some` are applied; `number` and `cvv` are
/// re-encrypted on the way in.
#[derive(Debug, Default, Clone)]
pub struct CardUpdate {
    pub label: Option<String>,
    pub holder_name: Option<String>,
    pub number: Option<String>,
    pub expiry: Option<String>,
    pub cvv: Option<String>,
    pub card_type: Option<String>,
    pub notes: Option<String>,
}

impl CardUpdate {
    /// True when no field is present — nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.holder_name.is_none()
            && self.number.is_none()
            && self.expiry.is_none()
            && self.cvv.is_none()
            && self.card_type.is_none()
            && self.notes.is_none()
    }
}
