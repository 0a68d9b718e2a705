//! High-level vault operations used by CLI commands.
//!
//! `VaultService` composes the cipher engine, the rotation gate, and a
//! `Storage` collaborator under per-owner scoping: every operation is
//! implicitly filtered to records belonging to the requesting owner,
//! and a record owned by someone else is indistinguishable from one
//! that does not exist.
//!
//! Listing operations return metadata-only projections; decrypted
//! values only ever leave through the explicit `*_details` calls.

use chrono::Utc;

use crate::crypto::CipherEngine;
use crate::errors::{Result, VaultError};
use crate::record::{
    new_record_id, CardDetails, CardRecord, CardSummary, CardUpdate, CredentialDetails,
    CredentialRecord, CredentialSummary,
};
use crate::storage::Storage;

use super::rotation::ReuseGuard;

/// The single entry point for vault operations.
pub struct VaultService<S: Storage> {
    engine: CipherEngine,
    storage: S,
}

impl<S: Storage> VaultService<S> {
    pub fn new(engine: CipherEngine, storage: S) -> Self {
        Self { engine, storage }
    }

    // ------------------------------------------------------------------
    // Credentials
    // ------------------------------------------------------------------

    /// Create a password entry.  Returns non-sensitive metadata only.
    pub fn add_credential(
        &mut self,
        owner_id: &str,
        name: &str,
        username: Option<&str>,
        password: &str,
    ) -> Result<CredentialSummary> {
        if name.trim().is_empty() {
            return Err(VaultError::MissingField("name"));
        }
        if password.is_empty() {
            return Err(VaultError::MissingField("password"));
        }

        self.ensure_credential_name_free(owner_id, name)?;

        let ciphertext = self.engine.encrypt(password.as_bytes())?;
        let now = Utc::now();
        let record = CredentialRecord {
            id: new_record_id(),
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            username: username.unwrap_or_default().to_string(),
            secret: ciphertext.clone(),
            // The history starts with the first password, so it always
            // ends with the current ciphertext.
            secret_history: vec![ciphertext],
            version: 0,
            created_at: now,
            updated_at: now,
        };

        let summary = CredentialSummary::from(&record);
        self.storage.insert_credential(record)?;
        Ok(summary)
    }

    /// All password entries for this owner, metadata only, sorted by name.
    pub fn list_credentials(&self, owner_id: &str) -> Result<Vec<CredentialSummary>> {
        let mut list: Vec<CredentialSummary> = self
            .storage
            .credentials(owner_id)?
            .iter()
            .map(CredentialSummary::from)
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    /// Decrypt and return a single password entry.
    pub fn credential_details(&self, owner_id: &str, id: &str) -> Result<CredentialDetails> {
        let record = self
            .storage
            .find_credential(owner_id, id)?
            .ok_or(VaultError::RecordNotFound)?;

        let password = self.engine.decrypt_string(&record.secret)?;

        Ok(CredentialDetails {
            id: record.id,
            name: record.name,
            username: record.username,
            password,
            created_at: record.created_at,
        })
    }

    /// Change a password entry's active password.
    ///
    /// Requires the current password and refuses any password the entry
    /// has held before.  The write is versioned: a concurrent change to
    /// the same record between load and save fails with `Conflict` and
    /// can be retried by the caller.
    pub fn rotate_credential(
        &mut self,
        owner_id: &str,
        id: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        if new_password.is_empty() {
            return Err(VaultError::MissingField("new password"));
        }

        let mut record = self
            .storage
            .find_credential(owner_id, id)?
            .ok_or(VaultError::RecordNotFound)?;
        let loaded_version = record.version;

        ReuseGuard::new(&self.engine).rotate(&mut record, old_password, new_password)?;

        self.storage.update_credential(record, loaded_version)
    }

    /// Hard-delete a password entry.
    pub fn remove_credential(&mut self, owner_id: &str, id: &str) -> Result<()> {
        if self.storage.remove_credential(owner_id, id)? {
            Ok(())
        } else {
            Err(VaultError::RecordNotFound)
        }
    }

    // ------------------------------------------------------------------
    // Cards
    // ------------------------------------------------------------------

    /// Create a card entry.  Returns non-sensitive metadata only.
    #[allow(clippy::too_many_arguments)]
    pub fn add_card(
        &mut self,
        owner_id: &str,
        label: &str,
        holder_name: &str,
        number: &str,
        expiry: &str,
        cvv: &str,
        card_type: Option<&str>,
        notes: Option<&str>,
    ) -> Result<CardSummary> {
        if label.trim().is_empty() {
            return Err(VaultError::MissingField("label"));
        }
        if holder_name.trim().is_empty() {
            return Err(VaultError::MissingField("holder name"));
        }
        if number.trim().is_empty() {
            return Err(VaultError::MissingField("card number"));
        }
        if expiry.trim().is_empty() {
            return Err(VaultError::MissingField("expiry"));
        }
        if cvv.trim().is_empty() {
            return Err(VaultError::MissingField("cvv"));
        }

        self.ensure_card_label_free(owner_id, label)?;

        let now = Utc::now();
        let record = CardRecord {
            id: new_record_id(),
            owner_id: owner_id.to_string(),
            label: label.to_string(),
            holder_name: holder_name.to_string(),
            expiry: expiry.to_string(),
            card_type: card_type.unwrap_or("Visa").to_string(),
            notes: notes.unwrap_or_default().to_string(),
            number_ciphertext: self.engine.encrypt(number.as_bytes())?,
            cvv_ciphertext: self.engine.encrypt(cvv.as_bytes())?,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        let summary = CardSummary::from(&record);
        self.storage.insert_card(record)?;
        Ok(summary)
    }

    /// All card entries for this owner, metadata only, sorted by label.
    pub fn list_cards(&self, owner_id: &str) -> Result<Vec<CardSummary>> {
        let mut list: Vec<CardSummary> = self
            .storage
            .cards(owner_id)?
            .iter()
            .map(CardSummary::from)
            .collect();
        list.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(list)
    }

    /// Decrypt and return a single card entry.
    pub fn card_details(&self, owner_id: &str, id: &str) -> Result<CardDetails> {
        let record = self
            .storage
            .find_card(owner_id, id)?
            .ok_or(VaultError::RecordNotFound)?;

        let number = self.engine.decrypt_string(&record.number_ciphertext)?;
        let cvv = self.engine.decrypt_string(&record.cvv_ciphertext)?;

        Ok(CardDetails {
            id: record.id,
            label: record.label,
            holder_name: record.holder_name,
            number,
            cvv,
            expiry: record.expiry,
            card_type: record.card_type,
            notes: record.notes,
        })
    }

    /// Apply a partial update to a card.
    ///
    /// Only fields present in `update` are touched; `number` and `cvv`
    /// are re-encrypted on the way in.  Versioned like
    /// `rotate_credential`.
    pub fn update_card(&mut self, owner_id: &str, id: &str, update: CardUpdate) -> Result<()> {
        // Nothing to apply — succeed without touching the record.
        if update.is_empty() {
            return Ok(());
        }

        let mut record = self
            .storage
            .find_card(owner_id, id)?
            .ok_or(VaultError::RecordNotFound)?;
        let loaded_version = record.version;

        if let Some(label) = update.label {
            if label.trim().is_empty() {
                return Err(VaultError::MissingField("label"));
            }
            if label != record.label {
                self.ensure_card_label_free(owner_id, &label)?;
            }
            record.label = label;
        }
        if let Some(holder_name) = update.holder_name {
            record.holder_name = holder_name;
        }
        if let Some(number) = update.number {
            record.number_ciphertext = self.engine.encrypt(number.as_bytes())?;
        }
        if let Some(expiry) = update.expiry {
            record.expiry = expiry;
        }
        if let Some(cvv) = update.cvv {
            record.cvv_ciphertext = self.engine.encrypt(cvv.as_bytes())?;
        }
        if let Some(card_type) = update.card_type {
            record.card_type = card_type;
        }
        if let Some(notes) = update.notes {
            record.notes = notes;
        }
        record.updated_at = Utc::now();

        self.storage.update_card(record, loaded_version)
    }

    /// Hard-delete a card entry.
    pub fn remove_card(&mut self, owner_id: &str, id: &str) -> Result<()> {
        if self.storage.remove_card(owner_id, id)? {
            Ok(())
        } else {
            Err(VaultError::RecordNotFound)
        }
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn ensure_credential_name_free(&self, owner_id: &str, name: &str) -> Result<()> {
        let exists = self
            .storage
            .credentials(owner_id)?
            .iter()
            .any(|r| r.name == name);
        if exists {
            return Err(VaultError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn ensure_card_label_free(&self, owner_id: &str, label: &str) -> Result<()> {
        let exists = self.storage.cards(owner_id)?.iter().any(|r| r.label == label);
        if exists {
            return Err(VaultError::DuplicateName(label.to_string()));
        }
        Ok(())
    }
}
