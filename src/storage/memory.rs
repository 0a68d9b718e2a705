//! In-process store used by unit and integration tests.
//!
//! Implements the exact same version discipline as `FileStore` so
//! service-level tests exercise the real conflict semantics.

use std::collections::HashMap;

use crate::errors::{Result, VaultError};
use crate::record::{CardRecord, CredentialRecord};

use super::Storage;

/// HashMap-backed `Storage` implementation.
#[derive(Default)]
pub struct MemoryStore {
    credentials: HashMap<String, CredentialRecord>,
    cards: HashMap<String, CardRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn credentials(&self, owner_id: &str) -> Result<Vec<CredentialRecord>> {
        Ok(self
            .credentials
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn find_credential(&self, owner_id: &str, id: &str) -> Result<Option<CredentialRecord>> {
        Ok(self
            .credentials
            .get(id)
            .filter(|r| r.owner_id == owner_id)
            .cloned())
    }

    fn insert_credential(&mut self, record: CredentialRecord) -> Result<()> {
        self.credentials.insert(record.id.clone(), record);
        Ok(())
    }

    fn update_credential(
        &mut self,
        mut record: CredentialRecord,
        expected_version: u64,
    ) -> Result<()> {
        let stored = self
            .credentials
            .get(&record.id)
            .filter(|r| r.owner_id == record.owner_id)
            .ok_or(VaultError::RecordNotFound)?;

        if stored.version != expected_version {
            return Err(VaultError::Conflict);
        }

        record.version = expected_version + 1;
        self.credentials.insert(record.id.clone(), record);
        Ok(())
    }

    fn remove_credential(&mut self, owner_id: &str, id: &str) -> Result<bool> {
        match self.credentials.get(id) {
            Some(r) if r.owner_id == owner_id => {
                self.credentials.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn cards(&self, owner_id: &str) -> Result<Vec<CardRecord>> {
        Ok(self
            .cards
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn find_card(&self, owner_id: &str, id: &str) -> Result<Option<CardRecord>> {
        Ok(self.cards.get(id).filter(|r| r.owner_id == owner_id).cloned())
    }

    fn insert_card(&mut self, record: CardRecord) -> Result<()> {
        self.cards.insert(record.id.clone(), record);
        Ok(())
    }

    fn update_card(&mut self, mut record: CardRecord, expected_version: u64) -> Result<()> {
        let stored = self
            .cards
            .get(&record.id)
            .filter(|r| r.owner_id == record.owner_id)
            .ok_or(VaultError::RecordNotFound)?;

        if stored.version != expected_version {
            return Err(VaultError::Conflict);
        }

        record.version = expected_version + 1;
        self.cards.insert(record.id.clone(), record);
        Ok(())
    }

    fn remove_card(&mut self, owner_id: &str, id: &str) -> Result<bool> {
        match self.cards.get(id) {
            Some(r) if r.owner_id == owner_id => {
                self.cards.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
