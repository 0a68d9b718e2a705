//! The persistence collaborator.
//!
//! `VaultService` never talks to disk directly — it goes through the
//! `Storage` trait.  Every call is atomic on its own; there are no
//! cross-call transactions, so read-modify-write sequences rely on the
//! per-record version counter: `update_*` takes the version the caller
//! read and fails with `Conflict` if the stored record moved on since.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::errors::Result;
use crate::record::{CardRecord, CredentialRecord};

/// Record persistence, scoped by owner on every call.
pub trait Storage {
    // --- Credentials ---

    /// All credential records owned by `owner_id`.
    fn credentials(&self, owner_id: &str) -> Result<Vec<CredentialRecord>>;

    /// A single credential by id, or `None` when it does not exist
    /// under this owner.  Wrong owner and missing id are
    /// indistinguishable by design.
    fn find_credential(&self, owner_id: &str, id: &str) -> Result<Option<CredentialRecord>>;

    /// Persist a brand-new credential record.
    fn insert_credential(&mut self, record: CredentialRecord) -> Result<()>;

    /// Persist a mutated credential record.
    ///
    /// `expected_version` is the version the caller loaded.  Fails with
    /// `Conflict` if the stored record has a different version, and
    /// `RecordNotFound` if it was deleted in the meantime.  On success
    /// the stored version is `expected_version + 1`.
    fn update_credential(&mut self, record: CredentialRecord, expected_version: u64)
        -> Result<()>;

    /// Remove a credential.  Returns `false` when nothing matched.
    fn remove_credential(&mut self, owner_id: &str, id: &str) -> Result<bool>;

    // --- Cards ---

    /// All card records owned by `owner_id`.
    fn cards(&self, owner_id: &str) -> Result<Vec<CardRecord>>;

    /// A single card by id, scoped like `find_credential`.
    fn find_card(&self, owner_id: &str, id: &str) -> Result<Option<CardRecord>>;

    /// Persist a brand-new card record.
    fn insert_card(&mut self, record: CardRecord) -> Result<()>;

    /// Persist a mutated card record with the same version discipline
    /// as `update_credential`.
    fn update_card(&mut self, record: CardRecord, expected_version: u64) -> Result<()>;

    /// Remove a card.  Returns `false` when nothing matched.
    fn remove_card(&mut self, owner_id: &str, id: &str) -> Result<bool>;
}
