//! File-backed store — HMAC-sealed binary vault file.
//!
//! A `.vault` file has this layout:
//!
//! ```text
//! [SVLT: 4 bytes][version: 1 byte][header_len: 4 bytes LE][header JSON][records JSON][HMAC-SHA256: 32 bytes]
//! ```
//!
//! - **Magic** (`SVLT`): identifies the file as a SecureVault vault.
//! - **Version**: format version (currently `1`).
//! - **Header length**: little-endian u32 telling us where the header
//!   JSON ends and the records JSON begins.
//! - **Header JSON**: serialized `VaultHeader`.
//! - **Records JSON**: serialized `VaultBody` (credentials + cards).
//! - **HMAC-SHA256**: 32-byte tag over header + records bytes, keyed by
//!   a sub-key of the master key.
//!
//! Every `Storage` call re-reads the file, applies one change, and
//! writes it back atomically (temp file + rename).  Re-reading on each
//! call is what makes the version check a real optimistic-concurrency
//! guard even across processes sharing a vault file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::crypto::keys::MasterKey;
use crate::errors::{Result, VaultError};
use crate::record::{base64_decode, base64_encode, CardRecord, CredentialRecord};

use super::Storage;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Magic bytes at the start of every vault file.
const MAGIC: &[u8; 4] = b"SVLT";

/// Current binary format version.
pub const CURRENT_VERSION: u8 = 1;

/// Size of the HMAC tag appended to the file (SHA-256 = 32 bytes).
const HMAC_LEN: usize = 32;

/// Fixed-size prefix: 4 (magic) + 1 (version) + 4 (header_len).
const PREFIX_LEN: usize = 9;

// ---------------------------------------------------------------------------
// On-disk structures
// ---------------------------------------------------------------------------

/// Metadata stored at the beginning of a vault file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultHeader {
    /// Format version.
    pub version: u8,

    /// When this vault was first created.
    pub created_at: DateTime<Utc>,

    /// Random per-vault id (base64 in JSON), used only to tell vault
    /// files apart in diagnostics.
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub vault_id: Vec<u8>,
}

/// All records in the vault.
#[derive(Debug, Default, Serialize, Deserialize)]
struct VaultBody {
    credentials: Vec<CredentialRecord>,
    cards: Vec<CardRecord>,
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// HMAC key wrapper so the sub-key is wiped on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
struct SealKey([u8; 32]);

/// File-backed `Storage` implementation.
pub struct FileStore {
    /// Path to the `.vault` file on disk.
    path: PathBuf,

    /// HMAC key derived from the master key.
    seal_key: SealKey,
}

impl FileStore {
    /// Create a brand-new vault file at `path`.
    pub fn create(path: &Path, master_key: &MasterKey) -> Result<Self> {
        if path.exists() {
            return Err(VaultError::VaultAlreadyExists(path.to_path_buf()));
        }

        let mut vault_id = vec![0u8; 16];
        use rand::RngCore;
        rand::rng().fill_bytes(&mut vault_id);

        let header = VaultHeader {
            version: CURRENT_VERSION,
            created_at: Utc::now(),
            vault_id,
        };

        let store = Self {
            path: path.to_path_buf(),
            seal_key: SealKey(master_key.derive_seal_key()?),
        };

        store.store(&header, &VaultBody::default())?;
        Ok(store)
    }

    /// Open an existing vault file, verifying its seal once up front.
    pub fn open(path: &Path, master_key: &MasterKey) -> Result<Self> {
        if !path.exists() {
            return Err(VaultError::VaultNotFound(path.to_path_buf()));
        }

        let store = Self {
            path: path.to_path_buf(),
            seal_key: SealKey(master_key.derive_seal_key()?),
        };

        // Fail fast on a tampered or wrong-key vault.
        store.load()?;
        Ok(store)
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // ------------------------------------------------------------------
    // Read / write of the whole file
    // ------------------------------------------------------------------

    /// Read and verify the vault file.
    ///
    /// The HMAC is checked over the **original bytes from disk** before
    /// anything is deserialized.
    fn load(&self) -> Result<(VaultHeader, VaultBody)> {
        let data = fs::read(&self.path)?;

        // Minimum size: prefix + HMAC.
        if data.len() < PREFIX_LEN + HMAC_LEN {
            return Err(VaultError::InvalidVaultFormat(
                "file too small to be a valid vault".into(),
            ));
        }

        if &data[0..4] != MAGIC {
            return Err(VaultError::InvalidVaultFormat(
                "missing SVLT magic bytes".into(),
            ));
        }

        let version = data[4];
        if version != CURRENT_VERSION {
            return Err(VaultError::InvalidVaultFormat(format!(
                "unsupported version {version}, expected {CURRENT_VERSION}"
            )));
        }

        let header_len_u32 = u32::from_le_bytes(
            data[5..9]
                .try_into()
                .map_err(|_| VaultError::InvalidVaultFormat("bad header length".into()))?,
        );
        let header_len = usize::try_from(header_len_u32).map_err(|_| {
            VaultError::InvalidVaultFormat(format!(
                "header length {header_len_u32} exceeds platform address space"
            ))
        })?;

        let header_end = PREFIX_LEN + header_len;
        if header_end + HMAC_LEN > data.len() {
            return Err(VaultError::InvalidVaultFormat(
                "header length exceeds file size".into(),
            ));
        }

        let header_bytes = &data[PREFIX_LEN..header_end];
        let body_end = data.len() - HMAC_LEN;
        let body_bytes = &data[header_end..body_end];
        let stored_hmac = &data[body_end..];

        // Verify the seal before trusting any of the JSON.
        self.verify_seal(header_bytes, body_bytes, stored_hmac)?;

        let header: VaultHeader = serde_json::from_slice(header_bytes)
            .map_err(|e| VaultError::InvalidVaultFormat(format!("header JSON: {e}")))?;

        let body: VaultBody = serde_json::from_slice(body_bytes)
            .map_err(|e| VaultError::InvalidVaultFormat(format!("records JSON: {e}")))?;

        Ok((header, body))
    }

    /// Serialize and write the vault file **atomically**.
    fn store(&self, header: &VaultHeader, body: &VaultBody) -> Result<()> {
        let header_bytes = serde_json::to_vec(header)
            .map_err(|e| VaultError::SerializationError(format!("header: {e}")))?;
        let body_bytes = serde_json::to_vec(body)
            .map_err(|e| VaultError::SerializationError(format!("records: {e}")))?;

        let hmac_tag = self.compute_seal(&header_bytes, &body_bytes)?;

        let header_len = u32::try_from(header_bytes.len()).map_err(|_| {
            VaultError::SerializationError(format!(
                "header length {} exceeds u32::MAX",
                header_bytes.len()
            ))
        })?;

        let total = PREFIX_LEN + header_bytes.len() + body_bytes.len() + HMAC_LEN;
        let mut buf = Vec::with_capacity(total);

        buf.extend_from_slice(MAGIC); // 4 bytes
        buf.push(CURRENT_VERSION); // 1 byte
        buf.extend_from_slice(&header_len.to_le_bytes()); // 4 bytes LE
        buf.extend_from_slice(&header_bytes); // header JSON
        buf.extend_from_slice(&body_bytes); // records JSON
        buf.extend_from_slice(&hmac_tag); // 32 bytes

        // Atomic write: write to a temp file, then rename.  The temp
        // file is in the same directory so rename stays on the same
        // filesystem.
        let parent = self.path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, &buf)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    fn compute_seal(&self, header_bytes: &[u8], body_bytes: &[u8]) -> Result<Vec<u8>> {
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.seal_key.0)
            .map_err(|e| VaultError::HmacError(format!("invalid HMAC key: {e}")))?;

        mac.update(header_bytes);
        mac.update(body_bytes);

        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Constant-time seal verification via `hmac::Mac::verify_slice`.
    fn verify_seal(&self, header_bytes: &[u8], body_bytes: &[u8], expected: &[u8]) -> Result<()> {
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.seal_key.0)
            .map_err(|e| VaultError::HmacError(format!("invalid HMAC key: {e}")))?;

        mac.update(header_bytes);
        mac.update(body_bytes);

        mac.verify_slice(expected).map_err(|_| VaultError::HmacMismatch)
    }

    /// Apply one mutation to the record body and persist the result.
    fn with_body<T>(&self, f: impl FnOnce(&mut VaultBody) -> Result<T>) -> Result<T> {
        let (header, mut body) = self.load()?;
        let out = f(&mut body)?;
        self.store(&header, &body)?;
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Storage impl
// ---------------------------------------------------------------------------

impl Storage for FileStore {
    fn credentials(&self, owner_id: &str) -> Result<Vec<CredentialRecord>> {
        let (_, body) = self.load()?;
        Ok(body
            .credentials
            .into_iter()
            .filter(|r| r.owner_id == owner_id)
            .collect())
    }

    fn find_credential(&self, owner_id: &str, id: &str) -> Result<Option<CredentialRecord>> {
        let (_, body) = self.load()?;
        Ok(body
            .credentials
            .into_iter()
            .find(|r| r.id == id && r.owner_id == owner_id))
    }

    fn insert_credential(&mut self, record: CredentialRecord) -> Result<()> {
        self.with_body(|body| {
            body.credentials.push(record);
            Ok(())
        })
    }

    fn update_credential(
        &mut self,
        mut record: CredentialRecord,
        expected_version: u64,
    ) -> Result<()> {
        self.with_body(|body| {
            let slot = body
                .credentials
                .iter_mut()
                .find(|r| r.id == record.id && r.owner_id == record.owner_id)
                .ok_or(VaultError::RecordNotFound)?;

            if slot.version != expected_version {
                return Err(VaultError::Conflict);
            }

            record.version = expected_version + 1;
            *slot = record;
            Ok(())
        })
    }

    fn remove_credential(&mut self, owner_id: &str, id: &str) -> Result<bool> {
        self.with_body(|body| {
            let before = body.credentials.len();
            body.credentials
                .retain(|r| !(r.id == id && r.owner_id == owner_id));
            Ok(body.credentials.len() < before)
        })
    }

    fn cards(&self, owner_id: &str) -> Result<Vec<CardRecord>> {
        let (_, body) = self.load()?;
        Ok(body
            .cards
            .into_iter()
            .filter(|r| r.owner_id == owner_id)
            .collect())
    }

    fn find_card(&self, owner_id: &str, id: &str) -> Result<Option<CardRecord>> {
        let (_, body) = self.load()?;
        Ok(body
            .cards
            .into_iter()
            .find(|r| r.id == id && r.owner_id == owner_id))
    }

    fn insert_card(&mut self, record: CardRecord) -> Result<()> {
        self.with_body(|body| {
            body.cards.push(record);
            Ok(())
        })
    }

    fn update_card(&mut self, mut record: CardRecord, expected_version: u64) -> Result<()> {
        self.with_body(|body| {
            let slot = body
                .cards
                .iter_mut()
                .find(|r| r.id == record.id && r.owner_id == record.owner_id)
                .ok_or(VaultError::RecordNotFound)?;

            if slot.version != expected_version {
                return Err(VaultError::Conflict);
            }

            record.version = expected_version + 1;
            *slot = record;
            Ok(())
        })
    }

    fn remove_card(&mut self, owner_id: &str, id: &str) -> Result<bool> {
        self.with_body(|body| {
            let before = body.cards.len();
            body.cards.retain(|r| !(r.id == id && r.owner_id == owner_id));
            Ok(body.cards.len() < before)
        })
    }
}
