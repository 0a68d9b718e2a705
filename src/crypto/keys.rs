//! Key derivation helpers using HKDF-SHA256.
//!
//! From the single master key we derive:
//! - The **data key** used by `CipherEngine` for record fields.
//! - A dedicated **seal key** for the vault file's HMAC.
//!
//! HKDF (RFC 5869) uses the master key as input keying material (IKM)
//! and a context string (`info`) to produce independent sub-keys.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::{Result, VaultError};

/// Length of the master key and derived sub-keys (256 bits).
pub const KEY_LEN: usize = 32;

/// A wrapper around the 32-byte master key that automatically zeroes
/// its memory when dropped.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a new `MasterKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Derive the record-field encryption key.
    pub fn derive_data_key(&self) -> Result<[u8; KEY_LEN]> {
        hkdf_derive(&self.bytes, b"securevault-data-key")
    }

    /// Derive the HMAC key used to seal the vault file.
    pub fn derive_seal_key(&self) -> Result<[u8; KEY_LEN]> {
        hkdf_derive(&self.bytes, b"securevault-seal-key")
    }
}

/// Internal helper: run HKDF-SHA256 expand with the given `info`.
///
/// The `extract` step is skipped and the master key is used directly
/// as the pseudo-random key (PRK) because the master key is already a
/// uniformly random 32-byte value from the key file.
fn hkdf_derive(ikm: &[u8], info: &[u8]) -> Result<[u8; KEY_LEN]> {
    // `salt` is None — HKDF will use a zero-filled salt internally.
    let hk = Hkdf::<Sha256>::new(None, ikm);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info, &mut okm)
        .map_err(|e| VaultError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_and_seal_keys_are_independent() {
        let master = MasterKey::new([0x5Au8; KEY_LEN]);
        let data = master.derive_data_key().unwrap();
        let seal = master.derive_seal_key().unwrap();
        assert_ne!(data, seal, "sub-keys must differ per context string");
    }

    #[test]
    fn derivation_is_deterministic() {
        let master = MasterKey::new([0x11u8; KEY_LEN]);
        assert_eq!(
            master.derive_data_key().unwrap(),
            master.derive_data_key().unwrap()
        );
    }

    #[test]
    fn different_master_keys_produce_different_sub_keys() {
        let a = MasterKey::new([0x01u8; KEY_LEN]);
        let b = MasterKey::new([0x02u8; KEY_LEN]);
        assert_ne!(a.derive_data_key().unwrap(), b.derive_data_key().unwrap());
    }
}
