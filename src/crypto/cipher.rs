//! AES-256-GCM authenticated encryption.
//!
//! `CipherEngine` wraps a single process-wide data key, built once at
//! startup and passed by reference to everything that needs it.  Each
//! call to `encrypt` generates a fresh random 12-byte nonce and
//! prepends it to the ciphertext.  `decrypt` splits the nonce back out
//! before decrypting.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use zeroize::Zeroize;

use crate::crypto::keys::MasterKey;
use crate::errors::{Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Authenticated encryption engine for record fields.
///
/// Stateless apart from the immutable key schedule, so a shared
/// reference can be used concurrently from any number of threads.
pub struct CipherEngine {
    cipher: Aes256Gcm,
}

impl CipherEngine {
    /// Build an engine from the master key.
    ///
    /// The actual AES key is an HKDF sub-key of the master key, so the
    /// same master key can also seal the vault file without key reuse.
    pub fn new(master_key: &MasterKey) -> Result<Self> {
        let mut data_key = master_key.derive_data_key()?;
        let cipher = Aes256Gcm::new_from_slice(&data_key).map_err(|e| {
            VaultError::EncryptionFailed(format!("invalid key length: {e}"))
        })?;
        data_key.zeroize();
        Ok(Self { cipher })
    }

    /// Encrypt `plaintext`, returning the nonce prepended to the
    /// ciphertext (nonce || ciphertext).
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        // Generate a random 12-byte nonce.
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        // Encrypt and authenticate the plaintext.
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

        // Prepend the nonce so the caller only needs to store one blob.
        let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        output.extend_from_slice(&nonce);
        output.extend_from_slice(&ciphertext);
        Ok(output)
    }

    /// Decrypt data that was produced by `encrypt`.
    ///
    /// Expects the first 12 bytes to be the nonce, followed by the
    /// ciphertext.  Fails with `DecryptionFailed` on truncated input or
    /// when the auth tag does not verify.
    pub fn decrypt(&self, ciphertext_with_nonce: &[u8]) -> Result<Vec<u8>> {
        // Make sure we have at least a nonce worth of bytes.
        if ciphertext_with_nonce.len() < NONCE_LEN {
            return Err(VaultError::DecryptionFailed);
        }

        // Split nonce from ciphertext.
        let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        // Decrypt and verify the auth tag.
        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| VaultError::DecryptionFailed)?;

        Ok(plaintext)
    }

    /// Decrypt into a `String`, zeroizing the bytes on UTF-8 failure.
    pub fn decrypt_string(&self, ciphertext_with_nonce: &[u8]) -> Result<String> {
        let plaintext_bytes = self.decrypt(ciphertext_with_nonce)?;
        String::from_utf8(plaintext_bytes).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            VaultError::SerializationError("decrypted value is not valid UTF-8".to_string())
        })
    }
}
