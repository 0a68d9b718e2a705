//! Password rotation gate.
//!
//! Any change to a credential's active password goes through two checks:
//!
//! 1. **Authorization** — the caller must present the current password.
//!    The stored ciphertext is decrypted and compared in constant time.
//! 2. **Non-reuse** — the replacement must not match any password the
//!    entry has ever held.  A history entry that fails to decrypt is
//!    treated as a non-match so one corrupt legacy entry cannot block
//!    an otherwise valid rotation.
//!
//! Only when both checks pass is the record mutated, so a failure at
//! any step leaves it exactly as loaded.

use chrono::Utc;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::crypto::CipherEngine;
use crate::errors::{Result, VaultError};
use crate::record::CredentialRecord;

/// Gate for credential password changes.
pub struct ReuseGuard<'a> {
    engine: &'a CipherEngine,
}

impl<'a> ReuseGuard<'a> {
    pub fn new(engine: &'a CipherEngine) -> Self {
        Self { engine }
    }

    /// Verify `old_secret`, check `new_secret` against the full history,
    /// and commit the rotation.
    ///
    /// Errors: `DecryptionFailed` if the active ciphertext cannot be
    /// decrypted, `OldSecretMismatch` if `old_secret` is wrong (history
    /// is not consulted in that case), `SecretReused` if `new_secret`
    /// was used before.  The record is untouched on any error.
    pub fn rotate(
        &self,
        record: &mut CredentialRecord,
        old_secret: &str,
        new_secret: &str,
    ) -> Result<()> {
        // Step 1: authorization.  A failed decrypt here is a real error,
        // not a mismatch — the active ciphertext must always decrypt.
        let current = Zeroizing::new(self.engine.decrypt(&record.secret)?);
        let authorized: bool = current.ct_eq(old_secret.as_bytes()).into();
        if !authorized {
            return Err(VaultError::OldSecretMismatch);
        }

        // Step 2: reuse check over the entire history, current included.
        for ciphertext in &record.secret_history {
            match self.engine.decrypt(ciphertext) {
                Ok(plain) => {
                    let plain = Zeroizing::new(plain);
                    if plain.as_slice() == new_secret.as_bytes() {
                        return Err(VaultError::SecretReused);
                    }
                }
                // Corrupt or legacy entry: treat as non-match.
                Err(_) => continue,
            }
        }

        // Step 3: commit.  First point where the record is mutated.
        let new_ciphertext = self.engine.encrypt(new_secret.as_bytes())?;
        record.secret = new_ciphertext.clone();
        record.secret_history.push(new_ciphertext);
        record.updated_at = Utc::now();

        Ok(())
    }
}
