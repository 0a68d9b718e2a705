//! The master key file — SecureVault's key source.
//!
//! The master key is a 32-byte random file created by `securevault init`
//! and loaded once at process start.  There is no keyless mode: if the
//! file is absent or malformed, startup fails before any vault data is
//! touched.

use std::fs;
use std::path::Path;

use rand::RngCore;
use zeroize::Zeroize;

use crate::crypto::keys::{MasterKey, KEY_LEN};
use crate::errors::{Result, VaultError};

/// Generate a new random master key and write it to `path`.
///
/// The file is written with restrictive permissions (owner-only).
pub fn generate_key_file(path: &Path) -> Result<()> {
    if path.exists() {
        return Err(VaultError::KeyfileError(format!(
            "key file already exists at {}",
            path.display()
        )));
    }

    // Generate 32 cryptographically random bytes.
    let mut key = vec![0u8; KEY_LEN];
    rand::rng().fill_bytes(&mut key);

    // Ensure the parent directory exists.
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                VaultError::KeyfileError(format!("cannot create key directory: {e}"))
            })?;
        }
    }

    fs::write(path, &key)
        .map_err(|e| VaultError::KeyfileError(format!("failed to write key file: {e}")))?;

    key.zeroize();

    // On Unix, restrict permissions to owner-only read/write.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(path, perms).map_err(|e| {
            VaultError::KeyfileError(format!("failed to set key file permissions: {e}"))
        })?;
    }

    Ok(())
}

/// Load the master key from disk, validating its length.
pub fn load_key_file(path: &Path) -> Result<MasterKey> {
    if !path.exists() {
        return Err(VaultError::KeyfileError(format!(
            "key file not found at {} — run `securevault init` first",
            path.display()
        )));
    }

    let mut data = fs::read(path)
        .map_err(|e| VaultError::KeyfileError(format!("failed to read key file: {e}")))?;

    if data.len() != KEY_LEN {
        data.zeroize();
        return Err(VaultError::KeyfileError(format!(
            "key file must be exactly {KEY_LEN} bytes"
        )));
    }

    let mut bytes = [0u8; KEY_LEN];
    bytes.copy_from_slice(&data);
    data.zeroize();

    Ok(MasterKey::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn generate_and_load_key_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("master.key");

        generate_key_file(&path).unwrap();
        let key = load_key_file(&path);
        assert!(key.is_ok());
    }

    #[test]
    fn generate_fails_if_exists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("master.key");

        generate_key_file(&path).unwrap();
        assert!(generate_key_file(&path).is_err());
    }

    #[test]
    fn load_fails_if_missing() {
        let dir = TempDir::new().unwrap();
        let result = load_key_file(&dir.path().join("nonexistent.key"));
        assert!(result.is_err());
    }

    #[test]
    fn load_fails_on_wrong_length() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.key");
        fs::write(&path, [0u8; 16]).unwrap();

        assert!(load_key_file(&path).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn key_file_has_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("master.key");
        generate_key_file(&path).unwrap();

        let perms = fs::metadata(&path).unwrap().permissions();
        assert_eq!(perms.mode() & 0o777, 0o600);
    }
}
