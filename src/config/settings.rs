use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Project-level configuration, loaded from `.securevault.toml`.
///
/// Every field has a sensible default so SecureVault works
/// out-of-the-box without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) where the vault
    /// file, key file, and audit database live.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// Vault file name inside `vault_dir`.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Master key file name inside `vault_dir`.
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// Owner identity to use when neither `--user` nor
    /// `SECUREVAULT_USER` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".securevault".to_string()
}

fn default_vault_file() -> String {
    "secrets.vault".to_string()
}

fn default_key_file() -> String {
    "master.key".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            vault_file: default_vault_file(),
            key_file: default_key_file(),
            default_user: None,
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".securevault.toml";

    /// Load settings from `<base_dir>/.securevault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(base_dir: &Path) -> Result<Self> {
        let config_path = base_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Full path to the vault directory.
    pub fn vault_dir_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.vault_dir)
    }

    /// Full path to the vault file.
    ///
    /// Example: `<base>/.securevault/secrets.vault`
    pub fn vault_path(&self, base_dir: &Path) -> PathBuf {
        self.vault_dir_path(base_dir).join(&self.vault_file)
    }

    /// Full path to the master key file.
    ///
    /// Example: `<base>/.securevault/master.key`
    pub fn key_path(&self, base_dir: &Path) -> PathBuf {
        self.vault_dir_path(base_dir).join(&self.key_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.vault_dir, ".securevault");
        assert_eq!(settings.vault_file, "secrets.vault");
        assert!(settings.default_user.is_none());
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".securevault.toml"),
            "default_user = \"alice\"\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.default_user.as_deref(), Some("alice"));
        assert_eq!(settings.vault_dir, ".securevault");
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".securevault.toml"), "vault_dir = [").unwrap();

        assert!(Settings::load(dir.path()).is_err());
    }

    #[test]
    fn path_helpers_join_correctly() {
        let settings = Settings::default();
        let base = Path::new("/tmp/project");
        assert_eq!(
            settings.vault_path(base),
            Path::new("/tmp/project/.securevault/secrets.vault")
        );
        assert_eq!(
            settings.key_path(base),
            Path::new("/tmp/project/.securevault/master.key")
        );
    }
}
