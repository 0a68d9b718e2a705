//! `securevault init` — create the vault file and master key.

use std::fs;

use crate::cli::{load_settings, output, Cli};
use crate::crypto::{generate_key_file, load_key_file};
use crate::errors::{Result, VaultError};
use crate::storage::FileStore;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    let cwd = std::env::current_dir()?;

    let vault_dir = settings.vault_dir_path(&cwd);
    let vault_path = settings.vault_path(&cwd);
    let key_path = settings.key_path(&cwd);

    // 1. Create the vault directory if it doesn't exist.
    if !vault_dir.exists() {
        fs::create_dir_all(&vault_dir)?;
        output::info(&format!("Created vault directory: {}", vault_dir.display()));
    }

    // 2. Refuse to clobber an existing vault.
    if vault_path.exists() {
        output::tip("Use `securevault add` to add entries to the existing vault.");
        return Err(VaultError::VaultAlreadyExists(vault_path));
    }

    // 3. Generate the master key, unless one is already present
    //    (re-initializing a vault directory keeps the old key).
    if key_path.exists() {
        output::info("Using existing master key.");
    } else {
        generate_key_file(&key_path)?;
        output::success(&format!("Master key written to {}", key_path.display()));
        output::warning("Back up the master key — without it the vault cannot be decrypted.");
    }

    // 4. Create the empty vault file, sealed under the master key.
    let master_key = load_key_file(&key_path)?;
    FileStore::create(&vault_path, &master_key)?;
    output::success(&format!("Vault created at {}", vault_path.display()));

    // 5. Show helpful tips.
    output::tip("Run `securevault add <NAME>` to store a password.");
    output::tip("Run `securevault card add <LABEL>` to store a payment card.");
    output::tip("Set SECUREVAULT_USER (or default_user in .securevault.toml) to pick your identity.");

    Ok(())
}
