//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::{load_key_file, CipherEngine};
use crate::errors::{Result, VaultError};
use crate::storage::FileStore;
use crate::vault::VaultService;

/// SecureVault CLI: encrypted password and payment-card vault.
#[derive(Parser)]
#[command(
    name = "securevault",
    about = "Encrypted password and payment-card vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Owner identity for all operations (falls back to the
    /// `default_user` setting)
    #[arg(short, long, global = true, env = "SECUREVAULT_USER")]
    pub user: Option<String>,

    /// Vault directory (default: .securevault, or the `vault_dir` setting)
    #[arg(long, global = true)]
    pub vault_dir: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Initialize a new vault and master key
    Init,

    /// Add a password entry
    Add {
        /// Entry name (e.g. "email")
        name: String,
        /// Password value (omit for interactive prompt)
        password: Option<String>,
        /// Optional display username
        #[arg(short = 'n', long)]
        username: Option<String>,
    },

    /// List password entries (never shows passwords)
    List,

    /// Show a password entry, decrypted, and copy it to the clipboard
    Show {
        /// Entry id (as shown by `list`)
        id: String,
        /// Don't copy the password to the clipboard
        #[arg(long)]
        no_clip: bool,
    },

    /// Change an entry's password (requires the current one)
    Rotate {
        /// Entry id
        id: String,
        /// Current password (omit for interactive prompt)
        #[arg(long)]
        old: Option<String>,
        /// New password (omit for interactive prompt)
        #[arg(long)]
        new: Option<String>,
    },

    /// Delete a password entry
    Remove {
        /// Entry id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Manage payment cards
    Card {
        #[command(subcommand)]
        action: CardAction,
    },

    /// Generate a random password
    Generate {
        /// Password length
        #[arg(short, long, default_value = "16")]
        length: usize,
        /// Exclude lowercase letters
        #[arg(long)]
        no_lowercase: bool,
        /// Exclude uppercase letters
        #[arg(long)]
        no_uppercase: bool,
        /// Exclude digits
        #[arg(long)]
        no_digits: bool,
        /// Exclude symbols
        #[arg(long)]
        no_symbols: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },

    /// View the audit log of vault operations
    #[cfg(feature = "audit-log")]
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },
}

/// Card subcommands.
#[derive(clap::Subcommand)]
pub enum CardAction {
    /// Add a payment card
    Add {
        /// Card label (e.g. "visa1")
        label: String,
        /// Cardholder name
        #[arg(long)]
        holder: String,
        /// Card number (omit for interactive prompt)
        #[arg(long)]
        number: Option<String>,
        /// Expiry (e.g. 12/27)
        #[arg(long)]
        expiry: String,
        /// Security code (omit for interactive prompt)
        #[arg(long)]
        cvv: Option<String>,
        /// Card network (default: Visa)
        #[arg(long)]
        card_type: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List cards (never shows number or CVV)
    List,

    /// Show a card, decrypted
    Show {
        /// Card id (as shown by `card list`)
        id: String,
    },

    /// Update card fields (only provided flags are changed)
    Update {
        /// Card id
        id: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        holder: Option<String>,
        #[arg(long)]
        number: Option<String>,
        #[arg(long)]
        expiry: Option<String>,
        #[arg(long)]
        cvv: Option<String>,
        #[arg(long)]
        card_type: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a card
    Remove {
        /// Card id
        id: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from the working directory, with the `--vault-dir`
/// flag overriding the configured directory.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd)?;
    if let Some(ref dir) = cli.vault_dir {
        settings.vault_dir = dir.clone();
    }
    Ok(settings)
}

/// Full path to the vault directory for this invocation.
pub fn vault_dir(settings: &Settings) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    Ok(settings.vault_dir_path(&cwd))
}

/// Resolve the owner identity for this invocation.
///
/// Tried in order: `--user` flag, `SECUREVAULT_USER` env var (clap
/// handles both), then the `default_user` setting.  The identity is
/// trusted as-is — SecureVault performs no authentication itself.
pub fn resolve_owner(cli: &Cli, settings: &Settings) -> Result<String> {
    let owner = cli
        .user
        .clone()
        .or_else(|| settings.default_user.clone())
        .ok_or_else(|| {
            VaultError::ConfigError(
                "no user identity — pass --user, set SECUREVAULT_USER, or add default_user to .securevault.toml"
                    .into(),
            )
        })?;
    validate_owner_id(&owner)?;
    Ok(owner)
}

/// Open the vault file and build a ready-to-use service.
///
/// Loads the master key first; a missing or malformed key file fails
/// here, before any vault data is touched.
pub fn open_service(cli: &Cli) -> Result<(VaultService<FileStore>, Settings)> {
    let settings = load_settings(cli)?;
    let cwd = std::env::current_dir()?;

    let master_key = load_key_file(&settings.key_path(&cwd))?;
    let engine = CipherEngine::new(&master_key)?;
    let store = FileStore::open(&settings.vault_path(&cwd), &master_key)?;

    Ok((VaultService::new(engine, store), settings))
}

/// Prompt for a secret value without echoing it.
pub fn prompt_secret(prompt: &str) -> Result<Zeroizing<String>> {
    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}

/// Take a value from the command line or fall back to a prompt.
pub fn secret_arg_or_prompt(arg: Option<&str>, prompt: &str) -> Result<Zeroizing<String>> {
    match arg {
        Some(value) => Ok(Zeroizing::new(value.to_string())),
        None => prompt_secret(prompt),
    }
}

/// Record an audit event. No-op when audit logging is compiled out,
/// and never fails the parent operation.
pub fn log_audit(cli: &Cli, owner: &str, op: &str, kind: Option<&str>, label: Option<&str>) {
    #[cfg(feature = "audit-log")]
    {
        let Ok(settings) = load_settings(cli) else {
            return;
        };
        let Ok(dir) = vault_dir(&settings) else {
            return;
        };
        if let Some(audit) = crate::audit::AuditLog::open(&dir) {
            audit.log(op, owner, kind, label);
        }
    }

    #[cfg(not(feature = "audit-log"))]
    {
        let _ = (cli, owner, op, kind, label);
    }
}

/// Validate that an owner identity is safe and sensible.
///
/// Allowed: ASCII letters, digits, underscores, hyphens, periods.
/// Must be non-empty and at most 128 characters.  This catches typos
/// before they silently scope operations to an empty vault.
pub fn validate_owner_id(owner: &str) -> Result<()> {
    if owner.is_empty() {
        return Err(VaultError::ConfigError("user identity cannot be empty".into()));
    }

    if owner.len() > 128 {
        return Err(VaultError::ConfigError(
            "user identity cannot exceed 128 characters".into(),
        ));
    }

    if !owner
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.')
    {
        return Err(VaultError::ConfigError(format!(
            "user identity '{owner}' is invalid — only ASCII letters, digits, underscores, hyphens, and periods are allowed"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_owner_ids() {
        assert!(validate_owner_id("alice").is_ok());
        assert!(validate_owner_id("user_2f9c").is_ok());
        assert!(validate_owner_id("jane.doe").is_ok());
        assert!(validate_owner_id("a-b-c").is_ok());
    }

    #[test]
    fn rejects_empty_owner() {
        assert!(validate_owner_id("").is_err());
    }

    #[test]
    fn rejects_special_chars() {
        assert!(validate_owner_id("alice bob").is_err());
        assert!(validate_owner_id("alice/bob").is_err());
        assert!(validate_owner_id("alice@example").is_err());
    }

    #[test]
    fn rejects_too_long_owner() {
        let long = "a".repeat(129);
        assert!(validate_owner_id(&long).is_err());
    }
}
