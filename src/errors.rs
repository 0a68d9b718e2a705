use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in SecureVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Record errors ---
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("An entry named '{0}' already exists in your vault")]
    DuplicateName(String),

    #[error("Record not found")]
    RecordNotFound,

    #[error("Old password is incorrect")]
    OldSecretMismatch,

    #[error("This password was already used for this entry")]
    SecretReused,

    #[error("Record was modified concurrently — retry the operation")]
    Conflict,

    // --- Vault file errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("HMAC verification failed — vault file may be tampered")]
    HmacMismatch,

    #[error("HMAC error: {0}")]
    HmacError(String),

    // --- Storage errors ---
    #[error("Storage error: {0}")]
    Storage(String),

    // --- Keyfile errors ---
    #[error("Key file error: {0}")]
    KeyfileError(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    // --- Audit errors ---
    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for SecureVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
