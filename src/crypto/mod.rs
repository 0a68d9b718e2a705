//! Cryptographic primitives for SecureVault.
//!
//! This module provides:
//! - AES-256-GCM authenticated encryption (`cipher`)
//! - The master key wrapper and HKDF sub-key derivation (`keys`)
//! - The master key file — the key source loaded at startup (`keyfile`)

pub mod cipher;
pub mod keyfile;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{CipherEngine, MasterKey, ...};
pub use cipher::CipherEngine;
pub use keyfile::{generate_key_file, load_key_file};
pub use keys::MasterKey;
