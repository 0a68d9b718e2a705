//! Random password generation.
//!
//! Convenience feature for the `generate` command: builds a charset
//! from the enabled character classes and samples it uniformly with
//! rejection sampling over OS randomness.

use rand::RngCore;

use crate::errors::{Result, VaultError};

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?";

/// Maximum length accepted by `generate`.
const MAX_LEN: usize = 256;

/// Which character classes to draw from.  All enabled by default.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorOptions {
    pub length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 16,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: true,
        }
    }
}

/// Generate a random password according to `options`.
pub fn generate_password(options: &GeneratorOptions) -> Result<String> {
    if options.length == 0 || options.length > MAX_LEN {
        return Err(VaultError::CommandFailed(format!(
            "password length must be between 1 and {MAX_LEN}"
        )));
    }

    let mut charset = String::new();
    if options.lowercase {
        charset.push_str(LOWERCASE);
    }
    if options.uppercase {
        charset.push_str(UPPERCASE);
    }
    if options.digits {
        charset.push_str(DIGITS);
    }
    if options.symbols {
        charset.push_str(SYMBOLS);
    }
    if charset.is_empty() {
        return Err(VaultError::CommandFailed(
            "at least one character class must be enabled".into(),
        ));
    }

    let chars: Vec<char> = charset.chars().collect();
    let mut rng = rand::rng();
    let mut password = String::with_capacity(options.length);

    // Rejection sampling keeps the distribution uniform across the
    // charset regardless of its size.
    let bound = u32::MAX - (u32::MAX % chars.len() as u32);
    while password.len() < options.length {
        let mut buf = [0u8; 4];
        rng.fill_bytes(&mut buf);
        let value = u32::from_le_bytes(buf);
        if value < bound {
            password.push(chars[(value % chars.len() as u32) as usize]);
        }
    }

    Ok(password)
}
