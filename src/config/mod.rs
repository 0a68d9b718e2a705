//! Configuration loading for SecureVault.

pub mod settings;

pub use settings::Settings;
