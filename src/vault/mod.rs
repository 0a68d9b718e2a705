//! Vault module — owner-scoped operations over encrypted records.
//!
//! This module provides:
//! - The password rotation gate (`rotation`)
//! - The high-level `VaultService` used by every command (`service`)

pub mod rotation;
pub mod service;

// Re-export the most commonly used items.
pub use rotation::ReuseGuard;
pub use service::VaultService;
