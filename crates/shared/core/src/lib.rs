//! Harbor Core Domain
//!
//! Pure domain types for the Harbor custodial ledger.
//! This crate contains no I/O and is 100% unit testable.

pub mod asset;
pub mod error;
pub mod events;

// Re-export commonly used types at crate root
pub use asset::{AssetId, OwnerId, NATIVE_ALIAS, NATIVE_ASSET};
pub use error::{VaultError, VaultResult};
pub use events::VaultEvent;

/// Canonical timestamp type used across the workspace
pub type Timestamp = chrono::DateTime<chrono::Utc>;
