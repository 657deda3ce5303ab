//! Harbor Vault
//!
//! Custodial multi-asset ledger engine. Accepts deposits of the native
//! currency and registered fungible assets, normalizes every amount
//! into a common USD accounting unit through validated oracle
//! readings, enforces a global capacity ceiling and per-operation
//! withdrawal ceilings, and converts arbitrary swap-supported assets
//! into the settlement asset before crediting.
//!
//! The engine is a synchronous single-writer state machine: every
//! state-changing entry point runs under an operation-in-progress
//! guard, updates its own bookkeeping before touching any external
//! collaborator, and either fully commits or fully reverts.

pub mod config;
pub mod ledger;
pub mod limits;
pub mod oracle;
pub mod registry;
mod swap;
pub mod vault;

pub use config::VaultConfig;
pub use ledger::Ledger;
pub use limits::LimitEnforcer;
pub use oracle::OracleGateway;
pub use registry::{AssetEntry, AssetRegistry};
pub use vault::Vault;
