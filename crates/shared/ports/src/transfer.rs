use harbor_core::{AssetId, OwnerId};
use thiserror::Error;

/// Errors surfaced by the asset transfer layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Port for moving fungible assets in and out of custody
///
/// `pull` draws an amount from an owner into the ledger's custody and
/// `push` pays it back out. `holdings` reports the ledger's own custody
/// of an asset as the transfer layer sees it; the swap coordinator
/// reads it before and after a router call to measure what was
/// actually received.
pub trait AssetTransfer: Send + Sync {
    fn pull(&self, asset: &AssetId, from: &OwnerId, amount: u128) -> Result<(), TransferError>;

    fn push(&self, asset: &AssetId, to: &OwnerId, amount: u128) -> Result<(), TransferError>;

    fn holdings(&self, asset: &AssetId) -> u128;
}
