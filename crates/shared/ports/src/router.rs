use harbor_core::AssetId;
use thiserror::Error;

/// Errors surfaced by the swap collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("router rejected the swap: {0}")]
    Rejected(String),

    #[error("no route from {0} to {1}")]
    NoRoute(AssetId, AssetId),
}

/// Port for the external swap collaborator
///
/// A single-hop, fixed-rate (or already slippage-bounded) exchange.
/// The router's view of how much it delivered is never trusted: the
/// swap coordinator measures the recipient's settlement-asset custody
/// before and after this call and uses only that delta. Hence the
/// deliberately unit return type.
pub trait SwapRouter: Send + Sync {
    /// Exchange `amount_in` of `asset_in` for `asset_out`, delivering
    /// the output into the caller's custody. One invocation per
    /// logical operation; no retry, no partial fills.
    fn swap(
        &self,
        asset_in: &AssetId,
        asset_out: &AssetId,
        amount_in: u128,
        min_amount_out: u128,
    ) -> Result<(), RouterError>;
}
