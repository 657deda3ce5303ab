use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::asset::AssetId;

/// Domain-level errors for ledger operations
///
/// Every variant aborts the whole operation; the engine performs no
/// local recovery or retry, and a rejected operation leaves all state
/// unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("amount must be greater than zero")]
    ZeroAmount,

    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u128, available: u128 },

    #[error("deposit of {attempted_usd} USD units exceeds remaining capacity of {remaining_usd}")]
    DepositExceedsCapacity {
        attempted_usd: u128,
        remaining_usd: u128,
    },

    #[error("withdrawal of {attempted_usd} USD units exceeds the per-operation limit of {limit_usd}")]
    WithdrawalExceedsUsdLimit { attempted_usd: u128, limit_usd: u128 },

    #[error("withdrawal of {attempted} native units exceeds the per-operation limit of {limit}")]
    WithdrawalExceedsNativeLimit { attempted: u128, limit: u128 },

    #[error("asset not supported: {0}")]
    AssetNotSupported(AssetId),

    #[error("asset not enabled for swap deposits: {0}")]
    NotSupportedForSwap(AssetId),

    #[error("invalid price reading for {0}")]
    InvalidPrice(AssetId),

    #[error("stale price for {asset}: updated at {updated_at}, older than {max_age}")]
    StalePrice {
        asset: AssetId,
        updated_at: DateTime<Utc>,
        max_age: Duration,
    },

    #[error("swap failed: {0}")]
    SwapFailed(String),

    #[error("reentrant call rejected")]
    ReentrantCall,

    #[error("asset transfer failed: {0}")]
    TransferFailed(String),

    #[error("the native currency cannot be registered or swap-enabled")]
    NativeAssetReserved,

    #[error("asset already registered: {0}")]
    AlreadyRegistered(AssetId),

    #[error("arithmetic overflow valuing {0}")]
    AmountOverflow(AssetId),
}

pub type VaultResult<T> = std::result::Result<T, VaultError>;
