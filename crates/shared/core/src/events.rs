//! Audit events emitted by the ledger
//!
//! Every state-changing operation appends exactly one event carrying
//! its key parameters, so off-system observers can reconstruct the
//! custody history without reading internal state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::asset::{AssetId, OwnerId};

/// Auditable record of a state-changing ledger operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultEvent {
    /// An asset (or the native currency) was credited to an owner
    Deposited {
        owner: OwnerId,
        asset: AssetId,
        native_amount: u128,
        usd_amount: u128,
    },
    /// An asset was debited from an owner and pushed out
    Withdrawn {
        owner: OwnerId,
        asset: AssetId,
        native_amount: u128,
        usd_amount: u128,
    },
    /// An arbitrary asset was converted to the settlement asset and credited
    SwapDeposited {
        owner: OwnerId,
        asset_in: AssetId,
        amount_in: u128,
        settlement_asset: AssetId,
        settlement_credited: u128,
        usd_amount: u128,
    },
    AssetRegistered {
        asset: AssetId,
        decimals: u8,
    },
    AssetUnregistered {
        asset: AssetId,
    },
    FeedUpdated {
        asset: AssetId,
    },
    SwapSupportChanged {
        asset: AssetId,
        enabled: bool,
    },
    NativeWithdrawalLimitChanged {
        limit: u128,
    },
    /// Administrative balance correction with the operator's reason
    BalanceRecovered {
        record_id: Uuid,
        owner: OwnerId,
        asset: AssetId,
        old_balance: u128,
        new_balance: u128,
        reason: String,
    },
}

impl VaultEvent {
    /// Short tag identifying the event variant, for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            VaultEvent::Deposited { .. } => "deposited",
            VaultEvent::Withdrawn { .. } => "withdrawn",
            VaultEvent::SwapDeposited { .. } => "swap_deposited",
            VaultEvent::AssetRegistered { .. } => "asset_registered",
            VaultEvent::AssetUnregistered { .. } => "asset_unregistered",
            VaultEvent::FeedUpdated { .. } => "feed_updated",
            VaultEvent::SwapSupportChanged { .. } => "swap_support_changed",
            VaultEvent::NativeWithdrawalLimitChanged { .. } => "native_withdrawal_limit_changed",
            VaultEvent::BalanceRecovered { .. } => "balance_recovered",
        }
    }

    /// The asset this event relates to, if it has one
    pub fn asset(&self) -> Option<&AssetId> {
        match self {
            VaultEvent::Deposited { asset, .. }
            | VaultEvent::Withdrawn { asset, .. }
            | VaultEvent::AssetRegistered { asset, .. }
            | VaultEvent::AssetUnregistered { asset }
            | VaultEvent::FeedUpdated { asset }
            | VaultEvent::SwapSupportChanged { asset, .. }
            | VaultEvent::BalanceRecovered { asset, .. } => Some(asset),
            VaultEvent::SwapDeposited { asset_in, .. } => Some(asset_in),
            VaultEvent::NativeWithdrawalLimitChanged { .. } => None,
        }
    }

    /// The owner this event relates to, if it has one
    pub fn owner(&self) -> Option<&OwnerId> {
        match self {
            VaultEvent::Deposited { owner, .. }
            | VaultEvent::Withdrawn { owner, .. }
            | VaultEvent::SwapDeposited { owner, .. }
            | VaultEvent::BalanceRecovered { owner, .. } => Some(owner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let event = VaultEvent::Deposited {
            owner: OwnerId::new("alice"),
            asset: AssetId::native(),
            native_amount: 10,
            usd_amount: 20_000,
        };
        assert_eq!(event.kind(), "deposited");
        assert_eq!(event.owner(), Some(&OwnerId::new("alice")));
        assert_eq!(event.asset(), Some(&AssetId::native()));
    }

    #[test]
    fn test_recovery_event_serializes_reason() {
        let event = VaultEvent::BalanceRecovered {
            record_id: Uuid::new_v4(),
            owner: OwnerId::new("bob"),
            asset: AssetId::new("usdc"),
            old_balance: 100,
            new_balance: 70,
            reason: "chain reorg correction".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("chain reorg correction"));
        assert!(json.contains("\"old_balance\":100"));
        assert!(json.contains("\"new_balance\":70"));
    }
}
