use harbor_core::{AssetId, VaultError, VaultResult};
use log::debug;

/// Capacity and per-operation withdrawal ceilings
///
/// The USD capacity and the per-operation USD ceiling are immutable;
/// the native-unit ceiling can be adjusted by an operator, with zero
/// meaning "no native ceiling". When both withdrawal ceilings apply,
/// the more restrictive one wins because each is checked
/// independently.
pub struct LimitEnforcer {
    capacity_usd: u128,
    usd_withdrawal_limit: u128,
    native_withdrawal_limit: u128,
}

impl LimitEnforcer {
    pub fn new(
        capacity_usd: u128,
        usd_withdrawal_limit: u128,
        native_withdrawal_limit: u128,
    ) -> Self {
        Self {
            capacity_usd,
            usd_withdrawal_limit,
            native_withdrawal_limit,
        }
    }

    pub fn capacity_usd(&self) -> u128 {
        self.capacity_usd
    }

    pub fn usd_withdrawal_limit(&self) -> u128 {
        self.usd_withdrawal_limit
    }

    pub fn native_withdrawal_limit(&self) -> u128 {
        self.native_withdrawal_limit
    }

    pub fn set_native_withdrawal_limit(&mut self, limit: u128) {
        debug!(
            "native withdrawal limit changed from {} to {limit}",
            self.native_withdrawal_limit
        );
        self.native_withdrawal_limit = limit;
    }

    /// USD capacity still available, floored at zero
    pub fn remaining_capacity(&self, current_usd_total: u128) -> u128 {
        self.capacity_usd.saturating_sub(current_usd_total)
    }

    /// Check a prospective deposit against remaining capacity.
    ///
    /// Landing exactly on the ceiling is allowed; only a result
    /// strictly above it is rejected. Returns the capacity that would
    /// remain after the deposit.
    pub fn check_deposit(&self, current_usd_total: u128, usd_amount: u128) -> VaultResult<u128> {
        let remaining = self.remaining_capacity(current_usd_total);
        if usd_amount > remaining {
            return Err(VaultError::DepositExceedsCapacity {
                attempted_usd: usd_amount,
                remaining_usd: remaining,
            });
        }
        Ok(remaining - usd_amount)
    }

    /// Check a prospective withdrawal against the USD per-operation
    /// ceiling and, for the native currency only, the native-unit
    /// ceiling. Both checks are independent; either may fire.
    pub fn check_withdrawal(
        &self,
        asset: &AssetId,
        native_amount: u128,
        usd_amount: u128,
    ) -> VaultResult<()> {
        if usd_amount > self.usd_withdrawal_limit {
            return Err(VaultError::WithdrawalExceedsUsdLimit {
                attempted_usd: usd_amount,
                limit_usd: self.usd_withdrawal_limit,
            });
        }
        if asset.is_native()
            && self.native_withdrawal_limit != 0
            && native_amount > self.native_withdrawal_limit
        {
            return Err(VaultError::WithdrawalExceedsNativeLimit {
                attempted: native_amount,
                limit: self.native_withdrawal_limit,
            });
        }
        Ok(())
    }
}
