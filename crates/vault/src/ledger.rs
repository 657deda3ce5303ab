use std::collections::HashMap;

use harbor_core::{AssetId, OwnerId, VaultError, VaultResult};
use log::debug;

/// Balance bookkeeping: per-owner per-asset entries, per-asset custody
/// totals, the running USD total, and monotonic operation counters
///
/// Invariants maintained by every mutation:
/// - the sum of an asset's balance entries equals its custody total
/// - no balance entry is ever negative (entries are unsigned and a
///   debit checks availability first)
/// - the USD total is an incremental sum of per-operation deltas, each
///   computed at that operation's oracle price; decrements clamp at
///   zero because a later price may value a withdrawal above what the
///   deposits contributed
///
/// The counters are audit/observability data only and never feed back
/// into control flow; they do not decrement when a failed outbound
/// transfer forces an unwind.
pub struct Ledger {
    /// asset -> owner -> balance in native smallest units
    balances: HashMap<AssetId, HashMap<OwnerId, u128>>,
    /// asset -> total custody in native smallest units
    asset_totals: HashMap<AssetId, u128>,
    usd_total: u128,
    deposits: u64,
    withdrawals: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
            asset_totals: HashMap::new(),
            usd_total: 0,
            deposits: 0,
            withdrawals: 0,
        }
    }

    /// Balance of (owner, asset); zero for unknown pairs
    pub fn balance(&self, owner: &OwnerId, asset: &AssetId) -> u128 {
        self.balances
            .get(asset)
            .and_then(|entries| entries.get(owner))
            .copied()
            .unwrap_or(0)
    }

    /// Total custody of an asset across all owners
    pub fn asset_total(&self, asset: &AssetId) -> u128 {
        self.asset_totals.get(asset).copied().unwrap_or(0)
    }

    /// Running USD-denominated total custody
    pub fn usd_total(&self) -> u128 {
        self.usd_total
    }

    pub fn deposit_count(&self) -> u64 {
        self.deposits
    }

    pub fn withdrawal_count(&self) -> u64 {
        self.withdrawals
    }

    /// Credit an owner, updating the balance entry, the asset total,
    /// and the USD total atomically, then bump the deposit counter
    pub fn credit(
        &mut self,
        owner: &OwnerId,
        asset: &AssetId,
        native_amount: u128,
        usd_amount: u128,
    ) -> VaultResult<()> {
        let balance = self
            .balances
            .entry(asset.clone())
            .or_default()
            .entry(owner.clone())
            .or_insert(0);
        let new_balance = balance
            .checked_add(native_amount)
            .ok_or_else(|| VaultError::AmountOverflow(asset.clone()))?;
        let total = self.asset_totals.entry(asset.clone()).or_insert(0);
        let new_total = total
            .checked_add(native_amount)
            .ok_or_else(|| VaultError::AmountOverflow(asset.clone()))?;
        let new_usd_total = self
            .usd_total
            .checked_add(usd_amount)
            .ok_or_else(|| VaultError::AmountOverflow(asset.clone()))?;

        *balance = new_balance;
        *total = new_total;
        self.usd_total = new_usd_total;
        self.deposits += 1;

        debug!(
            "credited {owner} with {native_amount} {asset} ({usd_amount} USD units), \
             usd total now {}",
            self.usd_total
        );
        Ok(())
    }

    /// Debit an owner after checking availability. Returns the USD
    /// delta actually removed from the running total, which the caller
    /// needs if it later has to unwind.
    pub fn debit(
        &mut self,
        owner: &OwnerId,
        asset: &AssetId,
        native_amount: u128,
        usd_amount: u128,
    ) -> VaultResult<u128> {
        let available = self.balance(owner, asset);
        if native_amount > available {
            return Err(VaultError::InsufficientBalance {
                requested: native_amount,
                available,
            });
        }

        self.apply_debit(owner, asset, native_amount);
        // The USD total tracks historical per-operation prices, so a
        // debit valued at today's price may exceed it; clamp at zero.
        let usd_applied = self.usd_total.min(usd_amount);
        self.usd_total -= usd_applied;
        self.withdrawals += 1;

        debug!(
            "debited {owner} by {native_amount} {asset} ({usd_applied} USD units applied), \
             usd total now {}",
            self.usd_total
        );
        Ok(usd_applied)
    }

    /// Administrative correction: set (owner, asset) to an absolute
    /// balance and move both totals by the caller-valued deltas,
    /// clamped exactly like a normal debit. Bumps no counter.
    pub fn rewrite(
        &mut self,
        owner: &OwnerId,
        asset: &AssetId,
        new_native_balance: u128,
        old_usd: u128,
        new_usd: u128,
    ) -> VaultResult<()> {
        let old_native = self.balance(owner, asset);
        let old_total = self.asset_total(asset);
        // Compute every new value before touching state so an overflow
        // aborts with nothing partially applied
        let new_total = if new_native_balance >= old_native {
            old_total
                .checked_add(new_native_balance - old_native)
                .ok_or_else(|| VaultError::AmountOverflow(asset.clone()))?
        } else {
            old_total.saturating_sub(old_native - new_native_balance)
        };
        let new_usd_total = if new_usd >= old_usd {
            self.usd_total
                .checked_add(new_usd - old_usd)
                .ok_or_else(|| VaultError::AmountOverflow(asset.clone()))?
        } else {
            self.usd_total.saturating_sub(old_usd - new_usd)
        };

        self.asset_totals.insert(asset.clone(), new_total);
        self.usd_total = new_usd_total;
        self.set_balance(owner, asset, new_native_balance);
        Ok(())
    }

    /// Reverse a credit whose outbound interaction failed. Counters
    /// stay monotonic.
    pub(crate) fn unwind_credit(
        &mut self,
        owner: &OwnerId,
        asset: &AssetId,
        native_amount: u128,
        usd_amount: u128,
    ) {
        self.apply_debit(owner, asset, native_amount);
        self.usd_total = self.usd_total.saturating_sub(usd_amount);
    }

    /// Reverse a debit whose outbound transfer failed, restoring the
    /// USD delta that was actually removed
    pub(crate) fn unwind_debit(
        &mut self,
        owner: &OwnerId,
        asset: &AssetId,
        native_amount: u128,
        usd_applied: u128,
    ) {
        let balance = self
            .balances
            .entry(asset.clone())
            .or_default()
            .entry(owner.clone())
            .or_insert(0);
        *balance += native_amount;
        *self.asset_totals.entry(asset.clone()).or_insert(0) += native_amount;
        self.usd_total += usd_applied;
    }

    /// Subtract from a balance entry and its asset total. Callers have
    /// verified availability; invariant (a) makes the total at least
    /// as large as the entry.
    fn apply_debit(&mut self, owner: &OwnerId, asset: &AssetId, native_amount: u128) {
        if let Some(entries) = self.balances.get_mut(asset) {
            if let Some(balance) = entries.get_mut(owner) {
                *balance -= native_amount;
                if *balance == 0 {
                    entries.remove(owner);
                }
            }
        }
        if let Some(total) = self.asset_totals.get_mut(asset) {
            *total -= native_amount;
        }
    }

    fn set_balance(&mut self, owner: &OwnerId, asset: &AssetId, balance: u128) {
        let entries = self.balances.entry(asset.clone()).or_default();
        if balance == 0 {
            entries.remove(owner);
        } else {
            entries.insert(owner.clone(), balance);
        }
    }

    /// Sum of all balance entries for an asset; equals
    /// [`Ledger::asset_total`] whenever the conservation invariant
    /// holds. Exposed for tests and integrity checks.
    pub fn sum_of_entries(&self, asset: &AssetId) -> u128 {
        self.balances
            .get(asset)
            .map(|entries| entries.values().sum())
            .unwrap_or(0)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
