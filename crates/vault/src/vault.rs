use std::sync::Arc;

use harbor_core::{AssetId, OwnerId, VaultError, VaultEvent, VaultResult};
use harbor_ports::{AssetTransfer, Clock, PriceFeed, SwapRouter};
use log::{info, warn};
use uuid::Uuid;

use crate::config::VaultConfig;
use crate::ledger::Ledger;
use crate::limits::LimitEnforcer;
use crate::oracle::OracleGateway;
use crate::registry::AssetRegistry;
use crate::swap;

/// The custodial ledger engine
///
/// All public state-changing entry points canonicalize asset
/// identifiers first, run under the operation-in-progress guard, and
/// append exactly one audit event on success. Balances are only ever
/// written through the [`Ledger`]; no other component touches them.
pub struct Vault {
    settlement_asset: AssetId,
    registry: AssetRegistry,
    oracle: OracleGateway,
    ledger: Ledger,
    limits: LimitEnforcer,
    transfers: Arc<dyn AssetTransfer>,
    router: Arc<dyn SwapRouter>,
    journal: Vec<VaultEvent>,
    /// Operation-in-progress flag; a second state-changing call while
    /// it is held fails fast instead of queueing
    entered: bool,
}

impl Vault {
    pub fn new(
        config: VaultConfig,
        native_feed: Arc<dyn PriceFeed>,
        transfers: Arc<dyn AssetTransfer>,
        router: Arc<dyn SwapRouter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        info!(
            "vault starting: capacity {} USD units, per-op withdrawal limit {} USD units, \
             clock {}",
            config.capacity_usd,
            config.usd_withdrawal_limit,
            clock.name()
        );
        Self {
            settlement_asset: config.settlement_asset.canonical(),
            registry: AssetRegistry::new(native_feed, config.native_decimals),
            oracle: OracleGateway::new(config.staleness_bound, clock),
            ledger: Ledger::new(),
            limits: LimitEnforcer::new(
                config.capacity_usd,
                config.usd_withdrawal_limit,
                config.native_withdrawal_limit,
            ),
            transfers,
            router,
            journal: Vec::new(),
            entered: false,
        }
    }

    // --- state-changing entry points -------------------------------

    /// Deposit the native currency. Returns the USD units credited.
    pub fn deposit_native(&mut self, owner: &OwnerId, amount: u128) -> VaultResult<u128> {
        self.with_guard(|vault| vault.deposit_inner(owner, &AssetId::native(), amount))
    }

    /// Deposit a registered asset (or the native currency via an
    /// alias). Returns the USD units credited.
    pub fn deposit(&mut self, owner: &OwnerId, asset: &AssetId, amount: u128) -> VaultResult<u128> {
        let asset = asset.canonical();
        self.with_guard(|vault| vault.deposit_inner(owner, &asset, amount))
    }

    /// Deposit an arbitrary swap-supported asset by converting it into
    /// the settlement asset first. Returns the settlement amount
    /// credited, as measured, never as reported by the router.
    pub fn deposit_via_swap(
        &mut self,
        owner: &OwnerId,
        asset: &AssetId,
        amount: u128,
    ) -> VaultResult<u128> {
        let asset = asset.canonical();
        self.with_guard(|vault| vault.swap_deposit_inner(owner, &asset, amount))
    }

    /// Withdraw an asset by canonical identifier and amount. Returns
    /// the USD units the withdrawal was valued at.
    pub fn withdraw(&mut self, owner: &OwnerId, asset: &AssetId, amount: u128) -> VaultResult<u128> {
        let asset = asset.canonical();
        self.with_guard(|vault| vault.withdraw_inner(owner, &asset, amount))
    }

    // --- admin surface ---------------------------------------------

    /// Register an asset with its price feed handle
    pub fn register_asset(&mut self, asset: &AssetId, feed: Arc<dyn PriceFeed>) -> VaultResult<()> {
        let asset = asset.canonical();
        self.with_guard(|vault| {
            let decimals = vault.registry.register(&asset, feed)?;
            vault.record(VaultEvent::AssetRegistered {
                asset: asset.clone(),
                decimals,
            });
            Ok(())
        })
    }

    /// Remove an asset's registration
    pub fn unregister_asset(&mut self, asset: &AssetId) -> VaultResult<()> {
        let asset = asset.canonical();
        self.with_guard(|vault| {
            vault.registry.unregister(&asset)?;
            vault.record(VaultEvent::AssetUnregistered {
                asset: asset.clone(),
            });
            Ok(())
        })
    }

    /// Rotate an asset's price feed (allowed for the native currency)
    pub fn update_feed(&mut self, asset: &AssetId, feed: Arc<dyn PriceFeed>) -> VaultResult<()> {
        let asset = asset.canonical();
        self.with_guard(|vault| {
            vault.registry.update_feed(&asset, feed)?;
            vault.record(VaultEvent::FeedUpdated {
                asset: asset.clone(),
            });
            Ok(())
        })
    }

    /// Toggle whether an asset may be deposited through the swap path
    pub fn set_swap_supported(&mut self, asset: &AssetId, enabled: bool) -> VaultResult<()> {
        let asset = asset.canonical();
        self.with_guard(|vault| {
            vault.registry.set_swap_supported(&asset, enabled)?;
            vault.record(VaultEvent::SwapSupportChanged {
                asset: asset.clone(),
                enabled,
            });
            Ok(())
        })
    }

    /// Adjust the native-unit per-operation withdrawal ceiling; zero
    /// disables it
    pub fn set_native_withdrawal_limit(&mut self, limit: u128) -> VaultResult<()> {
        self.with_guard(|vault| {
            vault.limits.set_native_withdrawal_limit(limit);
            vault.record(VaultEvent::NativeWithdrawalLimitChanged { limit });
            Ok(())
        })
    }

    /// Correct an owner's balance to an absolute value, adjusting both
    /// custody totals by the oracle-valued deltas and recording the
    /// operator's reason. A no-op when the balance already matches.
    pub fn recover_balance(
        &mut self,
        owner: &OwnerId,
        asset: &AssetId,
        new_native_balance: u128,
        reason: &str,
    ) -> VaultResult<()> {
        let asset = asset.canonical();
        self.with_guard(|vault| {
            let old_balance = vault.ledger.balance(owner, &asset);
            if old_balance == new_native_balance {
                return Ok(());
            }

            let entry = vault.registry.entry(&asset)?;
            let old_usd = vault.oracle.value_in_usd(&asset, entry, old_balance)?;
            let new_usd = vault
                .oracle
                .value_in_usd(&asset, entry, new_native_balance)?;
            vault
                .ledger
                .rewrite(owner, &asset, new_native_balance, old_usd, new_usd)?;

            warn!(
                "balance recovery: owner {owner}, asset {asset}, {old_balance} -> \
                 {new_native_balance} ({reason})"
            );
            vault.record(VaultEvent::BalanceRecovered {
                record_id: Uuid::new_v4(),
                owner: owner.clone(),
                asset: asset.clone(),
                old_balance,
                new_balance: new_native_balance,
                reason: reason.to_string(),
            });
            Ok(())
        })
    }

    // --- read-only surface -----------------------------------------

    pub fn balance(&self, owner: &OwnerId, asset: &AssetId) -> u128 {
        self.ledger.balance(owner, &asset.canonical())
    }

    pub fn asset_total(&self, asset: &AssetId) -> u128 {
        self.ledger.asset_total(&asset.canonical())
    }

    pub fn usd_total(&self) -> u128 {
        self.ledger.usd_total()
    }

    pub fn remaining_capacity(&self) -> u128 {
        self.limits.remaining_capacity(self.ledger.usd_total())
    }

    pub fn deposit_count(&self) -> u64 {
        self.ledger.deposit_count()
    }

    pub fn withdrawal_count(&self) -> u64 {
        self.ledger.withdrawal_count()
    }

    pub fn settlement_asset(&self) -> &AssetId {
        &self.settlement_asset
    }

    pub fn limits(&self) -> &LimitEnforcer {
        &self.limits
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    /// The audit journal, oldest first
    pub fn events(&self) -> &[VaultEvent] {
        &self.journal
    }

    /// The audit journal serialized as JSON, for off-system archival
    pub fn export_journal(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.journal)
    }

    // --- internals -------------------------------------------------

    /// Run a state-changing operation under the reentrancy guard. The
    /// flag is released on every exit path; an operation that fails
    /// must have unwound its own state before returning.
    fn with_guard<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> VaultResult<T>,
    ) -> VaultResult<T> {
        if self.entered {
            return Err(VaultError::ReentrantCall);
        }
        self.entered = true;
        let result = f(self);
        self.entered = false;
        result
    }

    fn deposit_inner(&mut self, owner: &OwnerId, asset: &AssetId, amount: u128) -> VaultResult<u128> {
        if amount == 0 {
            return Err(VaultError::ZeroAmount);
        }
        let entry = self.registry.entry(asset)?;
        let usd = self.oracle.value_in_usd(asset, entry, amount)?;
        self.limits.check_deposit(self.ledger.usd_total(), usd)?;

        // Effects before interactions: bookkeeping first, then the pull
        self.ledger.credit(owner, asset, amount, usd)?;
        if let Err(err) = self.transfers.pull(asset, owner, amount) {
            self.ledger.unwind_credit(owner, asset, amount, usd);
            return Err(VaultError::TransferFailed(err.to_string()));
        }

        self.record(VaultEvent::Deposited {
            owner: owner.clone(),
            asset: asset.clone(),
            native_amount: amount,
            usd_amount: usd,
        });
        Ok(usd)
    }

    fn withdraw_inner(
        &mut self,
        owner: &OwnerId,
        asset: &AssetId,
        amount: u128,
    ) -> VaultResult<u128> {
        if amount == 0 {
            return Err(VaultError::ZeroAmount);
        }
        let available = self.ledger.balance(owner, asset);
        if amount > available {
            return Err(VaultError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        let entry = self.registry.entry(asset)?;
        let usd = self.oracle.value_in_usd(asset, entry, amount)?;
        self.limits.check_withdrawal(asset, amount, usd)?;

        let usd_applied = self.ledger.debit(owner, asset, amount, usd)?;
        if let Err(err) = self.transfers.push(asset, owner, amount) {
            self.ledger.unwind_debit(owner, asset, amount, usd_applied);
            return Err(VaultError::TransferFailed(err.to_string()));
        }

        self.record(VaultEvent::Withdrawn {
            owner: owner.clone(),
            asset: asset.clone(),
            native_amount: amount,
            usd_amount: usd,
        });
        Ok(usd)
    }

    fn swap_deposit_inner(
        &mut self,
        owner: &OwnerId,
        asset: &AssetId,
        amount: u128,
    ) -> VaultResult<u128> {
        if amount == 0 {
            return Err(VaultError::ZeroAmount);
        }
        if asset.is_native() {
            return Err(VaultError::NotSupportedForSwap(asset.clone()));
        }
        // Depositing the settlement asset itself needs no conversion
        if *asset == self.settlement_asset {
            self.deposit_inner(owner, asset, amount)?;
            return Ok(amount);
        }
        let entry = self.registry.entry(asset)?;
        if !entry.swap_supported {
            return Err(VaultError::NotSupportedForSwap(asset.clone()));
        }

        let settlement = self.settlement_asset.clone();
        let received = swap::execute_swap(
            self.transfers.as_ref(),
            self.router.as_ref(),
            owner,
            asset,
            amount,
            &settlement,
        )?;

        // From here on the vault holds the measured settlement amount;
        // any rejection must hand it back before surfacing the error.
        let valued = self
            .registry
            .entry(&settlement)
            .and_then(|entry| self.oracle.value_in_usd(&settlement, entry, received))
            .and_then(|usd| {
                self.limits
                    .check_deposit(self.ledger.usd_total(), usd)
                    .map(|_| usd)
            });
        let usd = match valued {
            Ok(usd) => usd,
            Err(reject) => {
                self.transfers
                    .push(&settlement, owner, received)
                    .map_err(|err| VaultError::TransferFailed(err.to_string()))?;
                return Err(reject);
            }
        };
        self.ledger.credit(owner, &settlement, received, usd)?;

        self.record(VaultEvent::SwapDeposited {
            owner: owner.clone(),
            asset_in: asset.clone(),
            amount_in: amount,
            settlement_asset: settlement,
            settlement_credited: received,
            usd_amount: usd,
        });
        Ok(received)
    }

    fn record(&mut self, event: VaultEvent) {
        info!("audit {}: {event:?}", event.kind());
        self.journal.push(event);
    }
}
