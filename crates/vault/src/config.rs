use chrono::Duration;
use harbor_core::AssetId;

/// Static configuration of a vault instance
///
/// The USD capacity and the per-operation USD withdrawal ceiling are
/// fixed for the lifetime of the vault; only the native-unit
/// withdrawal ceiling can be changed later through the admin surface.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Asset that swap-based deposits settle into (e.g. a stablecoin)
    pub settlement_asset: AssetId,
    /// Maximum USD-denominated total the vault may ever hold
    pub capacity_usd: u128,
    /// Per-operation withdrawal ceiling in USD units
    pub usd_withdrawal_limit: u128,
    /// Per-operation withdrawal ceiling for the native currency, in
    /// native smallest units; zero disables the native ceiling
    pub native_withdrawal_limit: u128,
    /// Decimal precision of the native currency
    pub native_decimals: u8,
    /// Maximum age of an oracle reading before it is rejected
    pub staleness_bound: Duration,
}

impl VaultConfig {
    /// Create a config with the given hard limits and the defaults for
    /// everything else (no native ceiling, 18 native decimals, one
    /// hour staleness bound)
    pub fn new(
        settlement_asset: impl Into<AssetId>,
        capacity_usd: u128,
        usd_withdrawal_limit: u128,
    ) -> Self {
        Self {
            settlement_asset: settlement_asset.into(),
            capacity_usd,
            usd_withdrawal_limit,
            native_withdrawal_limit: 0,
            native_decimals: 18,
            staleness_bound: Duration::hours(1),
        }
    }

    pub fn with_native_withdrawal_limit(mut self, limit: u128) -> Self {
        self.native_withdrawal_limit = limit;
        self
    }

    pub fn with_native_decimals(mut self, decimals: u8) -> Self {
        self.native_decimals = decimals;
        self
    }

    pub fn with_staleness_bound(mut self, bound: Duration) -> Self {
        self.staleness_bound = bound;
        self
    }
}
