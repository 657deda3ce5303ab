use std::sync::Arc;

use chrono::Duration;
use harbor_core::{AssetId, VaultError, VaultResult};
use harbor_ports::Clock;
use log::{debug, warn};

use crate::registry::AssetEntry;

/// Validates raw feed readings and converts native amounts into the
/// common USD accounting unit
///
/// The gateway does not trust any "valid" flag from the feed: it
/// re-checks the price sign, the timestamp, round consistency, and the
/// reading's age on every call. Conversion is pure with respect to
/// ledger state, so one logical operation may value the same amount
/// several times without side effects.
pub struct OracleGateway {
    staleness_bound: Duration,
    clock: Arc<dyn Clock>,
}

impl OracleGateway {
    pub fn new(staleness_bound: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            staleness_bound,
            clock,
        }
    }

    pub fn staleness_bound(&self) -> Duration {
        self.staleness_bound
    }

    /// Value `native_amount` of `asset` in USD units.
    ///
    /// `usd = native_amount * price / 10^decimals`, checked integer
    /// arithmetic, truncating toward zero.
    pub fn value_in_usd(
        &self,
        asset: &AssetId,
        entry: &AssetEntry,
        native_amount: u128,
    ) -> VaultResult<u128> {
        let reading = entry.feed.latest_reading().map_err(|err| {
            warn!("price feed for {asset} unavailable: {err}");
            VaultError::InvalidPrice(asset.clone())
        })?;

        if reading.price <= 0 {
            warn!("non-positive price {} reported for {asset}", reading.price);
            return Err(VaultError::InvalidPrice(asset.clone()));
        }
        let Some(updated_at) = reading.updated_at else {
            warn!("unset price timestamp reported for {asset}");
            return Err(VaultError::InvalidPrice(asset.clone()));
        };
        // The answer must come from the round that was asked for, or a
        // newer one; an older reporting round is a carried-over answer.
        if reading.answered_in_round < reading.round_id {
            warn!(
                "stale round for {asset}: answered in {} but latest round is {}",
                reading.answered_in_round, reading.round_id
            );
            return Err(VaultError::InvalidPrice(asset.clone()));
        }
        let age = self.clock.now() - updated_at;
        if age > self.staleness_bound {
            return Err(VaultError::StalePrice {
                asset: asset.clone(),
                updated_at,
                max_age: self.staleness_bound,
            });
        }

        let price = reading.price as u128;
        let scale = 10u128
            .checked_pow(u32::from(entry.decimals))
            .ok_or_else(|| VaultError::AmountOverflow(asset.clone()))?;
        let usd = native_amount
            .checked_mul(price)
            .ok_or_else(|| VaultError::AmountOverflow(asset.clone()))?
            / scale;

        debug!("valued {native_amount} units of {asset} at {usd} USD units (price {price})");
        Ok(usd)
    }
}
