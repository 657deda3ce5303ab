use std::collections::HashMap;
use std::sync::Arc;

use harbor_core::{AssetId, VaultError, VaultResult};
use harbor_ports::PriceFeed;
use log::info;

/// Registration record for one asset
pub struct AssetEntry {
    /// Price feed handle for this asset
    pub feed: Arc<dyn PriceFeed>,
    /// Native decimal precision, cached at registration time
    pub decimals: u8,
    /// Whether the asset may be auto-swapped into the settlement asset
    pub swap_supported: bool,
}

impl std::fmt::Debug for AssetEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetEntry")
            .field("decimals", &self.decimals)
            .field("swap_supported", &self.swap_supported)
            .finish()
    }
}

/// Maps each asset to its price feed, cached decimal precision, and
/// swap-support flag
///
/// The native currency holds a built-in entry created at construction
/// so that every valuation goes through one lookup path. It can never
/// be registered, unregistered, or marked swap-supported; its feed may
/// be rotated through [`AssetRegistry::update_feed`].
///
/// Callers are expected to canonicalize identifiers before lookup; the
/// mutating operations re-check the native identifier themselves
/// because getting that wrong would corrupt the native entry.
pub struct AssetRegistry {
    entries: HashMap<AssetId, AssetEntry>,
}

impl AssetRegistry {
    /// Create a registry holding only the built-in native entry
    pub fn new(native_feed: Arc<dyn PriceFeed>, native_decimals: u8) -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            AssetId::native(),
            AssetEntry {
                feed: native_feed,
                decimals: native_decimals,
                swap_supported: false,
            },
        );
        Self { entries }
    }

    /// Register an asset, caching its decimal precision from the feed
    /// handle. Returns the cached decimals.
    pub fn register(&mut self, asset: &AssetId, feed: Arc<dyn PriceFeed>) -> VaultResult<u8> {
        if asset.is_native() {
            return Err(VaultError::NativeAssetReserved);
        }
        if self.entries.contains_key(asset) {
            return Err(VaultError::AlreadyRegistered(asset.clone()));
        }
        let decimals = feed.decimals();
        self.entries.insert(
            asset.clone(),
            AssetEntry {
                feed,
                decimals,
                swap_supported: false,
            },
        );
        info!("registered asset {asset} with {decimals} decimals");
        Ok(decimals)
    }

    /// Remove an asset's registration, clearing its feed and decimals
    pub fn unregister(&mut self, asset: &AssetId) -> VaultResult<()> {
        if asset.is_native() {
            return Err(VaultError::NativeAssetReserved);
        }
        if self.entries.remove(asset).is_none() {
            return Err(VaultError::AssetNotSupported(asset.clone()));
        }
        info!("unregistered asset {asset}");
        Ok(())
    }

    /// Replace an asset's price feed and refresh its cached decimals.
    /// Allowed for the native currency.
    pub fn update_feed(&mut self, asset: &AssetId, feed: Arc<dyn PriceFeed>) -> VaultResult<()> {
        let entry = self
            .entries
            .get_mut(asset)
            .ok_or_else(|| VaultError::AssetNotSupported(asset.clone()))?;
        entry.decimals = feed.decimals();
        entry.feed = feed;
        info!("updated price feed for {asset}");
        Ok(())
    }

    /// Toggle whether an asset may be auto-swapped. The native
    /// currency may never be swap-supported.
    pub fn set_swap_supported(&mut self, asset: &AssetId, enabled: bool) -> VaultResult<()> {
        if asset.is_native() {
            return Err(VaultError::NativeAssetReserved);
        }
        let entry = self
            .entries
            .get_mut(asset)
            .ok_or_else(|| VaultError::AssetNotSupported(asset.clone()))?;
        entry.swap_supported = enabled;
        info!("swap support for {asset} set to {enabled}");
        Ok(())
    }

    /// Look up a registration, failing with `AssetNotSupported` for
    /// unknown assets
    pub fn entry(&self, asset: &AssetId) -> VaultResult<&AssetEntry> {
        self.entries
            .get(asset)
            .ok_or_else(|| VaultError::AssetNotSupported(asset.clone()))
    }

    pub fn get(&self, asset: &AssetId) -> Option<&AssetEntry> {
        self.entries.get(asset)
    }

    pub fn is_registered(&self, asset: &AssetId) -> bool {
        self.entries.contains_key(asset)
    }

    pub fn swap_supported(&self, asset: &AssetId) -> bool {
        self.entries
            .get(asset)
            .is_some_and(|entry| entry.swap_supported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harbor_ports::{FeedError, PriceReading};

    struct DummyFeed {
        decimals: u8,
    }

    impl PriceFeed for DummyFeed {
        fn latest_reading(&self) -> Result<PriceReading, FeedError> {
            Ok(PriceReading {
                round_id: 1,
                price: 1,
                updated_at: Some(chrono::Utc::now()),
                answered_in_round: 1,
            })
        }

        fn decimals(&self) -> u8 {
            self.decimals
        }
    }

    fn feed(decimals: u8) -> Arc<dyn PriceFeed> {
        Arc::new(DummyFeed { decimals })
    }

    fn registry() -> AssetRegistry {
        AssetRegistry::new(feed(18), 18)
    }

    #[test]
    fn test_native_entry_is_built_in() {
        let registry = registry();
        assert!(registry.is_registered(&AssetId::native()));
        assert!(!registry.swap_supported(&AssetId::native()));
        assert_eq!(registry.entry(&AssetId::native()).unwrap().decimals, 18);
    }

    #[test]
    fn test_register_caches_decimals() {
        let mut registry = registry();
        let decimals = registry.register(&AssetId::new("usdc"), feed(6)).unwrap();
        assert_eq!(decimals, 6);
        assert_eq!(registry.entry(&AssetId::new("usdc")).unwrap().decimals, 6);
    }

    #[test]
    fn test_register_rejects_native() {
        let mut registry = registry();
        let err = registry.register(&AssetId::native(), feed(18)).unwrap_err();
        assert_eq!(err, VaultError::NativeAssetReserved);
    }

    #[test]
    fn test_register_rejects_duplicate() {
        let mut registry = registry();
        registry.register(&AssetId::new("usdc"), feed(6)).unwrap();
        let err = registry
            .register(&AssetId::new("usdc"), feed(6))
            .unwrap_err();
        assert_eq!(err, VaultError::AlreadyRegistered(AssetId::new("usdc")));
    }

    #[test]
    fn test_unregister_clears_entry() {
        let mut registry = registry();
        registry.register(&AssetId::new("usdc"), feed(6)).unwrap();
        registry.unregister(&AssetId::new("usdc")).unwrap();
        assert!(!registry.is_registered(&AssetId::new("usdc")));

        let err = registry.unregister(&AssetId::new("usdc")).unwrap_err();
        assert_eq!(err, VaultError::AssetNotSupported(AssetId::new("usdc")));
    }

    #[test]
    fn test_unregister_rejects_native() {
        let mut registry = registry();
        let err = registry.unregister(&AssetId::native()).unwrap_err();
        assert_eq!(err, VaultError::NativeAssetReserved);
    }

    #[test]
    fn test_update_feed_refreshes_decimals() {
        let mut registry = registry();
        registry.register(&AssetId::new("wbtc"), feed(8)).unwrap();
        registry
            .update_feed(&AssetId::new("wbtc"), feed(10))
            .unwrap();
        assert_eq!(registry.entry(&AssetId::new("wbtc")).unwrap().decimals, 10);
    }

    #[test]
    fn test_update_feed_allowed_for_native() {
        let mut registry = registry();
        registry.update_feed(&AssetId::native(), feed(18)).unwrap();
    }

    #[test]
    fn test_swap_support_toggle() {
        let mut registry = registry();
        registry.register(&AssetId::new("pepe"), feed(18)).unwrap();
        assert!(!registry.swap_supported(&AssetId::new("pepe")));

        registry
            .set_swap_supported(&AssetId::new("pepe"), true)
            .unwrap();
        assert!(registry.swap_supported(&AssetId::new("pepe")));

        registry
            .set_swap_supported(&AssetId::new("pepe"), false)
            .unwrap();
        assert!(!registry.swap_supported(&AssetId::new("pepe")));
    }

    #[test]
    fn test_swap_support_rejects_native() {
        let mut registry = registry();
        let err = registry
            .set_swap_supported(&AssetId::native(), true)
            .unwrap_err();
        assert_eq!(err, VaultError::NativeAssetReserved);
    }
}
