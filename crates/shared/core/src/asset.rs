use serde::{Deserialize, Serialize};

/// Canonical identifier of the chain-native currency.
///
/// The native currency is never a registered asset in the usual sense;
/// it is addressed through this one identifier after alias resolution.
pub const NATIVE_ASSET: &str = "native";

/// Alias spelling of the native currency accepted at the boundary.
///
/// Some callers address the native currency through this sentinel
/// instead of the canonical identifier; it is folded into
/// [`NATIVE_ASSET`] before any lookup or storage.
pub const NATIVE_ALIAS: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

/// Unique identifier for an asset
///
/// This provides a stable reference to an asset that can be stored in
/// balance entries and used as map keys, without carrying any of the
/// asset's registration data around.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub String);

impl AssetId {
    /// Create a new asset ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The canonical native-currency identifier
    pub fn native() -> Self {
        Self(NATIVE_ASSET.to_string())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the canonical native-currency identifier
    pub fn is_native(&self) -> bool {
        self.0 == NATIVE_ASSET
    }

    /// Resolve alias spellings to the canonical identifier.
    ///
    /// The empty identifier and the designated native alias both map to
    /// [`AssetId::native`]; every other identifier passes through
    /// unchanged. Pure, and applied at the boundary of every public
    /// entry point before any lookup or storage.
    pub fn canonical(&self) -> AssetId {
        if self.0.is_empty() || self.0.eq_ignore_ascii_case(NATIVE_ALIAS) {
            AssetId::native()
        } else {
            self.clone()
        }
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a balance owner
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

impl OwnerId {
    /// Create a new owner ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OwnerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OwnerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
