//! Harbor Ports
//!
//! Port definitions (traits) for the Harbor custodial ledger.
//! These define the boundary between the ledger core and its external
//! collaborators: price feeds, the swap router, the asset transfer
//! layer, and the time source. All of them are treated as untrusted;
//! everything they report is validated or re-measured by the core.

mod clock;
mod feed;
mod router;
mod transfer;

pub use clock::Clock;
pub use feed::{FeedError, PriceFeed, PriceReading};
pub use router::{RouterError, SwapRouter};
pub use transfer::{AssetTransfer, TransferError};
