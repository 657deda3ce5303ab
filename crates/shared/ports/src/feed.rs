use chrono::{DateTime, Utc};
use thiserror::Error;

/// One raw reading from an external price feed
///
/// This mirrors the feed's wire tuple: the round that was requested,
/// the answer, when it was last updated, and the round the answer was
/// actually computed in. Nothing here is trusted until the oracle
/// gateway has validated it: a feed may report a non-positive price,
/// an unset timestamp, or an answer carried over from an older round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceReading {
    /// Identifier of the latest round
    pub round_id: u64,
    /// Price in USD units per whole asset unit
    pub price: i128,
    /// When the answer was last updated; `None` models an unset timestamp
    pub updated_at: Option<DateTime<Utc>>,
    /// The round that actually produced the answer
    pub answered_in_round: u64,
}

/// Errors surfaced by a price feed itself (as opposed to hygiene
/// violations in an otherwise well-formed reading, which the oracle
/// gateway detects)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("feed unavailable: {0}")]
    Unavailable(String),
}

/// Port for an external price feed, one per asset
pub trait PriceFeed: Send + Sync {
    /// Fetch the latest reading. Read-only; never mutates ledger state.
    fn latest_reading(&self) -> Result<PriceReading, FeedError>;

    /// Native decimal precision of the asset this feed prices.
    ///
    /// Cached by the registry at registration time and used to scale
    /// smallest-unit amounts down to whole units during valuation.
    fn decimals(&self) -> u8;
}
