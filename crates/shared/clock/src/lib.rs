//! Harbor Clock Infrastructure
//!
//! Time sources behind the [`Clock`](harbor_ports::Clock) port:
//!
//! - [`SystemClock`]: real wall-clock time for production
//! - [`ManualClock`]: frozen, settable time for deterministic tests
//!   (staleness bounds are exercised by advancing it past a reading's
//!   timestamp)

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;
