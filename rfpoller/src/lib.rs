// rfpoller/src/lib.rs

//! rfpoller
//!
//! Orchestration loop for ST25R3911B-style NFC/RFID poller front-ends:
//! technology detection, collision resolution, activation, presence-check
//! exchanges and deactivation, over a pluggable radio driver.
#![warn(missing_docs)]

pub mod buffer;
pub mod constants;
pub mod device;
pub mod driver;
pub mod error;
pub mod platform;
pub mod poller;
pub mod prelude;
pub mod test_support;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the identity newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
