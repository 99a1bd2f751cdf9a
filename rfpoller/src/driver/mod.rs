// rfpoller/src/driver/mod.rs
//! The radio-chip capability boundary: the [`RadioDriver`] trait the poller
//! orchestrates and a scripted mock implementation for tests.

pub mod mock;
pub mod traits;

pub use mock::{MockDriver, MockInterruptService, ScriptedStatus};
pub use traits::{AtrParam, InterruptHandler, NfcDepOperFlags, RadioDriver, TransceiveStatus};
