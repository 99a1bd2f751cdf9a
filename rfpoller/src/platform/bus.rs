// rfpoller/src/platform/bus.rs
//! Synchronous byte-exchange bus (SPI on real hardware).
//!
//! Exchanges are single-outstanding. [`SharedBus`] serializes every
//! transaction through a mutex; only the orchestration loop issues
//! transactions today, but the lock is taken and released on every path,
//! error paths included, so other callers can share the bus later.

use std::sync::{Arc, Mutex};

use crate::Result;

/// Full-duplex byte exchange; `rx` is filled while `tx` is shifted out.
pub trait Bus {
    /// Exchange `tx.len()` bytes; `tx` and `rx` must be the same length.
    fn exchange(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()>;
}

/// Mutex-serialized handle to a bus. Cloning yields another handle to the
/// same underlying bus.
#[derive(Debug)]
pub struct SharedBus<B> {
    inner: Arc<Mutex<B>>,
}

impl<B> Clone for SharedBus<B> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<B: Bus> SharedBus<B> {
    /// Wrap a bus behind the transaction lock.
    pub fn new(bus: B) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bus)),
        }
    }
}

impl<B: Bus> Bus for SharedBus<B> {
    fn exchange(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
        // The guard spans the whole transaction and drops on every exit,
        // error returns included.
        let mut bus = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        bus.exchange(tx, rx)
    }
}

#[cfg(feature = "hw")]
pub use self::hw::SpiBus;

#[cfg(feature = "hw")]
mod hw {
    use rppal::spi::{Bus as SpiBusId, Mode, SlaveSelect, Spi};

    use super::Bus;
    use crate::{Error, Result};

    /// SPI clock applied once at initialization.
    const SPI_CLOCK_HZ: u32 = 6_000_000;

    /// The radio front-end on the Raspberry Pi SPI port.
    #[derive(Debug)]
    pub struct SpiBus {
        spi: Spi,
    }

    impl SpiBus {
        /// Open the given SPI bus/slave-select with the fixed Mode 1,
        /// 8-bits-per-word, 6 MHz configuration.
        pub fn new(bus: SpiBusId, slave: SlaveSelect) -> Result<Self> {
            let spi = Spi::new(bus, slave, SPI_CLOCK_HZ, Mode::Mode1)
                .map_err(|e| Error::Io(format!("spi open: {e}")))?;
            Ok(Self { spi })
        }
    }

    impl Bus for SpiBus {
        fn exchange(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<()> {
            self.spi
                .transfer(rx, tx)
                .map_err(|e| Error::Io(format!("spi transfer: {e}")))?;
            Ok(())
        }
    }
}
