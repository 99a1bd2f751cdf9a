// rfpoller/src/platform/mod.rs
//! Platform plumbing under the radio driver: the exchange bus, GPIO lines,
//! the interrupt-service thread, the shared status guard and software
//! timers.

pub mod bus;
pub mod gpio;
pub mod irq;
pub mod status;
pub mod timer;

pub use bus::{Bus, SharedBus};
pub use gpio::{EdgeTrigger, InterruptLine, MockInterruptLine, OutputLine};
pub use irq::InterruptTransport;
pub use status::InterruptStatus;
pub use timer::Timer;

#[cfg(feature = "hw")]
pub use self::hw::{init_hw, HwPlatform};

#[cfg(feature = "hw")]
mod hw {
    use std::sync::Arc;

    use rppal::spi::{Bus as SpiBusId, SlaveSelect};

    use super::bus::{SharedBus, SpiBus};
    use super::gpio::GpioInterruptLine;
    use super::irq::InterruptTransport;
    use crate::driver::InterruptHandler;
    use crate::Result;

    /// The initialized hardware pieces a chip driver is wired onto.
    pub struct HwPlatform {
        /// Serialized SPI bus to the radio front-end.
        pub bus: SharedBus<SpiBus>,
        /// Running interrupt-service thread.
        pub irq: InterruptTransport,
    }

    /// Bring up GPIO, the bus and the interrupt transport, in that order.
    /// All three must succeed before the orchestration loop may start; the
    /// first failure aborts startup.
    pub fn init_hw(
        irq_pin: u8,
        spi_bus: SpiBusId,
        slave: SlaveSelect,
        handler: Arc<dyn InterruptHandler>,
    ) -> Result<HwPlatform> {
        let line = GpioInterruptLine::new(irq_pin)?;
        let bus = SharedBus::new(SpiBus::new(spi_bus, slave)?);
        let irq = InterruptTransport::spawn(line, handler)?;
        Ok(HwPlatform { bus, irq })
    }
}
