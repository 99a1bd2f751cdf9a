// rfpoller/src/platform/gpio.rs
//! GPIO capabilities: the interrupt line the radio chip pulses and plain
//! output lines (status LEDs).

use std::sync::mpsc;

use crate::{Error, Result};

/// The radio chip's interrupt line.
pub trait InterruptLine: Send {
    /// Block until the next edge and clear the edge condition.
    fn wait_for_edge(&mut self) -> Result<()>;
}

/// A general-purpose output line.
pub trait OutputLine {
    /// Drive the line high.
    fn set_high(&mut self) -> Result<()>;
    /// Drive the line low.
    fn set_low(&mut self) -> Result<()>;
}

/// Channel-backed interrupt line for tests: each message sent on the
/// paired [`EdgeTrigger`] is one edge.
#[derive(Debug)]
pub struct MockInterruptLine {
    edges: mpsc::Receiver<()>,
}

/// Sender half of a [`MockInterruptLine`].
#[derive(Debug, Clone)]
pub struct EdgeTrigger {
    tx: mpsc::Sender<()>,
}

impl MockInterruptLine {
    /// A line plus the trigger that fires edges on it.
    pub fn new() -> (Self, EdgeTrigger) {
        let (tx, rx) = mpsc::channel();
        (Self { edges: rx }, EdgeTrigger { tx })
    }
}

impl EdgeTrigger {
    /// Fire one edge. Fails once the line has been dropped.
    pub fn fire(&self) -> Result<()> {
        self.tx
            .send(())
            .map_err(|_| Error::Io("interrupt line closed".to_string()))
    }
}

impl InterruptLine for MockInterruptLine {
    fn wait_for_edge(&mut self) -> Result<()> {
        self.edges
            .recv()
            .map_err(|_| Error::Io("edge trigger dropped".to_string()))
    }
}

#[cfg(feature = "hw")]
pub use self::hw::{GpioInterruptLine, GpioOutputLine};

#[cfg(feature = "hw")]
mod hw {
    use rppal::gpio::{Gpio, InputPin, OutputPin, Trigger};

    use super::{InterruptLine, OutputLine};
    use crate::{Error, Result};

    /// Rising-edge interrupt input on a Raspberry Pi GPIO pin.
    #[derive(Debug)]
    pub struct GpioInterruptLine {
        pin: InputPin,
    }

    impl GpioInterruptLine {
        /// Claim the given BCM pin and arm it for rising-edge interrupts.
        pub fn new(bcm_pin: u8) -> Result<Self> {
            let gpio = Gpio::new().map_err(|e| Error::Io(format!("gpio open: {e}")))?;
            let mut pin = gpio
                .get(bcm_pin)
                .map_err(|e| Error::Io(format!("gpio pin {bcm_pin}: {e}")))?
                .into_input();
            pin.set_interrupt(Trigger::RisingEdge, None)
                .map_err(|e| Error::Io(format!("gpio edge setup: {e}")))?;
            Ok(Self { pin })
        }
    }

    impl InterruptLine for GpioInterruptLine {
        fn wait_for_edge(&mut self) -> Result<()> {
            // Blocking poll with no timeout; the kernel clears the edge.
            self.pin
                .poll_interrupt(false, None)
                .map_err(|e| Error::Io(format!("gpio edge wait: {e}")))?;
            Ok(())
        }
    }

    /// Push-pull output on a Raspberry Pi GPIO pin.
    #[derive(Debug)]
    pub struct GpioOutputLine {
        pin: OutputPin,
    }

    impl GpioOutputLine {
        /// Claim the given BCM pin as an output.
        pub fn new(bcm_pin: u8) -> Result<Self> {
            let gpio = Gpio::new().map_err(|e| Error::Io(format!("gpio open: {e}")))?;
            let pin = gpio
                .get(bcm_pin)
                .map_err(|e| Error::Io(format!("gpio pin {bcm_pin}: {e}")))?
                .into_output();
            Ok(Self { pin })
        }
    }

    impl OutputLine for GpioOutputLine {
        fn set_high(&mut self) -> Result<()> {
            self.pin.set_high();
            Ok(())
        }

        fn set_low(&mut self) -> Result<()> {
            self.pin.set_low();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_line_delivers_fired_edges() {
        let (mut line, trigger) = MockInterruptLine::new();
        trigger.fire().unwrap();
        line.wait_for_edge().unwrap();
    }

    #[test]
    fn dropped_trigger_errors_the_wait() {
        let (mut line, trigger) = MockInterruptLine::new();
        drop(trigger);
        assert!(line.wait_for_edge().is_err());
    }

    #[test]
    fn dropped_line_errors_the_trigger() {
        let (line, trigger) = MockInterruptLine::new();
        drop(line);
        assert!(trigger.fire().is_err());
    }
}
