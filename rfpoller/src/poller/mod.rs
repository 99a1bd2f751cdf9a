// rfpoller/src/poller/mod.rs
//! The discovery/activation orchestration state machine.
//!
//! One outer cycle: technology detection, collision resolution, activation
//! of the first discovered device, then a presence-check exchange repeated
//! until the device disappears, then deactivation and back to the start.
//! Every iteration is a single non-blocking [`Poller::step`]; pacing is
//! done with software timers, never by sleeping.

mod activate;
mod deactivate;
mod detect;
mod exchange;
mod resolve;

use log::{debug, info, warn};

use crate::buffer::TransceiveBuffers;
use crate::constants::{EXCHANGE_PERIOD_MS, FIELD_OFF_SETTLE_MS, RAW_EXCHANGE_FWT_MS};
use crate::device::DeviceList;
use crate::driver::{RadioDriver, TransceiveStatus};
use crate::platform::timer::Timer;
use crate::types::TechnologyMask;
use crate::{Error, Result};

/// States of the orchestration loop. `Init` and `Deactivation` close the
/// outer cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    /// Reset per-cycle bookkeeping.
    Init,
    /// Poll each technology for presence.
    TechDetect,
    /// Run anticollision on every technology flagged present.
    CollisionAvoidance,
    /// Activate one discovered device.
    Activation,
    /// Trigger a presence-check exchange.
    ExchangeStart,
    /// Poll the running exchange to completion.
    ExchangeCheck,
    /// Release the active device and turn the field off.
    Deactivation,
}

/// Runtime timing knobs. List capacity and buffer sizes are compile-time
/// constants.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// Pause between two successful presence checks, in milliseconds.
    pub exchange_period_ms: u32,
    /// Waiting time for raw-frame responses, in milliseconds.
    pub raw_fwt_ms: u32,
    /// Field-off settle period between cycles, in milliseconds.
    pub field_off_settle_ms: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            exchange_period_ms: EXCHANGE_PERIOD_MS,
            raw_fwt_ms: RAW_EXCHANGE_FWT_MS,
            field_off_settle_ms: FIELD_OFF_SETTLE_MS,
        }
    }
}

/// Orchestration context: the driver plus all per-cycle state. Constructed
/// once and handed into every component call; there are no globals.
pub struct Poller<D> {
    driver: D,
    config: PollerConfig,
    state: PollerState,
    techs_found: TechnologyMask,
    devices: DeviceList,
    buffers: TransceiveBuffers,
    rcv_len: usize,
    next_exchange: Option<Timer>,
    field_settle: Option<Timer>,
}

impl<D: RadioDriver> Poller<D> {
    /// Poller with default timing.
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, PollerConfig::default())
    }

    /// Poller with explicit timing knobs.
    pub fn with_config(driver: D, config: PollerConfig) -> Self {
        Self {
            driver,
            config,
            state: PollerState::Init,
            techs_found: TechnologyMask::empty(),
            devices: DeviceList::new(),
            buffers: TransceiveBuffers::new(),
            rcv_len: 0,
            next_exchange: None,
            field_settle: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> PollerState {
        self.state
    }

    /// Devices discovered this cycle.
    pub fn devices(&self) -> &DeviceList {
        &self.devices
    }

    /// The shared transmit/receive buffers.
    pub fn buffers(&self) -> &TransceiveBuffers {
        &self.buffers
    }

    /// Shared access to the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Exclusive access to the driver, mainly for scripting mocks.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Bytes received by the last completed exchange, checked against the
    /// active interface's framing.
    pub fn received(&self) -> Result<&[u8]> {
        let record = self
            .devices
            .active()
            .ok_or(Error::WrongState("no active device"))?;
        let interface = record
            .interface()
            .ok_or(Error::WrongState("active device has no interface"))?;
        self.buffers.received(interface, self.rcv_len)
    }

    /// Run the loop forever.
    pub fn run(&mut self) {
        loop {
            self.step();
        }
    }

    /// One state-machine iteration. Never blocks; returns the state the
    /// poller is in afterwards.
    pub fn step(&mut self) -> PollerState {
        self.driver.worker();

        match self.state {
            PollerState::Init => {
                if let Some(settle) = self.field_settle {
                    if !settle.is_expired() {
                        return self.state;
                    }
                }
                self.field_settle = None;
                self.techs_found = TechnologyMask::empty();
                self.devices.clear();
                self.buffers.reset();
                self.state = PollerState::TechDetect;
            }

            PollerState::TechDetect => {
                let mask = self.detect();
                self.state = if mask.is_empty() {
                    PollerState::Deactivation
                } else {
                    PollerState::CollisionAvoidance
                };
            }

            PollerState::CollisionAvoidance => {
                let mask = self.techs_found;
                let count = self.resolve(mask);
                if count == 0 {
                    self.state = PollerState::Deactivation;
                } else {
                    info!("device(s) found: {count}");
                    self.state = PollerState::Activation;
                }
            }

            PollerState::Activation => match self.activate(0) {
                Ok(()) => self.state = PollerState::ExchangeStart,
                Err(e) => {
                    debug!("activation failed: {e}");
                    self.state = PollerState::Deactivation;
                }
            },

            PollerState::ExchangeStart => {
                if let Some(pause) = self.next_exchange {
                    if !pause.is_expired() {
                        return self.state;
                    }
                }
                self.next_exchange = None;
                match self.exchange_start() {
                    Ok(()) => self.state = PollerState::ExchangeCheck,
                    Err(e) => {
                        warn!("exchange start failed: {e}");
                        self.state = PollerState::Deactivation;
                    }
                }
            }

            PollerState::ExchangeCheck => match self.exchange_check() {
                TransceiveStatus::InProgress => {}
                TransceiveStatus::Done(len) => {
                    debug!("presence check ok ({len} bytes)");
                    self.next_exchange = Some(Timer::start(self.config.exchange_period_ms));
                    self.state = PollerState::ExchangeStart;
                }
                TransceiveStatus::Failed(e) => {
                    info!("data exchange terminated: {e}");
                    self.state = PollerState::Deactivation;
                }
            },

            PollerState::Deactivation => {
                self.deactivate();
                self.field_settle = Some(Timer::start(self.config.field_off_settle_ms));
                self.state = PollerState::Init;
            }
        }

        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{MockDriver, ScriptedStatus};
    use crate::types::VicinityUid;

    fn quick_config() -> PollerConfig {
        PollerConfig {
            exchange_period_ms: 0,
            raw_fwt_ms: 20,
            field_off_settle_ms: 0,
        }
    }

    #[test]
    fn empty_field_cycles_through_deactivation() {
        let mut poller = Poller::with_config(MockDriver::new(), quick_config());
        assert_eq!(poller.step(), PollerState::TechDetect);
        assert_eq!(poller.step(), PollerState::Deactivation);
        assert_eq!(poller.step(), PollerState::Init);
        assert_eq!(poller.driver().field_off_count, 1);
        assert_eq!(poller.step(), PollerState::TechDetect);
    }

    #[test]
    fn discovered_device_reaches_exchange() {
        let mut driver = MockDriver::new();
        driver.add_device(crate::device::ListenInfo::NfcV {
            uid: VicinityUid::from_bytes([1, 2, 3, 4, 5, 6, 7, 8]),
        });
        driver.push_status(ScriptedStatus::Done(vec![0x00, 0x0F]));

        let mut poller = Poller::with_config(driver, quick_config());
        assert_eq!(poller.step(), PollerState::TechDetect);
        assert_eq!(poller.step(), PollerState::CollisionAvoidance);
        assert_eq!(poller.step(), PollerState::Activation);
        assert_eq!(poller.step(), PollerState::ExchangeStart);
        assert_eq!(poller.step(), PollerState::ExchangeCheck);
        assert_eq!(poller.step(), PollerState::ExchangeStart);
        assert_eq!(poller.received().unwrap(), &[0x00, 0x0F]);
    }

    #[test]
    fn exchange_failure_drives_deactivation() {
        let mut driver = MockDriver::new();
        driver.add_device(crate::device::ListenInfo::NfcV {
            uid: VicinityUid::from_bytes([1; 8]),
        });
        // Exhausted status script reports a timeout on the first check.

        let mut poller = Poller::with_config(driver, quick_config());
        while poller.state() != PollerState::ExchangeCheck {
            poller.step();
        }
        assert_eq!(poller.step(), PollerState::Deactivation);
        assert_eq!(poller.step(), PollerState::Init);
        assert_eq!(poller.devices().active_index(), None);
        assert_eq!(poller.driver().field_off_count, 1);
    }

    #[test]
    fn in_progress_keeps_checking() {
        let mut driver = MockDriver::new();
        driver.add_device(crate::device::ListenInfo::NfcV {
            uid: VicinityUid::from_bytes([1; 8]),
        });
        driver.push_status(ScriptedStatus::InProgress);
        driver.push_status(ScriptedStatus::InProgress);
        driver.push_status(ScriptedStatus::Done(vec![0x00]));

        let mut poller = Poller::with_config(driver, quick_config());
        while poller.state() != PollerState::ExchangeCheck {
            poller.step();
        }
        assert_eq!(poller.step(), PollerState::ExchangeCheck);
        assert_eq!(poller.step(), PollerState::ExchangeCheck);
        assert_eq!(poller.step(), PollerState::ExchangeStart);
    }

    #[test]
    fn worker_runs_every_step() {
        let mut poller = Poller::with_config(MockDriver::new(), quick_config());
        poller.step();
        poller.step();
        assert_eq!(poller.driver().worker_calls, 2);
    }
}
