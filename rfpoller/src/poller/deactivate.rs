// rfpoller/src/poller/deactivate.rs
//! Deactivation: release the active device per its interface, then turn
//! the field off unconditionally.

use log::{debug, warn};

use crate::driver::RadioDriver;
use crate::types::RfInterface;

use super::Poller;

impl<D: RadioDriver> Poller<D> {
    /// Release the active device, if any, and power the field down. A
    /// failed release is logged but never blocks the field-off or the
    /// state cleanup; afterwards no device is active and the buffers hold
    /// no framing.
    pub fn deactivate(&mut self) {
        if let Some(record) = self.devices.active() {
            match record.interface() {
                Some(RfInterface::IsoDep) => {
                    if let Err(e) = self.driver.isodep_deselect() {
                        warn!("ISO-DEP deselect failed: {e}");
                    }
                }
                Some(RfInterface::NfcDep) => {
                    if let Err(e) = self.driver.nfcdep_release() {
                        warn!("NFC-DEP release failed: {e}");
                    }
                }
                Some(RfInterface::RawRf) | None => {}
            }
        }
        if let Err(e) = self.driver.field_off() {
            warn!("field off failed: {e}");
        }
        self.devices.clear_active();
        self.buffers.reset();
        debug!("deactivated, field off");
    }
}
