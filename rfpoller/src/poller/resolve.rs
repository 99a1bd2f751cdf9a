// rfpoller/src/poller/resolve.rs
//! Collision resolution: per-technology anticollision appending into the
//! capacity-bounded device list.

use log::{debug, info};

use crate::device::DeviceRecord;
use crate::driver::RadioDriver;
use crate::types::{Technology, TechnologyMask};

use super::Poller;

impl<D: RadioDriver> Poller<D> {
    /// Run anticollision for every technology flagged in `mask`, in scan
    /// order. Each pass is told the remaining list capacity and may add at
    /// most that many devices; once the list is full the remaining
    /// technologies are skipped. A failing pass loses only that
    /// technology's devices. Returns the total device count.
    pub fn resolve(&mut self, mask: TechnologyMask) -> usize {
        for tech in Technology::SCAN_ORDER {
            if !mask.contains(tech.flag()) {
                continue;
            }
            let capacity = self.devices.remaining_capacity();
            if capacity == 0 {
                debug!("device list full, skipping remaining technologies");
                break;
            }
            if let Err(e) = self.driver.initialize(tech) {
                debug!("{tech}: poller init failed: {e}");
                continue;
            }
            if let Err(e) = self.driver.field_on_and_start_gt() {
                debug!("{tech}: field on failed: {e}");
                continue;
            }
            match self.driver.resolve_collisions(tech, capacity) {
                Ok(found) => {
                    for info in found.into_iter().take(capacity) {
                        info!("{} device UID: {}", tech, info.id_hex());
                        if self.devices.push(DeviceRecord::new(info)).is_err() {
                            break;
                        }
                    }
                }
                Err(e) => debug!("{tech}: collision resolution failed ({e})"),
            }
        }
        self.devices.len()
    }
}
