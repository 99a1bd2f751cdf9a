// rfpoller/src/poller/detect.rs
//! Technology detection: one bounded presence poll per technology, in the
//! fixed A, B, F, V order.

use log::debug;

use crate::driver::RadioDriver;
use crate::types::{Technology, TechnologyMask};

use super::Poller;

impl<D: RadioDriver> Poller<D> {
    /// Poll every technology once and record which answered. A failing
    /// init or field-on skips that technology for this cycle; a failing
    /// presence poll just means absence. Detection itself never errors.
    pub fn detect(&mut self) -> TechnologyMask {
        let mut found = TechnologyMask::empty();
        for tech in Technology::SCAN_ORDER {
            if let Err(e) = self.driver.initialize(tech) {
                debug!("{tech}: poller init failed: {e}");
                continue;
            }
            if let Err(e) = self.driver.field_on_and_start_gt() {
                debug!("{tech}: field on failed: {e}");
                continue;
            }
            match self.driver.detect_presence(tech) {
                Ok(()) => found |= tech.flag(),
                Err(e) => debug!("{tech}: no device ({e})"),
            }
        }
        self.techs_found = found;
        found
    }
}
