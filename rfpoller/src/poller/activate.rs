// rfpoller/src/poller/activate.rs
//! Device activation: re-initialize for the device's technology, run the
//! protocol handshake its sub-type asks for and record the negotiated
//! interface.

use log::{debug, info};

use crate::constants::NFCID3;
use crate::device::{InterfaceParams, ListenInfo};
use crate::driver::{AtrParam, RadioDriver};
use crate::types::{Bitrate, NfcaType, Technology};
use crate::{Error, Result};

use super::Poller;

impl<D: RadioDriver> Poller<D> {
    /// Activate the device at `index`. On success the record carries its
    /// interface parameters and becomes the active device; on failure
    /// nothing is recorded and the caller deactivates.
    pub fn activate(&mut self, index: usize) -> Result<()> {
        let info = self
            .devices
            .get(index)
            .ok_or(Error::Request("device index out of range"))?
            .info()
            .clone();

        let params = match &info {
            ListenInfo::NfcA {
                nfcid1,
                ty,
                is_sleep,
            } => {
                self.driver.initialize(Technology::A)?;
                if *is_sleep {
                    // A sleeping device must answer a fresh wake-all before
                    // it can be selected again; either failing aborts.
                    self.driver.wake_all()?;
                    self.driver.select(nfcid1)?;
                }
                match ty {
                    NfcaType::T1t => {
                        info!("NFC-A T1T device activated");
                        InterfaceParams::RawRf
                    }
                    NfcaType::T2t => {
                        info!("NFC-A T2T device activated");
                        InterfaceParams::RawRf
                    }
                    NfcaType::T4t => {
                        let p = self.driver.isodep_activate_a(Bitrate::Kb424)?;
                        info!("NFC-A T4T (ISO-DEP) device activated");
                        InterfaceParams::IsoDep(p)
                    }
                    NfcaType::NfcDep | NfcaType::T4tNfcDep => {
                        let p = self.nfcdep_handshake(&info)?;
                        info!("NFC-A P2P (NFC-DEP) device activated");
                        InterfaceParams::NfcDep(p)
                    }
                }
            }

            ListenInfo::NfcB { is_sleep, .. } => {
                self.driver.initialize(Technology::B)?;
                if *is_sleep {
                    // The NFCID0 is already known, so a direct ATTRIB can
                    // still succeed after a failed wake.
                    if let Err(e) = self.driver.wake_b() {
                        debug!("NFC-B wake failed: {e}");
                    }
                }
                match self.driver.isodep_activate_b(&info, Bitrate::Kb424) {
                    Ok(p) => {
                        info!("NFC-B T4T (ISO-DEP) device activated");
                        InterfaceParams::IsoDep(p)
                    }
                    Err(e) => {
                        debug!("NFC-B ISO-DEP activation failed: {e}");
                        info!("NFC-B device activated");
                        InterfaceParams::RawRf
                    }
                }
            }

            ListenInfo::NfcF {
                supports_nfc_dep, ..
            } => {
                self.driver.initialize(Technology::F)?;
                if *supports_nfc_dep {
                    let p = self.nfcdep_handshake(&info)?;
                    info!("NFC-F P2P (NFC-DEP) device activated");
                    InterfaceParams::NfcDep(p)
                } else {
                    info!("NFC-F T3T device activated");
                    InterfaceParams::RawRf
                }
            }

            ListenInfo::NfcV { .. } => {
                self.driver.initialize(Technology::V)?;
                info!("NFC-V T5T device activated");
                InterfaceParams::RawRf
            }
        };

        let record = self
            .devices
            .get_mut(index)
            .ok_or(Error::Request("device index out of range"))?;
        record.set_interface(params);
        self.devices.set_active(index)?;
        Ok(())
    }

    /// ATR handshake with the fixed profile. A type F peer is addressed by
    /// its own NFCID2; everyone else gets the default NFCID3.
    fn nfcdep_handshake(&mut self, info: &ListenInfo) -> Result<crate::device::NfcDepParams> {
        let nfcid: &[u8] = match info {
            ListenInfo::NfcF { nfcid2, .. } => nfcid2.as_bytes(),
            _ => &NFCID3,
        };
        let param = AtrParam::new(nfcid);
        self.driver.nfcdep_activate(&param, Bitrate::Kb424)
    }
}
