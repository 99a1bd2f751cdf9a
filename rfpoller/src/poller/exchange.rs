// rfpoller/src/poller/exchange.rs
//! Presence-check exchange: build the command the active device's type
//! answers, trigger it through the matching start entry point and poll the
//! matching status entry point until a terminal outcome.

use crate::constants::{
    LLCP_SYMM, NFCB_PRESENCE_REQ, T1T_READ_REQ, T1T_READ_UID_OFFSET, T2T_READ_REQ,
    T3T_CHECK_NFCID2_OFFSET, T3T_CHECK_REQ, T4T_SELECT_REQ, T5T_SYSINFO_REQ,
};
use crate::device::{InterfaceParams, ListenInfo};
use crate::driver::{RadioDriver, TransceiveStatus};
use crate::types::{NfcaType, RfInterface};
use crate::{Error, Result};

use super::Poller;

impl<D: RadioDriver> Poller<D> {
    /// Stage and trigger one presence-check exchange on the active device.
    /// Rejects a second start while one is outstanding.
    pub fn exchange_start(&mut self) -> Result<()> {
        if self.buffers.is_in_flight() {
            return Err(Error::WrongState("transceive already in flight"));
        }
        let index = self
            .devices
            .active_index()
            .ok_or(Error::WrongState("no active device"))?;
        let record = self
            .devices
            .get(index)
            .ok_or(Error::Request("active index out of range"))?;
        let params = *record
            .interface_params()
            .ok_or(Error::WrongState("active device has no interface"))?;
        let info = record.info().clone();

        match params {
            InterfaceParams::RawRf => {
                let frame = raw_presence_frame(&info)?;
                self.buffers.stage(RfInterface::RawRf, &frame)?;
                let fwt = self.config.raw_fwt_ms;
                let tx = self.buffers.tx_frame(RfInterface::RawRf)?;
                self.driver.start_raw_transceive(tx, fwt)?;
            }
            InterfaceParams::IsoDep(p) => {
                self.buffers.stage(RfInterface::IsoDep, &T4T_SELECT_REQ)?;
                let tx = self.buffers.tx_frame(RfInterface::IsoDep)?;
                self.driver.start_isodep_transceive(tx, &p)?;
            }
            InterfaceParams::NfcDep(p) => {
                self.buffers.stage(RfInterface::NfcDep, &LLCP_SYMM)?;
                let tx = self.buffers.tx_frame(RfInterface::NfcDep)?;
                self.driver.start_nfcdep_transceive(tx, &p)?;
            }
        }

        self.buffers.mark_in_flight()?;
        Ok(())
    }

    /// Poll the outstanding exchange through the active interface's status
    /// entry point. Terminal outcomes clear the in-flight flag; `Done`
    /// additionally records the received length.
    pub fn exchange_check(&mut self) -> TransceiveStatus {
        let interface = match self.devices.active().and_then(|r| r.interface()) {
            Some(i) => i,
            None => return TransceiveStatus::Failed(Error::WrongState("no active device")),
        };
        if !self.buffers.is_in_flight() {
            return TransceiveStatus::Failed(Error::WrongState("no transceive in flight"));
        }
        let rx = match self.buffers.rx_region_mut(interface) {
            Ok(rx) => rx,
            Err(e) => return TransceiveStatus::Failed(e),
        };

        let status = match interface {
            RfInterface::RawRf => self.driver.raw_transceive_status(rx),
            RfInterface::IsoDep => self.driver.isodep_transceive_status(rx),
            RfInterface::NfcDep => self.driver.nfcdep_transceive_status(rx),
        };

        match &status {
            TransceiveStatus::InProgress => {}
            TransceiveStatus::Done(len) => {
                self.rcv_len = *len;
                self.buffers.clear_in_flight();
            }
            TransceiveStatus::Failed(_) => self.buffers.clear_in_flight(),
        }
        status
    }
}

/// The raw-frame presence-check command for a device using the raw
/// interface. Identity bytes are patched into the templates that echo them.
fn raw_presence_frame(info: &ListenInfo) -> Result<Vec<u8>> {
    match info {
        ListenInfo::NfcA { nfcid1, ty, .. } => match ty {
            NfcaType::T1t => {
                let mut frame = T1T_READ_REQ.to_vec();
                // Cascade level 1: the first four UID bytes are echoed.
                frame[T1T_READ_UID_OFFSET..T1T_READ_UID_OFFSET + 4]
                    .copy_from_slice(&nfcid1.as_bytes()[..4]);
                Ok(frame)
            }
            NfcaType::T2t => Ok(T2T_READ_REQ.to_vec()),
            _ => Err(Error::Request("NFC-A sub-type has no raw presence check")),
        },
        ListenInfo::NfcB { .. } => Ok(NFCB_PRESENCE_REQ.to_vec()),
        ListenInfo::NfcF { nfcid2, .. } => {
            let mut frame = T3T_CHECK_REQ.to_vec();
            frame[T3T_CHECK_NFCID2_OFFSET..T3T_CHECK_NFCID2_OFFSET + 8]
                .copy_from_slice(nfcid2.as_bytes());
            Ok(frame)
        }
        ListenInfo::NfcV { .. } => Ok(T5T_SYSINFO_REQ.to_vec()),
    }
}
