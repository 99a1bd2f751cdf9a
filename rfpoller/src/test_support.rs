//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockDriver setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use crate::device::ListenInfo;
use crate::driver::MockDriver;
use crate::poller::{Poller, PollerConfig, PollerState};
use crate::types::{NfcId1, NfcId2, NfcaType, VicinityUid};

/// Timing knobs with all pauses collapsed so tests step straight through.
#[doc(hidden)]
pub fn instant_config() -> PollerConfig {
    PollerConfig {
        exchange_period_ms: 0,
        raw_fwt_ms: 20,
        field_off_settle_ms: 0,
    }
}

/// Build a MockDriver pre-seeded with the given listen records.
#[doc(hidden)]
pub fn mock_with_devices(devices: Vec<ListenInfo>) -> MockDriver {
    let mut driver = MockDriver::new();
    for info in devices {
        driver.add_device(info);
    }
    driver
}

/// A poller over a pre-seeded MockDriver, pauses collapsed.
#[doc(hidden)]
pub fn poller_with_devices(devices: Vec<ListenInfo>) -> Poller<MockDriver> {
    Poller::with_config(mock_with_devices(devices), instant_config())
}

/// Step a poller until it reaches `target`, up to a bounded number of
/// steps. Panics on exhaustion so a test failure names the state it got
/// stuck in.
#[doc(hidden)]
pub fn step_until(poller: &mut Poller<MockDriver>, target: PollerState) {
    for _ in 0..64 {
        if poller.step() == target {
            return;
        }
    }
    panic!(
        "poller never reached {:?}, stuck in {:?}",
        target,
        poller.state()
    );
}

/// NFC-A listen record with the given sub-type and a fixed 4-byte NFCID1.
#[doc(hidden)]
pub fn nfca_device(ty: NfcaType) -> ListenInfo {
    ListenInfo::NfcA {
        nfcid1: NfcId1::from_bytes(&[0x01, 0x02, 0x03, 0x04]).expect("valid NFCID1"),
        ty,
        is_sleep: false,
    }
}

/// NFC-F listen record with a fixed NFCID2.
#[doc(hidden)]
pub fn nfcf_device(supports_nfc_dep: bool) -> ListenInfo {
    ListenInfo::NfcF {
        nfcid2: NfcId2::from_bytes([0x01, 0xFE, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6]),
        supports_nfc_dep,
    }
}

/// NFC-V listen record with a fixed 8-byte UID.
#[doc(hidden)]
pub fn nfcv_device() -> ListenInfo {
    ListenInfo::NfcV {
        uid: VicinityUid::from_bytes([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x11, 0x22]),
    }
}
