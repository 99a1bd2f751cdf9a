// fixtures.rs — listen records and identity bytes shared across tests

use rfpoller::device::ListenInfo;
use rfpoller::types::{NfcId0, NfcId1, NfcId2, NfcaType, VicinityUid};

pub fn sample_nfcid1_bytes() -> [u8; 4] {
    [0x01, 0x02, 0x03, 0x04]
}

pub fn sample_vicinity_uid_bytes() -> [u8; 8] {
    [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x11, 0x22]
}

pub fn sample_nfcid2_bytes() -> [u8; 8] {
    [0x01, 0xFE, 0xB1, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6]
}

pub fn nfca_device(ty: NfcaType) -> ListenInfo {
    ListenInfo::NfcA {
        nfcid1: NfcId1::from_bytes(&sample_nfcid1_bytes()).unwrap(),
        ty,
        is_sleep: false,
    }
}

pub fn sleeping_nfca_device(ty: NfcaType) -> ListenInfo {
    ListenInfo::NfcA {
        nfcid1: NfcId1::from_bytes(&sample_nfcid1_bytes()).unwrap(),
        ty,
        is_sleep: true,
    }
}

pub fn nfcb_device() -> ListenInfo {
    ListenInfo::NfcB {
        nfcid0: NfcId0::from_bytes([0x50, 0x51, 0x52, 0x53]),
        is_sleep: false,
        sensb: [0; 12],
    }
}

pub fn nfcf_device(supports_nfc_dep: bool) -> ListenInfo {
    ListenInfo::NfcF {
        nfcid2: NfcId2::from_bytes(sample_nfcid2_bytes()),
        supports_nfc_dep,
    }
}

pub fn nfcv_device() -> ListenInfo {
    ListenInfo::NfcV {
        uid: VicinityUid::from_bytes(sample_vicinity_uid_bytes()),
    }
}

pub fn nfcv_device_with(first: u8) -> ListenInfo {
    let mut uid = sample_vicinity_uid_bytes();
    uid[0] = first;
    ListenInfo::NfcV {
        uid: VicinityUid::from_bytes(uid),
    }
}
