// rfpoller/src/device.rs
//! Discovered-device records and the capacity-bounded device list.

use crate::constants::MAX_DEVICES;
use crate::types::{NfcId0, NfcId1, NfcId2, NfcaType, RfInterface, Technology, VicinityUid};
use crate::{Error, Result};

/// Technology-specific listen-device fields captured by collision
/// resolution. The identity inside is immutable once the record is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenInfo {
    /// NFC-A listen device
    NfcA {
        /// Device NFCID1
        nfcid1: NfcId1,
        /// Declared sub-type
        ty: NfcaType,
        /// Device fell back to a low-power state during anticollision
        is_sleep: bool,
    },
    /// NFC-B listen device
    NfcB {
        /// Device NFCID0
        nfcid0: NfcId0,
        /// Device fell back to a low-power state during anticollision
        is_sleep: bool,
        /// Raw SENSB response, needed for ISO-DEP activation
        sensb: [u8; 12],
    },
    /// NFC-F listen device
    NfcF {
        /// Device NFCID2
        nfcid2: NfcId2,
        /// Device advertises peer-to-peer capability
        supports_nfc_dep: bool,
    },
    /// NFC-V listen device
    NfcV {
        /// Device UID
        uid: VicinityUid,
    },
}

impl ListenInfo {
    /// The technology this record belongs to.
    pub fn technology(&self) -> Technology {
        match self {
            ListenInfo::NfcA { .. } => Technology::A,
            ListenInfo::NfcB { .. } => Technology::B,
            ListenInfo::NfcF { .. } => Technology::F,
            ListenInfo::NfcV { .. } => Technology::V,
        }
    }

    /// Device identity bytes, for logging.
    pub fn id_hex(&self) -> String {
        match self {
            ListenInfo::NfcA { nfcid1, .. } => nfcid1.to_hex(),
            ListenInfo::NfcB { nfcid0, .. } => nfcid0.to_hex(),
            ListenInfo::NfcF { nfcid2, .. } => nfcid2.to_hex(),
            ListenInfo::NfcV { uid } => uid.to_hex(),
        }
    }
}

/// Session parameters negotiated by an ISO-DEP activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsoDepParams {
    /// Negotiated frame size (FSx)
    pub fsx: u16,
    /// Frame waiting time, in 1/fc units
    pub fwt: u32,
    /// Delta frame waiting time
    pub dfwt: u32,
    /// Device identifier, when the device requested one
    pub did: Option<u8>,
}

/// Session parameters negotiated by an NFC-DEP activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NfcDepParams {
    /// Negotiated frame size
    pub frame_size: u16,
    /// Frame waiting time, in 1/fc units
    pub fwt: u32,
    /// Delta frame waiting time
    pub dfwt: u32,
}

/// Interface tag plus the session parameters that go with it. Meaningful
/// only after a successful activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceParams {
    /// Raw RF frames, no session parameters
    RawRf,
    /// ISO-DEP session
    IsoDep(IsoDepParams),
    /// NFC-DEP session
    NfcDep(NfcDepParams),
}

impl InterfaceParams {
    /// The interface tag for these parameters.
    pub fn interface(&self) -> RfInterface {
        match self {
            InterfaceParams::RawRf => RfInterface::RawRf,
            InterfaceParams::IsoDep(_) => RfInterface::IsoDep,
            InterfaceParams::NfcDep(_) => RfInterface::NfcDep,
        }
    }
}

/// One discovered device: immutable identity plus the interface populated
/// by activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    info: ListenInfo,
    interface: Option<InterfaceParams>,
}

impl DeviceRecord {
    /// Wrap a listen record; the interface starts unset.
    pub fn new(info: ListenInfo) -> Self {
        Self {
            info,
            interface: None,
        }
    }

    /// The discovery-time listen fields.
    pub fn info(&self) -> &ListenInfo {
        &self.info
    }

    /// The record's technology.
    pub fn technology(&self) -> Technology {
        self.info.technology()
    }

    /// The activated interface tag, if any.
    pub fn interface(&self) -> Option<RfInterface> {
        self.interface.as_ref().map(InterfaceParams::interface)
    }

    /// The activated session parameters, if any.
    pub fn interface_params(&self) -> Option<&InterfaceParams> {
        self.interface.as_ref()
    }

    /// Record the outcome of a successful activation.
    pub(crate) fn set_interface(&mut self, params: InterfaceParams) {
        self.interface = Some(params);
    }
}

/// Ordered, capacity-bounded list of discovered devices.
///
/// Insertion order is discovery order across technologies. The active
/// device is a plain index so clearing the list can never dangle it; it is
/// invalidated explicitly on deactivation.
#[derive(Debug, Default)]
pub struct DeviceList {
    records: Vec<DeviceRecord>,
    active: Option<usize>,
}

impl DeviceList {
    /// Empty list.
    pub fn new() -> Self {
        Self {
            records: Vec::with_capacity(MAX_DEVICES),
            active: None,
        }
    }

    /// Number of devices currently tracked.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no device is tracked.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Slots still available this cycle. Conservative bound: append only
    /// while strictly below capacity.
    pub fn remaining_capacity(&self) -> usize {
        MAX_DEVICES.saturating_sub(self.records.len())
    }

    /// Append one record; fails when the list is full.
    pub fn push(&mut self, record: DeviceRecord) -> Result<()> {
        if self.records.len() < MAX_DEVICES {
            self.records.push(record);
            Ok(())
        } else {
            Err(Error::Request("device list full"))
        }
    }

    /// Shared access by index.
    pub fn get(&self, index: usize) -> Option<&DeviceRecord> {
        self.records.get(index)
    }

    /// Exclusive access by index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut DeviceRecord> {
        self.records.get_mut(index)
    }

    /// Iterate over the records in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceRecord> {
        self.records.iter()
    }

    /// Index of the currently activated device, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// The currently activated record, if any.
    pub fn active(&self) -> Option<&DeviceRecord> {
        self.active.and_then(|i| self.records.get(i))
    }

    /// Mark a device active. The index must refer to an existing record.
    pub(crate) fn set_active(&mut self, index: usize) -> Result<()> {
        if index < self.records.len() {
            self.active = Some(index);
            Ok(())
        } else {
            Err(Error::Request("active index out of range"))
        }
    }

    /// Invalidate the active-device reference.
    pub(crate) fn clear_active(&mut self) {
        self.active = None;
    }

    /// Drop all records and the active reference; start of a new cycle.
    pub fn clear(&mut self) {
        self.records.clear();
        self.active = None;
    }
}
