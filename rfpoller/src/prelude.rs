// rfpoller/src/prelude.rs

pub use crate::buffer::TransceiveBuffers;
pub use crate::device::{
    DeviceList, DeviceRecord, InterfaceParams, IsoDepParams, ListenInfo, NfcDepParams,
};
pub use crate::driver::{AtrParam, InterruptHandler, RadioDriver, TransceiveStatus};
pub use crate::platform::{InterruptStatus, InterruptTransport, Timer};
pub use crate::poller::{Poller, PollerConfig, PollerState};
pub use crate::{
    Bitrate, Error, NfcId0, NfcId1, NfcId2, NfcaType, Result, RfInterface, Technology,
    TechnologyMask, VicinityUid,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced};
