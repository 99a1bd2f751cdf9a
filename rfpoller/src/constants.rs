// rfpoller/src/constants.rs
//! Poller-wide constants: list/buffer sizing, presence-check command
//! templates and the fixed NFC-DEP attribute-request parameters.

/// Maximum number of devices tracked in one discovery cycle.
pub const MAX_DEVICES: usize = 10;

/// Transmit/receive scratch buffer length, sized for the largest RF frame.
pub const RF_BUF_LEN: usize = 255;

/// T1T READ, block 0 byte 0. The device UID is copied at
/// [`T1T_READ_UID_OFFSET`] before transmission.
pub const T1T_READ_REQ: [u8; 7] = [0x01, 0x00, 0x00, 0x11, 0x22, 0x33, 0x44];

/// Byte offset of the UID echo inside [`T1T_READ_REQ`].
pub const T1T_READ_UID_OFFSET: usize = 3;

/// T2T READ, block 0.
pub const T2T_READ_REQ: [u8; 2] = [0x30, 0x00];

/// T3T CHECK/Read. The device NFCID2 is copied at
/// [`T3T_CHECK_NFCID2_OFFSET`] before transmission.
pub const T3T_CHECK_REQ: [u8; 15] = [
    0x06, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x01, 0x09, 0x00, 0x01, 0x80, 0x00,
];

/// Byte offset of the NFCID2 echo inside [`T3T_CHECK_REQ`].
pub const T3T_CHECK_NFCID2_OFFSET: usize = 1;

/// T4T SELECT MF/DF/EF APDU.
pub const T4T_SELECT_REQ: [u8; 5] = [0x00, 0xA4, 0x00, 0x00, 0x00];

/// NFC-V GET SYSTEM INFORMATION.
pub const T5T_SYSINFO_REQ: [u8; 2] = [0x02, 0x2B];

/// NFC-B proprietary presence-check command.
pub const NFCB_PRESENCE_REQ: [u8; 1] = [0x00];

/// LLCP SYMM, the NFC-DEP presence-check payload.
pub const LLCP_SYMM: [u8; 2] = [0x00, 0x00];

/// Fixed NFCID3 used in the ATR_REQ when the peer is not a type F device.
pub const NFCID3: [u8; 10] = [0x01, 0xFE, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A];

/// P2P general bytes carried in the ATR_REQ: an LLCP connect blob.
pub const P2P_GENERAL_BYTES: [u8; 20] = [
    0x46, 0x66, 0x6d, 0x01, 0x01, 0x11, 0x02, 0x02, 0x07, 0x80, 0x03, 0x02, 0x00, 0x03, 0x04,
    0x01, 0x32, 0x07, 0x01, 0x03,
];

/// Largest NFC-DEP frame size we accept (LR = max).
pub const NFCDEP_FRAME_SIZE_MAX: u16 = 254;

/// Waiting time for raw-frame presence-check responses, in milliseconds.
pub const RAW_EXCHANGE_FWT_MS: u32 = 20;

/// Pause between two successful presence-check exchanges, in milliseconds.
pub const EXCHANGE_PERIOD_MS: u32 = 300;

/// Period the field is kept off between cycles, in milliseconds.
pub const FIELD_OFF_SETTLE_MS: u32 = 2;
