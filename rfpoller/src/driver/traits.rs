// rfpoller/src/driver/traits.rs

use bitflags::bitflags;

use crate::constants::{NFCDEP_FRAME_SIZE_MAX, P2P_GENERAL_BYTES};
use crate::device::{IsoDepParams, ListenInfo, NfcDepParams};
use crate::types::{Bitrate, NfcId1, Technology};
use crate::{Error, Result};

/// Completion state of a two-phase transceive.
///
/// A start entry point only reports "accepted"; the terminal outcome is
/// observed here, so a single return value never has to mean both
/// "in progress" and "failed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransceiveStatus {
    /// Exchange still running; poll again later without re-triggering.
    InProgress,
    /// Exchange complete; the received length in bytes.
    Done(usize),
    /// Terminal failure: device removed, corrupted frame or timeout.
    Failed(Error),
}

bitflags! {
    /// NFC-DEP operation flags carried in the attribute request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NfcDepOperFlags: u8 {
        /// Chained-frame (MI) support
        const CHAINING = 0x01;
        /// Treat an empty frame as a ping
        const EMPTY_FRAME_PING = 0x02;
        /// Attention frames
        const ATTENTION = 0x04;
        /// Timeout-extension (RTOX) requests
        const RTOX = 0x08;
    }
}

/// Parameters for the NFC-DEP attribute-request handshake.
///
/// The poller always uses the fixed profile from [`AtrParam::new`]: no high
/// bit rates, no device identifier, largest accepted frame size, chaining
/// and attention and timeout extensions enabled, empty-frame ping disabled.
#[derive(Debug, Clone)]
pub struct AtrParam<'a> {
    /// Initiator identifier: the peer's NFCID2 for type F, else the fixed
    /// NFCID3 default.
    pub nfcid: &'a [u8],
    /// Whether high bit rates are offered.
    pub high_bitrate: bool,
    /// Device identifier, unused by this poller.
    pub did: Option<u8>,
    /// Node address, unused by this poller.
    pub nad: Option<u8>,
    /// Largest frame size we accept.
    pub frame_size: u16,
    /// General bytes (LLCP connect blob).
    pub general_bytes: &'a [u8],
    /// Operation flags.
    pub oper: NfcDepOperFlags,
}

impl<'a> AtrParam<'a> {
    /// The fixed handshake profile used by the poller.
    pub fn new(nfcid: &'a [u8]) -> Self {
        Self {
            nfcid,
            high_bitrate: false,
            did: None,
            nad: None,
            frame_size: NFCDEP_FRAME_SIZE_MAX,
            general_bytes: &P2P_GENERAL_BYTES,
            oper: NfcDepOperFlags::CHAINING | NfcDepOperFlags::ATTENTION | NfcDepOperFlags::RTOX,
        }
    }
}

/// ISR step of the radio chip, invoked by the interrupt transport on each
/// edge. Implementations must only touch state protected by the shared
/// status guard.
pub trait InterruptHandler: Send + Sync {
    /// Service one interrupt edge.
    fn service_interrupt(&self);
}

/// Opaque radio-chip capability the poller orchestrates.
///
/// Covers per-technology discovery, activation primitives, the two-phase
/// transceive entry points (one start per interface) and release sequences.
/// The bit-level register protocol behind these calls is out of scope.
pub trait RadioDriver {
    /// One pass of the chip's internal processing; run every loop
    /// iteration. Touches the shared interrupt status under its guard.
    fn worker(&mut self);

    /// Configure the driver for one technology's poller mode.
    fn initialize(&mut self, tech: Technology) -> Result<()>;

    /// Turn the field on, or restart the guard timer if it already is.
    fn field_on_and_start_gt(&mut self) -> Result<()>;

    /// Bounded presence poll. `Ok(())` means a device of this technology
    /// answered; any error is treated as absence by the caller.
    fn detect_presence(&mut self, tech: Technology) -> Result<()>;

    /// Bounded anticollision yielding at most `capacity` listen records.
    fn resolve_collisions(&mut self, tech: Technology, capacity: usize)
        -> Result<Vec<ListenInfo>>;

    /// NFC-A wake-all (WUPA) before re-selecting a sleeping device.
    fn wake_all(&mut self) -> Result<()>;

    /// NFC-A targeted select by NFCID1.
    fn select(&mut self, nfcid1: &NfcId1) -> Result<()>;

    /// NFC-B wake (ALLB_REQ). Callers tolerate failure: the NFCID0 is
    /// already known and a direct select can still succeed.
    fn wake_b(&mut self) -> Result<()>;

    /// ISO-DEP activation of the selected NFC-A device (RATS, then PPS if
    /// supported).
    fn isodep_activate_a(&mut self, bitrate: Bitrate) -> Result<IsoDepParams>;

    /// ISO-DEP activation of an NFC-B device (ATTRIB).
    fn isodep_activate_b(&mut self, device: &ListenInfo, bitrate: Bitrate)
        -> Result<IsoDepParams>;

    /// NFC-DEP activation (ATR, then PSL if supported). Fails as a unit if
    /// the attribute exchange fails.
    fn nfcdep_activate(&mut self, param: &AtrParam<'_>, bitrate: Bitrate)
        -> Result<NfcDepParams>;

    /// Trigger a raw-frame exchange. Returns as soon as the operation is
    /// accepted; completion is observed via [`RadioDriver::raw_transceive_status`].
    fn start_raw_transceive(&mut self, tx: &[u8], fwt_ms: u32) -> Result<()>;

    /// Trigger an ISO-DEP framed exchange.
    fn start_isodep_transceive(&mut self, tx: &[u8], params: &IsoDepParams) -> Result<()>;

    /// Trigger an NFC-DEP framed exchange.
    fn start_nfcdep_transceive(&mut self, tx: &[u8], params: &NfcDepParams) -> Result<()>;

    /// Poll a raw-frame exchange; received bytes are copied into `rx` on
    /// completion.
    fn raw_transceive_status(&mut self, rx: &mut [u8]) -> TransceiveStatus;

    /// Poll an ISO-DEP exchange.
    fn isodep_transceive_status(&mut self, rx: &mut [u8]) -> TransceiveStatus;

    /// Poll an NFC-DEP exchange.
    fn nfcdep_transceive_status(&mut self, rx: &mut [u8]) -> TransceiveStatus;

    /// ISO-DEP deselect.
    fn isodep_deselect(&mut self) -> Result<()>;

    /// NFC-DEP release.
    fn nfcdep_release(&mut self) -> Result<()>;

    /// Turn the field off, powering down any device nearby.
    fn field_off(&mut self) -> Result<()>;
}
