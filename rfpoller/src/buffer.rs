// rfpoller/src/buffer.rs
//! Shared transmit/receive scratch buffers with an explicit framing tag.
//!
//! One fixed-capacity byte region per direction, reinterpreted per active
//! interface. Every accessor checks the tag, so a raw-frame reader can
//! never observe bytes staged for ISO-DEP and vice versa. Only one
//! transceive may be outstanding at a time; the in-flight flag lives here
//! and staging while it is set is rejected.

use crate::constants::RF_BUF_LEN;
use crate::types::RfInterface;
use crate::{Error, Result};

/// Transmit and receive scratch regions plus the framing currently valid
/// for them.
pub struct TransceiveBuffers {
    tx: [u8; RF_BUF_LEN],
    rx: [u8; RF_BUF_LEN],
    tx_len: usize,
    framing: Option<RfInterface>,
    in_flight: bool,
}

impl Default for TransceiveBuffers {
    fn default() -> Self {
        Self::new()
    }
}

impl TransceiveBuffers {
    /// Fresh buffers with no valid framing.
    pub fn new() -> Self {
        Self {
            tx: [0; RF_BUF_LEN],
            rx: [0; RF_BUF_LEN],
            tx_len: 0,
            framing: None,
            in_flight: false,
        }
    }

    /// Stage an outgoing frame under the given framing, making that framing
    /// the only valid interpretation of both regions.
    pub fn stage(&mut self, framing: RfInterface, frame: &[u8]) -> Result<()> {
        if self.in_flight {
            return Err(Error::WrongState("transceive already in flight"));
        }
        if frame.len() > RF_BUF_LEN {
            return Err(Error::FrameLength {
                max: RF_BUF_LEN,
                actual: frame.len(),
            });
        }
        self.tx[..frame.len()].copy_from_slice(frame);
        self.tx_len = frame.len();
        self.framing = Some(framing);
        Ok(())
    }

    /// The staged outgoing frame, checked against the expected framing.
    pub fn tx_frame(&self, framing: RfInterface) -> Result<&[u8]> {
        self.check_framing(framing)?;
        Ok(&self.tx[..self.tx_len])
    }

    /// Exclusive access to the receive region for the matching framing.
    pub fn rx_region_mut(&mut self, framing: RfInterface) -> Result<&mut [u8]> {
        self.check_framing(framing)?;
        Ok(&mut self.rx)
    }

    /// The first `len` received bytes, checked against the expected framing.
    pub fn received(&self, framing: RfInterface, len: usize) -> Result<&[u8]> {
        self.check_framing(framing)?;
        if len > RF_BUF_LEN {
            return Err(Error::FrameLength {
                max: RF_BUF_LEN,
                actual: len,
            });
        }
        Ok(&self.rx[..len])
    }

    /// The framing the buffers currently hold, if any.
    pub fn framing(&self) -> Option<RfInterface> {
        self.framing
    }

    /// True while a started transceive has not reached a terminal status.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Mark the staged frame as handed to the driver.
    pub fn mark_in_flight(&mut self) -> Result<()> {
        if self.in_flight {
            return Err(Error::WrongState("transceive already in flight"));
        }
        if self.framing.is_none() {
            return Err(Error::WrongState("no frame staged"));
        }
        self.in_flight = true;
        Ok(())
    }

    /// Terminal status observed; a new frame may be staged.
    pub fn clear_in_flight(&mut self) {
        self.in_flight = false;
    }

    /// Drop framing and in-flight state, e.g. on deactivation.
    pub fn reset(&mut self) {
        self.framing = None;
        self.in_flight = false;
        self.tx_len = 0;
    }

    fn check_framing(&self, framing: RfInterface) -> Result<()> {
        match self.framing {
            Some(f) if f == framing => Ok(()),
            _ => Err(Error::WrongState("buffer framing mismatch")),
        }
    }
}
