// rfpoller/src/driver/mock.rs

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::device::{IsoDepParams, ListenInfo, NfcDepParams};
use crate::driver::traits::{AtrParam, InterruptHandler, RadioDriver, TransceiveStatus};
use crate::platform::status::InterruptStatus;
use crate::types::{Bitrate, NfcId1, RfInterface, Technology, TechnologyMask};
use crate::{Error, Result};

/// One scripted outcome of a transceive-status poll.
#[derive(Debug, Clone)]
pub enum ScriptedStatus {
    /// Exchange still running.
    InProgress,
    /// Exchange complete with the given received payload.
    Done(Vec<u8>),
    /// Terminal failure.
    Failed(Error),
}

/// Scripted radio driver for unit tests. It records every call the poller
/// makes and returns pre-seeded discovery, activation and transceive
/// outcomes.
#[derive(Debug, Default)]
pub struct MockDriver {
    /// Technologies whose presence poll should succeed.
    pub present: TechnologyMask,
    /// Technologies whose presence poll should fail with a protocol error
    /// instead of plain absence.
    pub detect_errors: TechnologyMask,
    /// Technologies whose anticollision should fail.
    pub resolve_errors: TechnologyMask,
    /// Listen records handed out by anticollision, all technologies mixed.
    pub devices: Vec<ListenInfo>,

    /// Fail the next wake-all (WUPA).
    pub fail_wake_all: bool,
    /// Fail the next targeted select.
    pub fail_select: bool,
    /// Fail the next NFC-B wake.
    pub fail_wake_b: bool,
    /// Fail ISO-DEP activation.
    pub fail_isodep: bool,
    /// Fail NFC-DEP activation.
    pub fail_nfcdep: bool,
    /// Reject transceive starts.
    pub fail_start: bool,
    /// Fail the ISO-DEP deselect during deactivation.
    pub fail_deselect: bool,
    /// Fail the NFC-DEP release during deactivation.
    pub fail_release: bool,

    /// Scripted outcomes for status polls, consumed front to back. An
    /// exhausted script reports a timeout.
    pub status_script: VecDeque<ScriptedStatus>,

    /// Technologies initialized, in call order.
    pub initialized: Vec<Technology>,
    /// Number of field-on/guard-timer calls.
    pub field_on_count: usize,
    /// Number of field-off calls.
    pub field_off_count: usize,
    /// Number of wake-all calls.
    pub wake_all_calls: usize,
    /// Identifiers passed to targeted selects.
    pub selected: Vec<NfcId1>,
    /// Number of NFC-B wake calls.
    pub wake_b_calls: usize,
    /// Number of ISO-DEP activations attempted.
    pub isodep_activations: usize,
    /// Identifiers passed to NFC-DEP attribute requests.
    pub nfcdep_nfcids: Vec<Vec<u8>>,
    /// Capacity argument of each anticollision call.
    pub resolve_capacity_args: Vec<(Technology, usize)>,
    /// Started transceives with the captured outgoing frame.
    pub started: Vec<(RfInterface, Vec<u8>)>,
    /// Number of ISO-DEP deselects issued.
    pub deselects: usize,
    /// Number of NFC-DEP releases issued.
    pub releases: usize,
    /// Number of worker passes.
    pub worker_calls: usize,
    /// Interrupt bits the worker has drained from the shared status word.
    pub drained_irq_bits: u32,

    status: Option<Arc<InterruptStatus>>,
}

impl MockDriver {
    /// Session parameters every successful ISO-DEP activation returns.
    pub const ISODEP_PARAMS: IsoDepParams = IsoDepParams {
        fsx: 256,
        fwt: 77_328,
        dfwt: 0,
        did: None,
    };

    /// Session parameters every successful NFC-DEP activation returns.
    pub const NFCDEP_PARAMS: NfcDepParams = NfcDepParams {
        frame_size: 254,
        fwt: 77_328,
        dfwt: 0,
    };

    /// Driver with nothing in the field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a shared interrupt status word; the worker drains it under
    /// the guard on every pass.
    pub fn with_status(mut self, status: Arc<InterruptStatus>) -> Self {
        self.status = Some(status);
        self
    }

    /// Script one device: marks its technology present and queues it for
    /// anticollision.
    pub fn add_device(&mut self, info: ListenInfo) {
        self.present |= info.technology().flag();
        self.devices.push(info);
    }

    /// Queue a transceive-status outcome.
    pub fn push_status(&mut self, status: ScriptedStatus) {
        self.status_script.push_back(status);
    }

    fn next_status(&mut self, rx: &mut [u8]) -> TransceiveStatus {
        match self.status_script.pop_front() {
            Some(ScriptedStatus::InProgress) => TransceiveStatus::InProgress,
            Some(ScriptedStatus::Done(payload)) => {
                let n = payload.len().min(rx.len());
                rx[..n].copy_from_slice(&payload[..n]);
                TransceiveStatus::Done(n)
            }
            Some(ScriptedStatus::Failed(err)) => TransceiveStatus::Failed(err),
            None => TransceiveStatus::Failed(Error::Timeout),
        }
    }
}

impl RadioDriver for MockDriver {
    fn worker(&mut self) {
        self.worker_calls += 1;
        if let Some(status) = &self.status {
            self.drained_irq_bits |= status.fetch_and_clear();
        }
    }

    fn initialize(&mut self, tech: Technology) -> Result<()> {
        self.initialized.push(tech);
        Ok(())
    }

    fn field_on_and_start_gt(&mut self) -> Result<()> {
        self.field_on_count += 1;
        Ok(())
    }

    fn detect_presence(&mut self, tech: Technology) -> Result<()> {
        if self.detect_errors.contains(tech.flag()) {
            Err(Error::Protocol("corrupted presence response"))
        } else if self.present.contains(tech.flag()) {
            Ok(())
        } else {
            Err(Error::NotFound)
        }
    }

    fn resolve_collisions(
        &mut self,
        tech: Technology,
        capacity: usize,
    ) -> Result<Vec<ListenInfo>> {
        self.resolve_capacity_args.push((tech, capacity));
        if self.resolve_errors.contains(tech.flag()) {
            return Err(Error::Collision);
        }
        Ok(self
            .devices
            .iter()
            .filter(|d| d.technology() == tech)
            .take(capacity)
            .cloned()
            .collect())
    }

    fn wake_all(&mut self) -> Result<()> {
        self.wake_all_calls += 1;
        if self.fail_wake_all {
            Err(Error::Timeout)
        } else {
            Ok(())
        }
    }

    fn select(&mut self, nfcid1: &NfcId1) -> Result<()> {
        self.selected.push(*nfcid1);
        if self.fail_select {
            Err(Error::Timeout)
        } else {
            Ok(())
        }
    }

    fn wake_b(&mut self) -> Result<()> {
        self.wake_b_calls += 1;
        if self.fail_wake_b {
            Err(Error::Timeout)
        } else {
            Ok(())
        }
    }

    fn isodep_activate_a(&mut self, _bitrate: Bitrate) -> Result<IsoDepParams> {
        self.isodep_activations += 1;
        if self.fail_isodep {
            Err(Error::Protocol("RATS failed"))
        } else {
            Ok(Self::ISODEP_PARAMS)
        }
    }

    fn isodep_activate_b(
        &mut self,
        _device: &ListenInfo,
        _bitrate: Bitrate,
    ) -> Result<IsoDepParams> {
        self.isodep_activations += 1;
        if self.fail_isodep {
            Err(Error::Protocol("ATTRIB failed"))
        } else {
            Ok(Self::ISODEP_PARAMS)
        }
    }

    fn nfcdep_activate(
        &mut self,
        param: &AtrParam<'_>,
        _bitrate: Bitrate,
    ) -> Result<NfcDepParams> {
        self.nfcdep_nfcids.push(param.nfcid.to_vec());
        if self.fail_nfcdep {
            Err(Error::Protocol("ATR_REQ failed"))
        } else {
            Ok(Self::NFCDEP_PARAMS)
        }
    }

    fn start_raw_transceive(&mut self, tx: &[u8], _fwt_ms: u32) -> Result<()> {
        if self.fail_start {
            return Err(Error::Io("transceive start rejected".to_string()));
        }
        self.started.push((RfInterface::RawRf, tx.to_vec()));
        Ok(())
    }

    fn start_isodep_transceive(&mut self, tx: &[u8], _params: &IsoDepParams) -> Result<()> {
        if self.fail_start {
            return Err(Error::Io("transceive start rejected".to_string()));
        }
        self.started.push((RfInterface::IsoDep, tx.to_vec()));
        Ok(())
    }

    fn start_nfcdep_transceive(&mut self, tx: &[u8], _params: &NfcDepParams) -> Result<()> {
        if self.fail_start {
            return Err(Error::Io("transceive start rejected".to_string()));
        }
        self.started.push((RfInterface::NfcDep, tx.to_vec()));
        Ok(())
    }

    fn raw_transceive_status(&mut self, rx: &mut [u8]) -> TransceiveStatus {
        self.next_status(rx)
    }

    fn isodep_transceive_status(&mut self, rx: &mut [u8]) -> TransceiveStatus {
        self.next_status(rx)
    }

    fn nfcdep_transceive_status(&mut self, rx: &mut [u8]) -> TransceiveStatus {
        self.next_status(rx)
    }

    fn isodep_deselect(&mut self) -> Result<()> {
        self.deselects += 1;
        if self.fail_deselect {
            Err(Error::Timeout)
        } else {
            Ok(())
        }
    }

    fn nfcdep_release(&mut self) -> Result<()> {
        self.releases += 1;
        if self.fail_release {
            Err(Error::Timeout)
        } else {
            Ok(())
        }
    }

    fn field_off(&mut self) -> Result<()> {
        self.field_off_count += 1;
        Ok(())
    }
}

/// Interrupt-service half of the mock chip: each edge sets a bit in the
/// shared status word, exactly what the worker later drains.
#[derive(Debug)]
pub struct MockInterruptService {
    status: Arc<InterruptStatus>,
    serviced: AtomicUsize,
}

impl MockInterruptService {
    /// Service routine writing into the given shared status word.
    pub fn new(status: Arc<InterruptStatus>) -> Self {
        Self {
            status,
            serviced: AtomicUsize::new(0),
        }
    }

    /// Number of edges serviced so far.
    pub fn serviced(&self) -> usize {
        self.serviced.load(Ordering::SeqCst)
    }
}

impl InterruptHandler for MockInterruptService {
    fn service_interrupt(&self) {
        self.status.or(0x01);
        self.serviced.fetch_add(1, Ordering::SeqCst);
    }
}
