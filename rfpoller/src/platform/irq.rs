// rfpoller/src/platform/irq.rs
//! The interrupt transport: a dedicated thread that blocks on the
//! interrupt line and forwards each edge to the radio driver's
//! interrupt-service step.
//!
//! The only state shared with the orchestration loop is the guarded
//! interrupt-status word the handler writes into; nothing else crosses the
//! thread boundary.

use std::sync::Arc;
use std::thread;

use log::warn;

use crate::driver::InterruptHandler;
use crate::platform::gpio::InterruptLine;
use crate::{Error, Result};

/// Handle to the running interrupt-service thread.
#[derive(Debug)]
pub struct InterruptTransport {
    handle: thread::JoinHandle<()>,
}

impl InterruptTransport {
    /// Spawn the service thread: block on `line`, invoke `handler` on each
    /// edge, forever. On hardware builds the thread is elevated to the
    /// highest SCHED_FIFO priority; failing to elevate is a startup error.
    pub fn spawn<L>(mut line: L, handler: Arc<dyn InterruptHandler>) -> Result<Self>
    where
        L: InterruptLine + 'static,
    {
        let handle = thread::Builder::new()
            .name("rf-irq".to_string())
            .spawn(move || loop {
                match line.wait_for_edge() {
                    Ok(()) => handler.service_interrupt(),
                    Err(e) => {
                        warn!("interrupt line failed, stopping service thread: {e}");
                        break;
                    }
                }
            })
            .map_err(|e| Error::Io(format!("interrupt thread spawn: {e}")))?;

        #[cfg(feature = "hw")]
        set_realtime(&handle)?;

        Ok(Self { handle })
    }

    /// True while the service thread is alive.
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Wait for the service thread to exit. It only exits when the
    /// interrupt line fails, so this is mainly useful in tests.
    pub fn join(self) -> Result<()> {
        self.handle
            .join()
            .map_err(|_| Error::Io("interrupt thread panicked".to_string()))
    }
}

#[cfg(feature = "hw")]
fn set_realtime(handle: &thread::JoinHandle<()>) -> Result<()> {
    use std::os::unix::thread::JoinHandleExt;

    let max = unsafe { libc::sched_get_priority_max(libc::SCHED_FIFO) };
    if max < 0 {
        return Err(Error::Io("query SCHED_FIFO priority range".to_string()));
    }
    let param = libc::sched_param {
        sched_priority: max,
    };
    let rc = unsafe {
        libc::pthread_setschedparam(
            handle.as_pthread_t() as libc::pthread_t,
            libc::SCHED_FIFO,
            &param,
        )
    };
    if rc != 0 {
        return Err(Error::Io(format!(
            "set SCHED_FIFO priority on interrupt thread: errno {rc}"
        )));
    }
    Ok(())
}
