// rfpoller/src/platform/status.rs
//! The shared interrupt-status word and its guard.
//!
//! Written by the interrupt transport on each edge, read back by the radio
//! driver's processing step. Every read-modify-write happens while holding
//! the mutex; the lock is held only for the duration of the word update,
//! with no timeout and no reentrancy.

use std::sync::Mutex;

/// Process-lifetime interrupt status word behind a plain mutex.
#[derive(Debug, Default)]
pub struct InterruptStatus {
    word: Mutex<u32>,
}

impl InterruptStatus {
    /// A cleared status word.
    pub fn new() -> Self {
        Self::default()
    }

    /// OR the given bits into the word.
    pub fn or(&self, bits: u32) {
        let mut word = self.lock();
        *word |= bits;
    }

    /// Read the word and clear it in one guarded step.
    pub fn fetch_and_clear(&self) -> u32 {
        let mut word = self.lock();
        std::mem::replace(&mut *word, 0)
    }

    /// Read the word without clearing it.
    pub fn read(&self) -> u32 {
        *self.lock()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, u32> {
        // A poisoned guard still holds a valid word; keep going.
        self.word.lock().unwrap_or_else(|e| e.into_inner())
    }
}
