//! An element type that records how it is constructed, cloned and dropped,
//! and can be armed to fail.

use std::{
    cell::Cell,
    error::Error,
    fmt::{self, Display, Formatter},
};

thread_local! {
    static CLONES: Cell<usize> = const { Cell::new(0) };
    static DEFAULTS: Cell<usize> = const { Cell::new(0) };
    static DROPS: Cell<usize> = const { Cell::new(0) };
    static REMAINING: Cell<Option<usize>> = const { Cell::new(None) };
}

pub const PANIC_MESSAGE: &str = "probe construction failed";

#[derive(Debug, PartialEq, Eq)]
pub struct Probe(pub u32);

impl Probe {
    /// Like `Probe(value)`, but counts as a construction and reports an
    /// armed failure as an error instead of panicking.
    pub fn try_new(value: u32) -> Result<Self, ProbeError> {
        if take_permit() {
            DEFAULTS.with(|c| c.set(c.get() + 1));
            Ok(Self(value))
        } else {
            Err(ProbeError)
        }
    }
}

/// Returns false once the armed number of constructions has been used up.
fn take_permit() -> bool {
    REMAINING.with(|remaining| match remaining.get() {
        None => true,
        Some(0) => false,
        Some(n) => {
            remaining.set(Some(n - 1));
            true
        }
    })
}

impl Clone for Probe {
    fn clone(&self) -> Self {
        if !take_permit() {
            panic!("{PANIC_MESSAGE}");
        }
        CLONES.with(|c| c.set(c.get() + 1));
        Self(self.0)
    }
}

impl Default for Probe {
    fn default() -> Self {
        if !take_permit() {
            panic!("{PANIC_MESSAGE}");
        }
        DEFAULTS.with(|c| c.set(c.get() + 1));
        Self(0)
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        DROPS.with(|c| c.set(c.get() + 1));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeError;

impl Display for ProbeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(PANIC_MESSAGE)
    }
}

impl Error for ProbeError {}

/// A view of this thread's probe counters.
pub struct Stats(());

impl Stats {
    /// Zeroes the counters and disarms any failure.
    pub fn reset() -> Self {
        CLONES.with(|c| c.set(0));
        DEFAULTS.with(|c| c.set(0));
        DROPS.with(|c| c.set(0));
        REMAINING.with(|c| c.set(None));
        Self(())
    }

    /// Lets `successes` more constructions through, then fails every one
    /// after that.
    pub fn fail_after(&self, successes: usize) {
        REMAINING.with(|c| c.set(Some(successes)));
    }

    pub fn disarm(&self) {
        REMAINING.with(|c| c.set(None));
    }

    pub fn clones(&self) -> usize {
        CLONES.with(Cell::get)
    }

    pub fn defaults(&self) -> usize {
        DEFAULTS.with(Cell::get)
    }

    pub fn constructed(&self) -> usize {
        self.clones() + self.defaults()
    }

    pub fn drops(&self) -> usize {
        DROPS.with(Cell::get)
    }
}

impl Drop for Stats {
    fn drop(&mut self) {
        self.disarm();
    }
}
