//! Interrupt-fed pulse counter

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Monotonic pulse counter shared between the pulse edge context and the
/// main loop.
///
/// Both access paths go through the same mutex; guarding only one side
/// would reintroduce the lost-update race. Instantiated with
/// [`CriticalSectionRawMutex`](embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex)
/// the counter is safe to touch from interrupt context.
pub struct PulseCounter<M: RawMutex> {
    count: Mutex<M, Cell<u32>>,
}

impl<M: RawMutex> PulseCounter<M> {
    /// Create a counter starting at zero.
    pub const fn new() -> Self {
        Self {
            count: Mutex::new(Cell::new(0)),
        }
    }

    /// Record one pulse edge. Interrupt-context side; O(1), non-blocking.
    pub fn increment(&self) {
        self.count.lock(|count| count.set(count.get().wrapping_add(1)));
    }

    /// Atomically capture and zero the count. Main-context side.
    pub fn read_and_reset(&self) -> u32 {
        self.count.lock(|count| count.replace(0))
    }

    /// Current count without resetting.
    pub fn peek(&self) -> u32 {
        self.count.lock(|count| count.get())
    }
}

impl<M: RawMutex> Default for PulseCounter<M> {
    fn default() -> Self {
        Self::new()
    }
}
