//! Event cycling for outgoing telemetry
//!
//! Rotates through a fixed list of event codes on a wall-clock interval.
//! One poll per main-loop iteration; polling never blocks.

use heapless::Vec;

use pluvio_protocol::EventCode;

/// Maximum events in one cycle list
pub const MAX_CYCLE_EVENTS: usize = 8;

/// Selects the event code for the next outgoing telemetry frame.
pub struct EventCycler {
    events: Vec<EventCode, MAX_CYCLE_EVENTS>,
    index: usize,
    switch_interval_ms: u64,
    last_switch_ms: u64,
}

impl EventCycler {
    /// Create a cycler over `events`, advancing every `switch_interval_s`.
    ///
    /// At most [`MAX_CYCLE_EVENTS`] are kept. An empty list falls back to
    /// `ResumeSleep` so `current` always has an answer.
    pub fn new(events: &[EventCode], switch_interval_s: u32) -> Self {
        let mut list = Vec::new();
        for &event in events.iter().take(MAX_CYCLE_EVENTS) {
            let _ = list.push(event);
        }
        if list.is_empty() {
            let _ = list.push(EventCode::ResumeSleep);
        }
        Self {
            events: list,
            index: 0,
            switch_interval_ms: u64::from(switch_interval_s) * 1000,
            last_switch_ms: 0,
        }
    }

    /// Event currently selected for outgoing telemetry.
    pub fn current(&self) -> EventCode {
        self.events[self.index]
    }

    /// Advance one position, modulo the list length, when the switch
    /// interval has elapsed; return the selected event.
    pub fn poll(&mut self, now_ms: u64) -> EventCode {
        if now_ms.saturating_sub(self.last_switch_ms) >= self.switch_interval_ms {
            self.index = (self.index + 1) % self.events.len();
            self.last_switch_ms = now_ms;
        }
        self.current()
    }
}
