//! Inter-task communication channels
//!
//! Defines the static channels and shared state used between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use pluvio_core::{ConfigSnapshot, PulseCounter, TelemetryReport};

/// Channel capacity for decoded telemetry reports
const REPORT_CHANNEL_SIZE: usize = 8;

/// Rain gauge pulse count. Incremented from the pulse edge context and
/// drained by the link task when telemetry goes out; both sides share the
/// counter's critical-section mutex.
pub static PULSE_COUNTER: PulseCounter<CriticalSectionRawMutex> = PulseCounter::new();

/// Decoded telemetry from the peer, consumed by the report task
pub static REPORT_CHANNEL: Channel<CriticalSectionRawMutex, TelemetryReport, REPORT_CHANNEL_SIZE> =
    Channel::new();

/// Configuration installed by the station (command applied or reset)
pub static CONFIG_INSTALLED: Signal<CriticalSectionRawMutex, ConfigSnapshot> = Signal::new();

/// Sleep-mode request from the peer (true = deep sleep allowed)
pub static SLEEP_ALLOWED: Signal<CriticalSectionRawMutex, bool> = Signal::new();
