//! Configuration ranges, defaults, and validation
//!
//! A SET_CONFIG command is validated as a whole: the first out-of-range
//! field rejects the entire command and nothing is installed. Validation
//! produces a [`ConfigSnapshot`]; installing it is the caller's step, so a
//! rejected command can never leave the active configuration half-updated.

use core::ops::RangeInclusive;

use pluvio_protocol::{ConfigFrame, EventCode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Inclusive bounds per bounded field, shared by both link endpoints
pub const ULP_PULSES_RANGE: RangeInclusive<u8> = 1..=100;
pub const WAKEUP_INTERVAL_SEC_RANGE: RangeInclusive<u16> = 10..=3600;
pub const SHUTDOWN_DELAY_MS_RANGE: RangeInclusive<u16> = 1000..=30_000;
pub const LORA_RECEIVE_DELAY_MS_RANGE: RangeInclusive<u16> = 1000..=30_000;

/// Bounded configuration fields, named for rejection reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigField {
    UlpPulses,
    WakeupIntervalSec,
    ShutdownDelayMs,
    LoraReceiveDelayMs,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A bounded field violates its range; the whole command is rejected
    OutOfRange(ConfigField),
}

/// Validated, installable configuration values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfigSnapshot {
    /// ULP pulse count that wakes the sensor CPU
    pub ulp_pulses: u8,
    /// Telemetry wakeup interval in seconds
    pub wakeup_interval_sec: u16,
    /// Shutdown delay in milliseconds
    pub shutdown_delay_ms: u16,
    /// Post-send receive window in milliseconds
    pub lora_receive_delay_ms: u16,
}

impl ConfigSnapshot {
    /// Compiled-in defaults.
    ///
    /// Each value satisfies its declared range; see the tests below.
    pub const fn defaults() -> Self {
        Self {
            ulp_pulses: 4,
            wakeup_interval_sec: 60,
            shutdown_delay_ms: 4000,
            lora_receive_delay_ms: 6000,
        }
    }

    /// Range-check a received SET_CONFIG frame.
    ///
    /// Reserved fields are ignored. The caller installs the returned
    /// snapshot; on error the active configuration is untouched.
    pub fn try_from_frame(frame: &ConfigFrame) -> Result<Self, ConfigError> {
        if !ULP_PULSES_RANGE.contains(&frame.ulp_pulses) {
            return Err(ConfigError::OutOfRange(ConfigField::UlpPulses));
        }
        if !WAKEUP_INTERVAL_SEC_RANGE.contains(&frame.wakeup_interval_sec) {
            return Err(ConfigError::OutOfRange(ConfigField::WakeupIntervalSec));
        }
        if !SHUTDOWN_DELAY_MS_RANGE.contains(&frame.shutdown_delay_ms) {
            return Err(ConfigError::OutOfRange(ConfigField::ShutdownDelayMs));
        }
        if !LORA_RECEIVE_DELAY_MS_RANGE.contains(&frame.lora_receive_delay_ms) {
            return Err(ConfigError::OutOfRange(ConfigField::LoraReceiveDelayMs));
        }
        Ok(Self {
            ulp_pulses: frame.ulp_pulses,
            wakeup_interval_sec: frame.wakeup_interval_sec,
            shutdown_delay_ms: frame.shutdown_delay_ms,
            lora_receive_delay_ms: frame.lora_receive_delay_ms,
        })
    }

    /// Build a checksummed wire frame carrying these values.
    ///
    /// Used for SET_CONFIG requests and SET_CONFIG_RESPONSE echoes.
    pub fn to_frame(&self, message_id: u16, event: EventCode) -> ConfigFrame {
        ConfigFrame::new(
            message_id,
            event.to_raw(),
            self.ulp_pulses,
            self.wakeup_interval_sec,
            self.shutdown_delay_ms,
            self.lora_receive_delay_ms,
        )
    }
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(feature = "serde")]
impl ConfigSnapshot {
    /// Serialized size upper bound for storage buffers
    pub const POSTCARD_MAX_SIZE: usize = 16;

    /// Encode for flash storage.
    pub fn to_postcard<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], postcard::Error> {
        postcard::to_slice(self, buf)
    }

    /// Decode a stored snapshot.
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}
