//! Inbound frame routing
//!
//! Frame kind is selected by exact wire length, then routed by event code.
//! Telemetry survives a failed checksum and is surfaced tagged invalid;
//! configuration commands with a failed checksum are rejected outright and
//! never reach validation. All errors are scoped to the one frame being
//! processed; routing carries no state across frames.

use pluvio_protocol::{ConfigFrame, EventCode, TelemetryFrame};

use crate::config::{ConfigError, ConfigSnapshot};

/// Decoded telemetry surfaced to the caller for logging and handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryReport {
    pub message_id: u16,
    pub event: EventCode,
    pub elapsed_time_ms: u32,
    pub pulse_count: u32,
    /// False when the recomputed checksum differs from the stored one
    pub checksum_valid: bool,
}

impl TelemetryReport {
    /// Elapsed time split into (hours, minutes, seconds) for console output.
    pub fn elapsed_hms(&self) -> (u32, u32, u32) {
        let ms = self.elapsed_time_ms;
        (ms / 3_600_000, (ms % 3_600_000) / 60_000, (ms % 60_000) / 1000)
    }
}

/// One routed inbound frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Inbound {
    /// Periodic measurement/status report, possibly checksum-flagged
    Telemetry(TelemetryReport),
    /// SET_CONFIG accepted; install the snapshot and acknowledge
    ConfigApplied(ConfigSnapshot),
    /// RESET_CONFIG accepted; install the defaults and acknowledge
    ConfigReset(ConfigSnapshot),
    /// The peer acknowledged a configuration command with what it installed
    ConfigAck(ConfigFrame),
}

/// Errors that drop an inbound frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// Byte count matches no known framed size
    Length { found: usize },
    /// A configuration command failed its checksum; never applied
    CommandChecksum { expected: u16, found: u16 },
    /// Event code outside the enumerated set
    UnknownEvent(u16),
    /// Known event code in the wrong frame kind
    UnexpectedEvent(EventCode),
    /// SET_CONFIG carried an out-of-range field
    Config(ConfigError),
}

impl From<ConfigError> for DispatchError {
    fn from(err: ConfigError) -> Self {
        DispatchError::Config(err)
    }
}

impl Inbound {
    /// Route one received buffer.
    pub fn from_wire(bytes: &[u8]) -> Result<Self, DispatchError> {
        if let Ok(frame) = TelemetryFrame::decode(bytes) {
            return Self::route_telemetry(frame);
        }
        if let Ok(frame) = ConfigFrame::decode(bytes) {
            return Self::route_config(frame);
        }
        Err(DispatchError::Length { found: bytes.len() })
    }

    fn route_telemetry(frame: TelemetryFrame) -> Result<Self, DispatchError> {
        let event = EventCode::from_raw(frame.event_id)
            .ok_or(DispatchError::UnknownEvent(frame.event_id))?;
        Ok(Inbound::Telemetry(TelemetryReport {
            message_id: frame.message_id,
            event,
            elapsed_time_ms: frame.elapsed_time_ms,
            pulse_count: frame.pulse_count,
            checksum_valid: frame.checksum_ok(),
        }))
    }

    fn route_config(frame: ConfigFrame) -> Result<Self, DispatchError> {
        let event = EventCode::from_raw(frame.event_id)
            .ok_or(DispatchError::UnknownEvent(frame.event_id))?;
        if event.is_config_command() && !frame.checksum_ok() {
            return Err(DispatchError::CommandChecksum {
                expected: frame.compute_checksum(),
                found: frame.checksum,
            });
        }
        match event {
            EventCode::SetConfig => {
                Ok(Inbound::ConfigApplied(ConfigSnapshot::try_from_frame(&frame)?))
            }
            EventCode::ResetConfig => Ok(Inbound::ConfigReset(ConfigSnapshot::defaults())),
            EventCode::SetConfigResponse => Ok(Inbound::ConfigAck(frame)),
            other => Err(DispatchError::UnexpectedEvent(other)),
        }
    }
}
