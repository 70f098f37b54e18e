//! Frame encoding and decoding for the Pluvio link.
//!
//! Both frame kinds share the same wire discipline:
//! - body fields serialized in declared order, little-endian, no padding
//! - a 16-bit additive checksum over every body byte preceding it
//! - a trailing 2-byte delimiter
//!
//! Telemetry frame, 14 body bytes + delimiter = 16 bytes:
//! ```text
//! 0  message_id       u16
//! 2  event_id         u16
//! 4  elapsed_time_ms  u32
//! 8  pulse_count      u32
//! 12 checksum         u16
//! 14 delimiter        0C 0C
//! ```
//!
//! Configuration frame, 16 body bytes + delimiter = 18 bytes:
//! ```text
//! 0  message_id             u16
//! 2  event_id               u16
//! 4  ulp_pulses             u8
//! 5  reserved1              u8
//! 6  wakeup_interval_sec    u16
//! 8  shutdown_delay_ms      u16
//! 10 lora_receive_delay_ms  u16
//! 12 reserved2              u16
//! 14 checksum               u16
//! 16 delimiter              0C 0C
//! ```

/// Trailing frame delimiter, appended on send.
///
/// The receiver counts these bytes toward the expected length but never
/// inspects their content; acceptance is gated on exact length alone.
pub const FRAME_DELIMITER: [u8; 2] = [0x0C, 0x0C];

/// Largest complete wire frame across both frame kinds.
pub const MAX_WIRE_SIZE: usize = ConfigFrame::WIRE_SIZE;

/// 16-bit additive checksum: wrapping sum of bytes, carry-out discarded.
pub fn additive_checksum(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(0u16, |sum, &byte| sum.wrapping_add(u16::from(byte)))
}

/// Errors that can occur during frame decoding or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Byte count does not match the complete framed size
    LengthMismatch { expected: usize, found: usize },
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Periodic measurement/status report frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryFrame {
    /// Sender's running message counter
    pub message_id: u16,
    /// Raw event code (see [`crate::events::EventCode`])
    pub event_id: u16,
    /// Milliseconds since the sender booted; wraps with the u32 field
    pub elapsed_time_ms: u32,
    /// Pulses counted since the previous report
    pub pulse_count: u32,
    /// Additive checksum over body bytes 0..12
    pub checksum: u16,
}

impl TelemetryFrame {
    /// Body size in bytes, excluding the delimiter
    pub const BODY_SIZE: usize = 14;
    /// Complete framed size on the wire
    pub const WIRE_SIZE: usize = Self::BODY_SIZE + FRAME_DELIMITER.len();

    /// Build a frame with its checksum filled in.
    pub fn new(message_id: u16, event_id: u16, elapsed_time_ms: u32, pulse_count: u32) -> Self {
        let mut frame = Self {
            message_id,
            event_id,
            elapsed_time_ms,
            pulse_count,
            checksum: 0,
        };
        frame.checksum = frame.compute_checksum();
        frame
    }

    fn body_bytes(&self) -> [u8; Self::BODY_SIZE] {
        let mut body = [0u8; Self::BODY_SIZE];
        body[0..2].copy_from_slice(&self.message_id.to_le_bytes());
        body[2..4].copy_from_slice(&self.event_id.to_le_bytes());
        body[4..8].copy_from_slice(&self.elapsed_time_ms.to_le_bytes());
        body[8..12].copy_from_slice(&self.pulse_count.to_le_bytes());
        body[12..14].copy_from_slice(&self.checksum.to_le_bytes());
        body
    }

    /// Checksum over the body bytes preceding the checksum field.
    pub fn compute_checksum(&self) -> u16 {
        let body = self.body_bytes();
        additive_checksum(&body[..Self::BODY_SIZE - 2])
    }

    /// Whether the stored checksum matches the recomputed one.
    pub fn checksum_ok(&self) -> bool {
        self.compute_checksum() == self.checksum
    }

    /// Encode into a caller-provided buffer, delimiter included.
    ///
    /// Returns the number of bytes written.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        if buffer.len() < Self::WIRE_SIZE {
            return Err(FrameError::BufferTooSmall);
        }
        buffer[..Self::BODY_SIZE].copy_from_slice(&self.body_bytes());
        buffer[Self::BODY_SIZE..Self::WIRE_SIZE].copy_from_slice(&FRAME_DELIMITER);
        Ok(Self::WIRE_SIZE)
    }

    /// Encode into a fixed wire image.
    pub fn to_wire(&self) -> [u8; Self::WIRE_SIZE] {
        let mut wire = [0u8; Self::WIRE_SIZE];
        wire[..Self::BODY_SIZE].copy_from_slice(&self.body_bytes());
        wire[Self::BODY_SIZE..].copy_from_slice(&FRAME_DELIMITER);
        wire
    }

    /// Decode a complete wire frame.
    ///
    /// Fails with [`FrameError::LengthMismatch`] unless the input is exactly
    /// [`Self::WIRE_SIZE`] bytes; nothing is populated on failure. The
    /// stored checksum is carried as-is; callers check [`Self::checksum_ok`].
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() != Self::WIRE_SIZE {
            return Err(FrameError::LengthMismatch {
                expected: Self::WIRE_SIZE,
                found: bytes.len(),
            });
        }
        Ok(Self {
            message_id: u16::from_le_bytes([bytes[0], bytes[1]]),
            event_id: u16::from_le_bytes([bytes[2], bytes[3]]),
            elapsed_time_ms: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            pulse_count: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            checksum: u16::from_le_bytes([bytes[12], bytes[13]]),
        })
    }
}

/// Configuration command/response frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigFrame {
    /// Sender's running message counter
    pub message_id: u16,
    /// Raw event code (see [`crate::events::EventCode`])
    pub event_id: u16,
    /// ULP pulse count that wakes the sensor CPU
    pub ulp_pulses: u8,
    /// Reserved for future use
    pub reserved1: u8,
    /// Telemetry wakeup interval in seconds
    pub wakeup_interval_sec: u16,
    /// Shutdown delay in milliseconds
    pub shutdown_delay_ms: u16,
    /// Post-send receive window in milliseconds
    pub lora_receive_delay_ms: u16,
    /// Reserved for future use
    pub reserved2: u16,
    /// Additive checksum over body bytes 0..14
    pub checksum: u16,
}

impl ConfigFrame {
    /// Body size in bytes, excluding the delimiter
    pub const BODY_SIZE: usize = 16;
    /// Complete framed size on the wire
    pub const WIRE_SIZE: usize = Self::BODY_SIZE + FRAME_DELIMITER.len();

    /// Build a frame with reserved fields zeroed and the checksum filled in.
    pub fn new(
        message_id: u16,
        event_id: u16,
        ulp_pulses: u8,
        wakeup_interval_sec: u16,
        shutdown_delay_ms: u16,
        lora_receive_delay_ms: u16,
    ) -> Self {
        let mut frame = Self {
            message_id,
            event_id,
            ulp_pulses,
            reserved1: 0,
            wakeup_interval_sec,
            shutdown_delay_ms,
            lora_receive_delay_ms,
            reserved2: 0,
            checksum: 0,
        };
        frame.checksum = frame.compute_checksum();
        frame
    }

    fn body_bytes(&self) -> [u8; Self::BODY_SIZE] {
        let mut body = [0u8; Self::BODY_SIZE];
        body[0..2].copy_from_slice(&self.message_id.to_le_bytes());
        body[2..4].copy_from_slice(&self.event_id.to_le_bytes());
        body[4] = self.ulp_pulses;
        body[5] = self.reserved1;
        body[6..8].copy_from_slice(&self.wakeup_interval_sec.to_le_bytes());
        body[8..10].copy_from_slice(&self.shutdown_delay_ms.to_le_bytes());
        body[10..12].copy_from_slice(&self.lora_receive_delay_ms.to_le_bytes());
        body[12..14].copy_from_slice(&self.reserved2.to_le_bytes());
        body[14..16].copy_from_slice(&self.checksum.to_le_bytes());
        body
    }

    /// Checksum over the body bytes preceding the checksum field.
    pub fn compute_checksum(&self) -> u16 {
        let body = self.body_bytes();
        additive_checksum(&body[..Self::BODY_SIZE - 2])
    }

    /// Whether the stored checksum matches the recomputed one.
    pub fn checksum_ok(&self) -> bool {
        self.compute_checksum() == self.checksum
    }

    /// Encode into a caller-provided buffer, delimiter included.
    ///
    /// Returns the number of bytes written.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        if buffer.len() < Self::WIRE_SIZE {
            return Err(FrameError::BufferTooSmall);
        }
        buffer[..Self::BODY_SIZE].copy_from_slice(&self.body_bytes());
        buffer[Self::BODY_SIZE..Self::WIRE_SIZE].copy_from_slice(&FRAME_DELIMITER);
        Ok(Self::WIRE_SIZE)
    }

    /// Encode into a fixed wire image.
    pub fn to_wire(&self) -> [u8; Self::WIRE_SIZE] {
        let mut wire = [0u8; Self::WIRE_SIZE];
        wire[..Self::BODY_SIZE].copy_from_slice(&self.body_bytes());
        wire[Self::BODY_SIZE..].copy_from_slice(&FRAME_DELIMITER);
        wire
    }

    /// Decode a complete wire frame.
    ///
    /// Fails with [`FrameError::LengthMismatch`] unless the input is exactly
    /// [`Self::WIRE_SIZE`] bytes; nothing is populated on failure.
    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() != Self::WIRE_SIZE {
            return Err(FrameError::LengthMismatch {
                expected: Self::WIRE_SIZE,
                found: bytes.len(),
            });
        }
        Ok(Self {
            message_id: u16::from_le_bytes([bytes[0], bytes[1]]),
            event_id: u16::from_le_bytes([bytes[2], bytes[3]]),
            ulp_pulses: bytes[4],
            reserved1: bytes[5],
            wakeup_interval_sec: u16::from_le_bytes([bytes[6], bytes[7]]),
            shutdown_delay_ms: u16::from_le_bytes([bytes[8], bytes[9]]),
            lora_receive_delay_ms: u16::from_le_bytes([bytes[10], bytes[11]]),
            reserved2: u16::from_le_bytes([bytes[12], bytes[13]]),
            checksum: u16::from_le_bytes([bytes[14], bytes[15]]),
        })
    }
}
