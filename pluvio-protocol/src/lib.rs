//! Pluvio Radio Link Protocol
//!
//! This crate defines the wire protocol spoken between the two endpoints of
//! the Pluvio rain sensor link: the sensor node in the field and the bridge
//! node indoors. The link hardware (an EBYTE E32 class modem in transparent
//! transmission mode) is a raw half-duplex byte pipe, so framing is the
//! protocol's own job.
//!
//! # Protocol Overview
//!
//! All messages are fixed-layout binary frames:
//! ```text
//! ┌──────────────────────────────┬──────────┬───────────┐
//! │ BODY (little-endian fields)  │ CHECKSUM │ DELIMITER │
//! │ kind-specific               │ u16      │ 0C 0C     │
//! └──────────────────────────────┴──────────┴───────────┘
//! ```
//!
//! The checksum is a 16-bit additive sum over every body byte preceding it.
//! The receiver accepts a frame only when the byte count exactly matches one
//! of the two known framed sizes; there is no resynchronization state.

#![no_std]
#![deny(unsafe_code)]

pub mod events;
pub mod frames;

pub use events::EventCode;
pub use frames::{
    additive_checksum, ConfigFrame, FrameError, TelemetryFrame, FRAME_DELIMITER, MAX_WIRE_SIZE,
};
