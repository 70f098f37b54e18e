//! Board-agnostic core logic for the Pluvio link
//!
//! This crate contains all protocol behavior that does not depend on
//! specific hardware implementations:
//!
//! - Inbound frame routing with checksum-gated command acceptance
//! - Configuration ranges, defaults, and atomic validation
//! - Event cycling for outgoing telemetry
//! - The interrupt-fed pulse counter
//! - The transport seam and the station driving one link endpoint

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod counter;
pub mod cycler;
pub mod dispatch;
pub mod station;
pub mod transport;

pub use config::{ConfigError, ConfigField, ConfigSnapshot};
pub use counter::PulseCounter;
pub use cycler::EventCycler;
pub use dispatch::{DispatchError, Inbound, TelemetryReport};
pub use station::{LinkError, Station, StationConfig};
pub use transport::Transport;
