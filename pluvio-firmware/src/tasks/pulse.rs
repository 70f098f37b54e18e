//! Rain gauge pulse task
//!
//! The edge wait stands in for the pulse interrupt; each falling edge of
//! the hall sensor increments the shared counter through its
//! critical-section mutex.

use defmt::*;
use embassy_rp::gpio::Input;

use crate::channels::PULSE_COUNTER;

/// Pulse task - counts rain gauge bucket tips
#[embassy_executor::task]
pub async fn pulse_task(mut pin: Input<'static>) {
    info!("Pulse task started");

    loop {
        pin.wait_for_falling_edge().await;
        PULSE_COUNTER.increment();
        trace!("Pulse edge");
    }
}
