//! Telemetry report console task
//!
//! Prints peer telemetry with the elapsed time split hh:mm:ss, the way the
//! bench console expects it.

use defmt::*;

use crate::channels::REPORT_CHANNEL;

/// Report task - logs decoded telemetry from the peer
#[embassy_executor::task]
pub async fn report_task() {
    info!("Report task started");

    loop {
        let report = REPORT_CHANNEL.receive().await;
        let (hours, minutes, seconds) = report.elapsed_hms();
        info!(
            "Telemetry #{}: event={:?} elapsed={=u32:02}:{=u32:02}:{=u32:02} pulses={}",
            report.message_id, report.event, hours, minutes, seconds, report.pulse_count,
        );
        if !report.checksum_valid {
            warn!("Telemetry #{} failed its checksum", report.message_id);
        }
    }
}
