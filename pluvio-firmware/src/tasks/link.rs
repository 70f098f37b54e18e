//! Radio link task
//!
//! Drives the station through one cooperative iteration per tick:
//! receive-decode-dispatch, then build-encode-send when telemetry is due.
//! Dropped frames are logged and the loop moves on; retry policy, if any,
//! belongs here and not in the core.

use defmt::*;
use embassy_time::{Instant, Timer};

use pluvio_core::{ConfigSnapshot, Inbound, Station, StationConfig};
use pluvio_protocol::EventCode;

use crate::channels::{CONFIG_INSTALLED, PULSE_COUNTER, REPORT_CHANNEL, SLEEP_ALLOWED};
use crate::e32::E32Link;

/// Bounded sleep between link iterations
const LINK_POLL_INTERVAL_MS: u64 = 100;

/// Events cycled through outgoing telemetry
const CYCLE_EVENTS: [EventCode; 2] = [EventCode::ResumeSleep, EventCode::DisableSleep];

/// Seconds between event cycle advances
const EVENT_SWITCH_INTERVAL_S: u32 = 30;

/// Link task - one station endpoint over the E32 modem
#[embassy_executor::task]
pub async fn link_task(mut link: E32Link) {
    info!("Link task started");

    let mut station = Station::new(StationConfig {
        cycle_events: &CYCLE_EVENTS,
        event_switch_interval_s: EVENT_SWITCH_INTERVAL_S,
        initial: ConfigSnapshot::defaults(),
    });
    let started = Instant::now();

    loop {
        let now_ms = started.elapsed().as_millis();
        match station.poll(&mut link, &PULSE_COUNTER, now_ms).await {
            Ok(Some(inbound)) => handle_inbound(inbound),
            Ok(None) => {}
            Err(e) => warn!("Link poll failed: {:?}", e),
        }
        Timer::after_millis(LINK_POLL_INTERVAL_MS).await;
    }
}

/// Route one dispatched frame to the rest of the firmware
fn handle_inbound(inbound: Inbound) {
    match inbound {
        Inbound::Telemetry(report) => {
            if REPORT_CHANNEL.try_send(report).is_err() {
                warn!("Report channel full, dropping telemetry");
            }
            match report.event {
                EventCode::ResumeSleep => SLEEP_ALLOWED.signal(true),
                EventCode::DisableSleep => SLEEP_ALLOWED.signal(false),
                EventCode::SendLoraParams | EventCode::SendProgParams => {
                    // Parameter dumps go to the console, not back on the air
                    debug!("Parameter request: {:?}", report.event);
                }
                _ => {}
            }
        }
        Inbound::ConfigApplied(snapshot) | Inbound::ConfigReset(snapshot) => {
            info!(
                "Configuration installed: ulp={} wakeup={}s shutdown={}ms rx_delay={}ms",
                snapshot.ulp_pulses,
                snapshot.wakeup_interval_sec,
                snapshot.shutdown_delay_ms,
                snapshot.lora_receive_delay_ms,
            );
            CONFIG_INSTALLED.signal(snapshot);
        }
        Inbound::ConfigAck(frame) => {
            info!(
                "Peer acknowledged configuration, message {} wakeup={}s",
                frame.message_id, frame.wakeup_interval_sec
            );
        }
    }
}
