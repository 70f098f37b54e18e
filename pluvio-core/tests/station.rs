//! Host-side link exchanges driven end to end over a mock transport.

use std::collections::VecDeque;
use std::convert::Infallible;

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;

use pluvio_core::dispatch::{DispatchError, Inbound};
use pluvio_core::{
    ConfigSnapshot, LinkError, PulseCounter, Station, StationConfig, Transport,
};
use pluvio_protocol::{ConfigFrame, EventCode, TelemetryFrame};

#[derive(Default)]
struct MockTransport {
    inbound: VecDeque<Vec<u8>>,
    sent: Vec<Vec<u8>>,
}

impl MockTransport {
    fn queue(&mut self, frame: &[u8]) {
        self.inbound.push_back(frame.to_vec());
    }

    fn sent_telemetry(&self) -> Vec<TelemetryFrame> {
        self.sent
            .iter()
            .filter(|bytes| bytes.len() == TelemetryFrame::WIRE_SIZE)
            .map(|bytes| TelemetryFrame::decode(bytes).unwrap())
            .collect()
    }

    fn sent_config(&self) -> Vec<ConfigFrame> {
        self.sent
            .iter()
            .filter(|bytes| bytes.len() == ConfigFrame::WIRE_SIZE)
            .map(|bytes| ConfigFrame::decode(bytes).unwrap())
            .collect()
    }
}

impl Transport for MockTransport {
    type Error = Infallible;

    fn poll_ready(&mut self) -> Result<bool, Infallible> {
        Ok(!self.inbound.is_empty())
    }

    async fn send(&mut self, frame: &[u8]) -> Result<(), Infallible> {
        self.sent.push(frame.to_vec());
        Ok(())
    }

    async fn recv(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        let frame = self.inbound.pop_front().unwrap_or_default();
        let n = frame.len().min(buf.len());
        buf[..n].copy_from_slice(&frame[..n]);
        Ok(n)
    }
}

fn test_station() -> Station {
    Station::new(StationConfig {
        cycle_events: &[EventCode::ResumeSleep, EventCode::DisableSleep],
        event_switch_interval_s: 30,
        initial: ConfigSnapshot::defaults(),
    })
}

#[test]
fn telemetry_sent_on_first_poll_then_on_cadence() {
    let mut link = MockTransport::default();
    let pulses: PulseCounter<NoopRawMutex> = PulseCounter::new();
    let mut station = test_station();

    block_on(station.poll(&mut link, &pulses, 0)).unwrap();
    assert_eq!(link.sent.len(), 1);

    // Default wakeup interval is 60 s; nothing goes out before it elapses
    block_on(station.poll(&mut link, &pulses, 1_000)).unwrap();
    block_on(station.poll(&mut link, &pulses, 59_999)).unwrap();
    assert_eq!(link.sent.len(), 1);

    block_on(station.poll(&mut link, &pulses, 60_000)).unwrap();
    assert_eq!(link.sent.len(), 2);

    let frames = link.sent_telemetry();
    assert_eq!(frames[0].message_id, 1);
    assert_eq!(frames[1].message_id, 2);
    assert!(frames.iter().all(TelemetryFrame::checksum_ok));
}

#[test]
fn telemetry_events_cycle_on_the_switch_interval() {
    let mut link = MockTransport::default();
    let pulses: PulseCounter<NoopRawMutex> = PulseCounter::new();
    let mut station = test_station();

    for now_ms in [0, 60_000, 120_000] {
        block_on(station.poll(&mut link, &pulses, now_ms)).unwrap();
    }

    let events: Vec<u16> = link.sent_telemetry().iter().map(|f| f.event_id).collect();
    assert_eq!(events, [0x0001, 0x0002, 0x0001]);
}

#[test]
fn telemetry_drains_the_pulse_counter() {
    let mut link = MockTransport::default();
    let pulses: PulseCounter<NoopRawMutex> = PulseCounter::new();
    let mut station = test_station();

    for _ in 0..7 {
        pulses.increment();
    }
    block_on(station.poll(&mut link, &pulses, 0)).unwrap();

    assert_eq!(link.sent_telemetry()[0].pulse_count, 7);
    assert_eq!(pulses.peek(), 0);

    // A quiet interval reports zero, not a stale count
    block_on(station.poll(&mut link, &pulses, 60_000)).unwrap();
    assert_eq!(link.sent_telemetry()[1].pulse_count, 0);
}

#[test]
fn set_config_installs_and_acknowledges() {
    let mut link = MockTransport::default();
    let pulses: PulseCounter<NoopRawMutex> = PulseCounter::new();
    let mut station = test_station();

    link.queue(&ConfigFrame::new(1, 0x0005, 10, 120, 2000, 3000).to_wire());
    let inbound = block_on(station.poll(&mut link, &pulses, 1_000)).unwrap();

    let expected = ConfigSnapshot {
        ulp_pulses: 10,
        wakeup_interval_sec: 120,
        shutdown_delay_ms: 2000,
        lora_receive_delay_ms: 3000,
    };
    assert_eq!(inbound, Some(Inbound::ConfigApplied(expected)));
    assert_eq!(station.active_config(), expected);

    let ack = link.sent_config()[0];
    assert_eq!(ack.event_id, EventCode::SetConfigResponse.to_raw());
    assert_eq!(ack.wakeup_interval_sec, 120);
    assert!(ack.checksum_ok());
}

#[test]
fn command_with_bad_checksum_changes_nothing() {
    let mut link = MockTransport::default();
    let pulses: PulseCounter<NoopRawMutex> = PulseCounter::new();
    let mut station = test_station();
    let before = station.active_config();

    let mut frame = ConfigFrame::new(1, 0x0005, 10, 120, 2000, 3000);
    frame.checksum ^= 0x0001;
    link.queue(&frame.to_wire());

    let result = block_on(station.poll(&mut link, &pulses, 1_000));
    assert!(matches!(
        result,
        Err(LinkError::Dispatch(DispatchError::CommandChecksum { .. }))
    ));
    assert_eq!(station.active_config(), before);
    assert!(link.sent_config().is_empty());
}

#[test]
fn out_of_range_command_changes_nothing() {
    let mut link = MockTransport::default();
    let pulses: PulseCounter<NoopRawMutex> = PulseCounter::new();
    let mut station = test_station();
    let before = station.active_config();

    // wakeup_interval_sec bound max is 3600
    link.queue(&ConfigFrame::new(1, 0x0005, 10, 5000, 2000, 3000).to_wire());

    let result = block_on(station.poll(&mut link, &pulses, 1_000));
    assert!(matches!(
        result,
        Err(LinkError::Dispatch(DispatchError::Config(_)))
    ));
    assert_eq!(station.active_config(), before);
    assert!(link.sent_config().is_empty());
}

#[test]
fn reset_config_installs_defaults() {
    let mut link = MockTransport::default();
    let pulses: PulseCounter<NoopRawMutex> = PulseCounter::new();

    let mut station = Station::new(StationConfig {
        cycle_events: &[EventCode::ResumeSleep],
        event_switch_interval_s: 30,
        initial: ConfigSnapshot {
            ulp_pulses: 50,
            wakeup_interval_sec: 600,
            shutdown_delay_ms: 10_000,
            lora_receive_delay_ms: 10_000,
        },
    });

    link.queue(&ConfigFrame::new(1, 0x0006, 0, 0, 0, 0).to_wire());
    let inbound = block_on(station.poll(&mut link, &pulses, 1_000)).unwrap();

    assert_eq!(
        inbound,
        Some(Inbound::ConfigReset(ConfigSnapshot::defaults()))
    );
    assert_eq!(station.active_config(), ConfigSnapshot::defaults());

    let ack = link.sent_config()[0];
    assert_eq!(ack.event_id, EventCode::SetConfigResponse.to_raw());
    assert_eq!(ack.wakeup_interval_sec, 60);
}

#[test]
fn station_survives_a_dropped_frame() {
    let mut link = MockTransport::default();
    let pulses: PulseCounter<NoopRawMutex> = PulseCounter::new();
    let mut station = test_station();

    link.queue(&[0xAA; 5]);
    let result = block_on(station.poll(&mut link, &pulses, 1_000));
    assert_eq!(
        result,
        Err(LinkError::Dispatch(DispatchError::Length { found: 5 }))
    );

    link.queue(&TelemetryFrame::new(3, 0x0001, 500, 1).to_wire());
    let inbound = block_on(station.poll(&mut link, &pulses, 2_000)).unwrap();
    assert!(matches!(inbound, Some(Inbound::Telemetry(_))));
}

#[test]
fn flagged_telemetry_still_comes_through() {
    let mut link = MockTransport::default();
    let pulses: PulseCounter<NoopRawMutex> = PulseCounter::new();
    let mut station = test_station();

    let mut wire = TelemetryFrame::new(8, 0x0002, 1000, 4).to_wire();
    wire[12] ^= 0x01;
    link.queue(&wire);

    match block_on(station.poll(&mut link, &pulses, 1_000)).unwrap() {
        Some(Inbound::Telemetry(report)) => {
            assert!(!report.checksum_valid);
            assert_eq!(report.message_id, 8);
        }
        other => panic!("expected flagged telemetry, got {other:?}"),
    }
}

#[test]
fn config_request_and_reset_go_out_checksummed() {
    let mut link = MockTransport::default();
    let mut station = test_station();

    let settings = ConfigSnapshot {
        ulp_pulses: 20,
        wakeup_interval_sec: 300,
        shutdown_delay_ms: 5000,
        lora_receive_delay_ms: 5000,
    };
    block_on(station.send_config_request(&mut link, &settings)).unwrap();
    block_on(station.send_config_reset(&mut link)).unwrap();

    let frames = link.sent_config();
    assert_eq!(frames[0].event_id, EventCode::SetConfig.to_raw());
    assert_eq!(frames[0].ulp_pulses, 20);
    assert_eq!(frames[1].event_id, EventCode::ResetConfig.to_raw());
    assert_eq!(frames[1].wakeup_interval_sec, 0);
    assert!(frames.iter().all(ConfigFrame::checksum_ok));

    // One message-id counter feeds every outgoing frame
    assert_eq!(frames[0].message_id, 1);
    assert_eq!(frames[1].message_id, 2);
}
