//! Universally quantified wire properties for the frame codec.

use proptest::prelude::*;

use pluvio_protocol::{ConfigFrame, FrameError, TelemetryFrame};

proptest! {
    #[test]
    fn telemetry_roundtrip(message_id: u16, event_id: u16, elapsed: u32, pulses: u32) {
        let frame = TelemetryFrame::new(message_id, event_id, elapsed, pulses);
        let decoded = TelemetryFrame::decode(&frame.to_wire()).unwrap();
        prop_assert_eq!(decoded, frame);
        prop_assert!(decoded.checksum_ok());
    }

    #[test]
    fn config_roundtrip(
        message_id: u16,
        event_id: u16,
        ulp: u8,
        wakeup: u16,
        shutdown: u16,
        delay: u16,
    ) {
        let frame = ConfigFrame::new(message_id, event_id, ulp, wakeup, shutdown, delay);
        let decoded = ConfigFrame::decode(&frame.to_wire()).unwrap();
        prop_assert_eq!(decoded, frame);
        prop_assert!(decoded.checksum_ok());
    }

    #[test]
    fn checksum_survives_the_wire(message_id: u16, event_id: u16, elapsed: u32, pulses: u32) {
        let frame = TelemetryFrame::new(message_id, event_id, elapsed, pulses);
        let decoded = TelemetryFrame::decode(&frame.to_wire()).unwrap();
        prop_assert_eq!(decoded.compute_checksum(), frame.checksum);
    }

    #[test]
    fn wrong_length_never_partially_decodes(len in 0usize..64) {
        prop_assume!(len != TelemetryFrame::WIRE_SIZE);
        let buf = vec![0u8; len];
        prop_assert_eq!(
            TelemetryFrame::decode(&buf),
            Err(FrameError::LengthMismatch {
                expected: TelemetryFrame::WIRE_SIZE,
                found: len,
            })
        );
    }
}
