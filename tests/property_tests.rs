//! Property tests for the DHT11 frame decode path.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32
//! targets.  Each case scripts a full 40-bit response on the simulated
//! line and runs the real decoder against it.

#![cfg(not(target_os = "espidf"))]

use homeguard::sensors::dht11::{Dht11, ReadStatus};
use homeguard::sensors::sim::{frame_with_checksum, script_for_frame, SimBus};
use proptest::prelude::*;

fn decode(frame: &[u8; 5]) -> homeguard::sensors::dht11::Reading {
    let bus = SimBus::new();
    bus.load_script(script_for_frame(frame));
    let dht = Dht11::new(bus.line(), bus.clock());
    dht.read()
}

proptest! {
    /// Any payload with a correct trailer decodes Ok, with humidity from
    /// byte 0 and temperature from byte 2.
    #[test]
    fn valid_trailer_decodes_payload(payload in proptest::array::uniform4(0u8..=255u8)) {
        let frame = frame_with_checksum(payload);
        let r = decode(&frame);

        prop_assert_eq!(r.status, ReadStatus::Ok);
        prop_assert_eq!(r.humidity_pct, i16::from(payload[0]));
        prop_assert_eq!(r.temperature_c, i16::from(payload[2]));
    }

    /// Any nonzero corruption of the trailer is detected, regardless of
    /// payload — and the sentinel fields never leak stale data.
    #[test]
    fn corrupted_trailer_is_always_detected(
        payload in proptest::array::uniform4(0u8..=255u8),
        delta in 1u8..=255u8,
    ) {
        let mut frame = frame_with_checksum(payload);
        frame[4] = frame[4].wrapping_add(delta);
        let r = decode(&frame);

        prop_assert_eq!(r.status, ReadStatus::ChecksumError);
        prop_assert_eq!(r.humidity_pct, -1);
        prop_assert_eq!(r.temperature_c, -1);
    }
}
