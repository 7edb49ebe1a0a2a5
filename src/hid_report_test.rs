use packed_struct::prelude::*;

use crate::crc32::crc32;
use crate::driver::{ConnectionType, ProtocolVersion, INPUT_REPORT_BT_SIZE, INPUT_REPORT_USB_SIZE};
use crate::hid_report::{
    Direction, PackedInputDataReport, PairingInfoReport, PowerStatus, ReportError, TouchPointData,
};
use crate::state::State;

/// A USB report buffer for an idle controller: zero everywhere except the
/// d-pad nibble (8, released) and the touch contact inactive bits.
fn idle_usb_report() -> [u8; INPUT_REPORT_USB_SIZE] {
    let mut buf = [0u8; INPUT_REPORT_USB_SIZE];
    buf[0] = 0x01;
    buf[8] = 0x08;
    buf[33] = 0x80;
    buf[37] = 0x80;
    buf
}

fn decode_usb(buf: &[u8]) -> State {
    PackedInputDataReport::unpack(buf, ConnectionType::Usb, ProtocolVersion::V2)
        .unwrap()
        .state()
}

#[test]
fn touch_point_coordinate_round_trip() {
    let mut point = TouchPointData::default();
    point.set_x(1000);
    point.set_y(500);
    assert_eq!(point.get_x(), 1000);
    assert_eq!(point.get_y(), 500);

    // x low byte, then the split nibble byte (y low nibble | x high nibble),
    // then y high byte
    let packed = point.pack().unwrap();
    assert_eq!(packed[1], 0xE8);
    assert_eq!(packed[2], 0x43);
    assert_eq!(packed[3], 0x1F);
}

#[test]
fn touch_point_default_is_inactive() {
    let point = TouchPointData::default();
    assert!(!point.is_active());
    assert_eq!(point.pack().unwrap()[0], 0x80);
}

#[test]
fn decodes_usb_sticks_and_triggers() {
    let mut buf = idle_usb_report();
    // left stick centered, right stick deflected
    buf[1] = 0x80;
    buf[2] = 0x80;
    buf[3] = 0x10;
    buf[4] = 0xF0;
    // left trigger released, right trigger fully pulled
    buf[5] = 0x00;
    buf[6] = 0xFF;

    let state = decode_usb(&buf);
    assert_eq!(state.left_pad.x, 128);
    assert_eq!(state.left_pad.y, 128);
    assert_eq!(state.right_pad.x, 0x10);
    assert_eq!(state.right_pad.y, 0xF0);
    assert_eq!(state.left_trigger.value, 0);
    assert_eq!(state.right_trigger.value, 255);
    assert_eq!(state.dpad_direction, Direction::None);
    assert_eq!(state.button_pad, Default::default());
    assert_eq!(state.buttons, Default::default());
}

#[test]
fn decodes_usb_buttons() {
    let mut buf = idle_usb_report();
    // triangle + cross in the high nibble, d-pad left in the low
    buf[8] = 0xA6;
    // l1 (bit 0) and r3 (bit 7)
    buf[9] = 0x81;
    // mute (bit 2)
    buf[10] = 0x04;

    let state = decode_usb(&buf);
    assert!(state.button_pad.triangle);
    assert!(state.button_pad.cross);
    assert!(!state.button_pad.circle);
    assert!(!state.button_pad.square);
    assert_eq!(state.dpad_direction, Direction::Left);
    assert!(state.buttons.l1);
    assert!(state.buttons.r3);
    assert!(state.buttons.mute);
    assert!(!state.buttons.r1);
    assert!(!state.buttons.home);
}

#[test]
fn decodes_usb_motion_battery_and_audio() {
    let mut buf = idle_usb_report();
    // gyro pitch = -100, little-endian at payload bytes 15-16
    buf[16] = 0x9C;
    buf[17] = 0xFF;
    // accel z = 8192 at payload bytes 25-26
    buf[26] = 0x00;
    buf[27] = 0x20;
    buf[32] = 42; // temperature
    buf[53] = 0x18; // charging, level 8
    buf[54] = 0x05; // headphones + muted

    let state = decode_usb(&buf);
    assert_eq!(state.gyro.pitch, -100);
    assert_eq!(state.acceleration.z, 8192);
    assert_eq!(state.temperature, 42);
    assert_eq!(state.battery.power_status, PowerStatus::Charging);
    assert_eq!(state.battery.level, 8);
    assert!(state.audio.headphones_connected);
    assert!(state.audio.muted);
    assert!(!state.audio.microphone_connected);
}

#[test]
fn decodes_usb_trigger_stop_locations() {
    let mut buf = idle_usb_report();
    // stop location in the low nibble: right at payload byte 41, left at 42
    buf[42] = 0x09;
    buf[43] = 0x03;

    let state = decode_usb(&buf);
    assert_eq!(state.right_trigger.stop_location, 9);
    assert_eq!(state.left_trigger.stop_location, 3);
}

#[test]
fn decodes_usb_touch_points() {
    let mut buf = idle_usb_report();
    // contact 0: id 5 at (1000, 500)
    buf[33] = 0x05;
    buf[34] = 0xE8;
    buf[35] = 0x43;
    buf[36] = 0x1F;
    // contact 1 stays inactive

    let state = decode_usb(&buf);
    assert!(state.touch_point_0.active);
    assert_eq!(state.touch_point_0.id, 5);
    assert_eq!(state.touch_point_0.x, 1000);
    assert_eq!(state.touch_point_0.y, 500);
    assert!(!state.touch_point_1.active);
}

#[test]
fn decodes_bluetooth_framing() {
    // Same payload as the USB tests, shifted one byte further in
    let mut buf = [0u8; INPUT_REPORT_BT_SIZE];
    buf[0] = 0x31;
    buf[1] = 0x53; // seq 5, mic + hid flags
    buf[2] = 0x80; // left stick x
    buf[7] = 0xFF; // right trigger
    buf[9] = 0x08; // d-pad released
    buf[10] = 0x01; // l1
    buf[34] = 0x80;
    buf[38] = 0x80;

    let report =
        PackedInputDataReport::unpack(&buf, ConnectionType::Bluetooth, ProtocolVersion::V2)
            .unwrap();
    let state = report.state();
    assert_eq!(state.left_pad.x, 128);
    assert_eq!(state.right_trigger.value, 255);
    assert_eq!(state.dpad_direction, Direction::None);
    assert!(state.buttons.l1);
    assert!(!state.touch_point_0.active);

    match report {
        PackedInputDataReport::Bluetooth(bt) => {
            assert_eq!(bt.seq_number.to_primitive(), 5);
            assert!(bt.has_mic);
            assert!(bt.has_hid);
        }
        other => panic!("expected Bluetooth report, got {other:?}"),
    }
}

#[test]
fn decodes_legacy_byte_seven() {
    // V1 swaps the nibbles: d-pad high, face buttons low
    let mut buf = idle_usb_report();
    buf[8] = 0x68; // d-pad left + triangle

    let state = PackedInputDataReport::unpack(&buf, ConnectionType::Usb, ProtocolVersion::V1)
        .unwrap()
        .state();
    assert_eq!(state.dpad_direction, Direction::Left);
    assert!(state.button_pad.triangle);
    assert!(!state.button_pad.circle);

    // The same buffer reads differently under the current revision
    let state = decode_usb(&buf);
    assert_eq!(state.dpad_direction, Direction::None);
    assert!(!state.button_pad.triangle);
    assert!(state.button_pad.circle);
    assert!(state.button_pad.cross);
}

#[test]
fn decodes_legacy_battery_flags() {
    let mut buf = idle_usb_report();
    buf[8] = 0x80; // V1 idle d-pad nibble lives in the high half
    buf[53] = 0x17; // charging flag + level 7

    let state = PackedInputDataReport::unpack(&buf, ConnectionType::Usb, ProtocolVersion::V1)
        .unwrap()
        .state();
    assert_eq!(state.battery.power_status, PowerStatus::Charging);
    assert_eq!(state.battery.level, 7);

    buf[53] = 0x24; // charged flag + level 4
    let state = PackedInputDataReport::unpack(&buf, ConnectionType::Usb, ProtocolVersion::V1)
        .unwrap()
        .state();
    assert_eq!(state.battery.power_status, PowerStatus::Charged);
    assert_eq!(state.battery.level, 4);
}

#[test]
fn rejects_wrong_report_size() {
    let buf = [0u8; INPUT_REPORT_USB_SIZE];
    let err = PackedInputDataReport::unpack(&buf, ConnectionType::Bluetooth, ProtocolVersion::V2)
        .unwrap_err();
    assert!(matches!(
        err,
        ReportError::InvalidSize {
            expected: INPUT_REPORT_BT_SIZE,
            got: INPUT_REPORT_USB_SIZE,
        }
    ));

    let err = PackedInputDataReport::unpack(
        &buf[..INPUT_REPORT_USB_SIZE - 1],
        ConnectionType::Usb,
        ProtocolVersion::V2,
    )
    .unwrap_err();
    assert!(matches!(err, ReportError::InvalidSize { expected: 64, .. }));
}

fn pairing_info_report(client_mac: [u8; 6], host_mac: [u8; 6]) -> [u8; 20] {
    let mut buf = [0u8; 20];
    buf[0] = 0x09;
    buf[1..7].copy_from_slice(&client_mac);
    buf[10..16].copy_from_slice(&host_mac);
    let checksum = crc32(&buf[..16]);
    buf[16..20].copy_from_slice(&checksum.to_le_bytes());
    buf
}

#[test]
fn decodes_pairing_info_report() {
    let client_mac = [0x10, 0x20, 0x30, 0x40, 0x50, 0x60];
    let host_mac = [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF];
    let buf = pairing_info_report(client_mac, host_mac);

    let report = PairingInfoReport::unpack(&buf).unwrap();
    assert_eq!(report.report_id, 0x09);
    assert_eq!(report.client_mac, client_mac);
    assert_eq!(report.host_mac, host_mac);
    // the little-endian trailer matches a checksum over the preceding bytes
    assert_eq!(report.crc.to_primitive(), crc32(&buf[..16]));
}

#[test]
fn corrupted_pairing_info_fails_checksum() {
    let mut buf = pairing_info_report([1, 2, 3, 4, 5, 6], [7, 8, 9, 10, 11, 12]);
    buf[3] ^= 0xFF;

    let report = PairingInfoReport::unpack(&buf).unwrap();
    assert_ne!(report.crc.to_primitive(), crc32(&buf[..16]));
}

#[test]
fn idle_report_decodes_to_neutral_state() {
    let state = decode_usb(&idle_usb_report());
    assert_eq!(state, State::default());
}

#[test]
fn decode_is_deterministic() {
    let mut buf = idle_usb_report();
    buf[1] = 0x33;
    buf[16] = 0x12;
    buf[53] = 0x29;

    let first = decode_usb(&buf);
    let second = decode_usb(&buf);
    assert_eq!(first, second);
}
