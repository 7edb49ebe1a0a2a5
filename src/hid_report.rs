//! Packed HID report layouts for the DualSense controller.
//!
//! Bit positions follow the community documentation of the report family and
//! the device's own firmware conventions. Two input layout revisions exist in
//! the wild (see [`ProtocolVersion`]): they share every field except the
//! face-button/d-pad byte and the battery byte, which is why the structures
//! below come in near-duplicate pairs.

use packed_struct::prelude::*;
use thiserror::Error;

use crate::driver::{ConnectionType, ProtocolVersion, INPUT_REPORT_BT_SIZE, INPUT_REPORT_USB_SIZE};
use crate::lights::{MuteLightMode, PlayerIndicatorBrightness};
use crate::state::{
    Acceleration, AnalogPad, Audio, Battery, ButtonPad, Buttons, Gyro, State, TouchPoint, Trigger,
};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid report size: expected {expected} bytes, got {got}")]
    InvalidSize { expected: usize, got: usize },

    #[error("invalid report id: {0:#04x}")]
    InvalidReportId(u8),

    #[error("failed to unpack report: {0}")]
    Unpack(#[from] packed_struct::PackingError),
}

/// Direction of the pressed d-pad buttons. The wire encoding is a 4-bit
/// value; an idle controller reports [`Direction::None`] (8), not 0.
#[derive(PrimitiveEnum_u8, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Direction {
    Up = 0,
    UpRight = 1,
    Right = 2,
    DownRight = 3,
    Down = 4,
    DownLeft = 5,
    Left = 6,
    UpLeft = 7,
    #[default]
    None = 8,
}

/// Battery power status nibble.
#[derive(PrimitiveEnum_u8, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PowerStatus {
    #[default]
    Discharging = 0x00,
    Charging = 0x01,
    Charged = 0x02,
    VoltageError = 0x0A,
    TemperatureError = 0x0B,
    ChargingError = 0x0F,
}

/// One packed touchpad contact. X is 12 bits spanning byte 1 and the low
/// nibble of byte 2; Y is 12 bits spanning the high nibble of byte 2 and
/// byte 3.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "4")]
pub struct TouchPointData {
    // byte 0, bit 7 set means no contact
    #[packed_field(bits = "0")]
    pub inactive: bool,
    #[packed_field(bits = "1..=7")]
    pub id: Integer<u8, packed_bits::Bits<7>>,
    // byte 1
    #[packed_field(bytes = "1")]
    pub x_lo: u8,
    // byte 2
    #[packed_field(bits = "16..=19")]
    pub y_lo: Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(bits = "20..=23")]
    pub x_hi: Integer<u8, packed_bits::Bits<4>>,
    // byte 3
    #[packed_field(bytes = "3")]
    pub y_hi: u8,
}

impl Default for TouchPointData {
    fn default() -> Self {
        Self {
            inactive: true,
            id: Default::default(),
            x_lo: Default::default(),
            y_lo: Default::default(),
            x_hi: Default::default(),
            y_hi: Default::default(),
        }
    }
}

impl TouchPointData {
    pub fn is_active(&self) -> bool {
        !self.inactive
    }

    pub fn get_x(&self) -> u16 {
        (self.x_hi.to_primitive() as u16) << 8 | self.x_lo as u16
    }

    pub fn get_y(&self) -> u16 {
        (self.y_hi as u16) << 4 | self.y_lo.to_primitive() as u16
    }

    pub fn set_x(&mut self, x: u16) {
        self.x_lo = (x & 0x00FF) as u8;
        self.x_hi = Integer::from_primitive((x >> 8) as u8 & 0x0F);
    }

    pub fn set_y(&mut self, y: u16) {
        self.y_lo = Integer::from_primitive((y & 0x000F) as u8);
        self.y_hi = (y >> 4) as u8;
    }

    pub fn to_touch_point(self) -> TouchPoint {
        TouchPoint {
            active: self.is_active(),
            x: self.get_x(),
            y: self.get_y(),
            id: self.id.to_primitive(),
        }
    }
}

/// Touchpad block: two contacts plus a rolling timestamp.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "9")]
pub struct TouchData {
    #[packed_field(element_size_bytes = "4")]
    pub points: [TouchPointData; 2],
    pub timestamp: u8,
}

impl TouchData {
    /// Returns true if any contact is registered.
    pub fn has_touches(&self) -> bool {
        self.points[0].is_active() || self.points[1].is_active()
    }
}

/// Common 63-byte input payload shared by the USB and Bluetooth framings,
/// current protocol revision.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "63")]
pub struct InputState {
    // byte 0-5
    #[packed_field(bytes = "0")]
    pub left_stick_x: u8,
    #[packed_field(bytes = "1")]
    pub left_stick_y: u8,
    #[packed_field(bytes = "2")]
    pub right_stick_x: u8,
    #[packed_field(bytes = "3")]
    pub right_stick_y: u8,
    #[packed_field(bytes = "4")]
    pub left_trigger: u8,
    #[packed_field(bytes = "5")]
    pub right_trigger: u8,

    // byte 6
    #[packed_field(bytes = "6")]
    pub seq_number: u8,

    // byte 7, face buttons in the high nibble, d-pad in the low
    #[packed_field(bits = "56")]
    pub triangle: bool,
    #[packed_field(bits = "57")]
    pub circle: bool,
    #[packed_field(bits = "58")]
    pub cross: bool,
    #[packed_field(bits = "59")]
    pub square: bool,
    #[packed_field(bits = "60..=63", ty = "enum")]
    pub dpad: Direction,

    // byte 8
    #[packed_field(bits = "64")]
    pub r3: bool,
    #[packed_field(bits = "65")]
    pub l3: bool,
    #[packed_field(bits = "66")]
    pub menu: bool,
    #[packed_field(bits = "67")]
    pub create: bool,
    #[packed_field(bits = "68")]
    pub r2: bool,
    #[packed_field(bits = "69")]
    pub l2: bool,
    #[packed_field(bits = "70")]
    pub r1: bool,
    #[packed_field(bits = "71")]
    pub l1: bool,

    // byte 9
    #[packed_field(bits = "72..=76")]
    pub _unkn_0: Integer<u8, packed_bits::Bits<5>>,
    #[packed_field(bits = "77")]
    pub mute: bool,
    #[packed_field(bits = "78")]
    pub touchpad: bool,
    #[packed_field(bits = "79")]
    pub home: bool,

    // byte 10
    #[packed_field(bytes = "10")]
    pub _unkn_1: u8,

    // byte 11-14
    #[packed_field(bytes = "11..=14", endian = "lsb")]
    pub timestamp: Integer<u32, packed_bits::Bits<32>>,

    // byte 15-26, little-endian signed sensor counts
    #[packed_field(bytes = "15..=16", endian = "lsb")]
    pub gyro_pitch: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "17..=18", endian = "lsb")]
    pub gyro_yaw: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "19..=20", endian = "lsb")]
    pub gyro_roll: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "21..=22", endian = "lsb")]
    pub accel_x: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "23..=24", endian = "lsb")]
    pub accel_y: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "25..=26", endian = "lsb")]
    pub accel_z: Integer<i16, packed_bits::Bits<16>>,

    // byte 27-30
    #[packed_field(bytes = "27..=30", endian = "lsb")]
    pub sensor_timestamp: Integer<u32, packed_bits::Bits<32>>,

    // byte 31
    #[packed_field(bytes = "31")]
    pub temperature: u8,

    // byte 32-40
    #[packed_field(bytes = "32..=40")]
    pub touch_data: TouchData,

    // byte 41-42, feedback stop location in the low nibble
    #[packed_field(bits = "328..=331")]
    pub _right_trigger_unkn: Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(bits = "332..=335")]
    pub right_trigger_stop: Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(bits = "336..=339")]
    pub _left_trigger_unkn: Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(bits = "340..=343")]
    pub left_trigger_stop: Integer<u8, packed_bits::Bits<4>>,

    // byte 43-46, mirrors data from report writes
    #[packed_field(bytes = "43..=46", endian = "lsb")]
    pub host_timestamp: Integer<u32, packed_bits::Bits<32>>,

    // byte 47
    #[packed_field(bytes = "47")]
    pub _unkn_2: u8,

    // byte 48-51
    #[packed_field(bytes = "48..=51", endian = "lsb")]
    pub device_timestamp: Integer<u32, packed_bits::Bits<32>>,

    // byte 52
    #[packed_field(bits = "416..=419", ty = "enum")]
    pub power_status: PowerStatus,
    #[packed_field(bits = "420..=423")]
    pub battery_level: Integer<u8, packed_bits::Bits<4>>,

    // byte 53
    #[packed_field(bits = "424..=428")]
    pub _unkn_3: Integer<u8, packed_bits::Bits<5>>,
    #[packed_field(bits = "429")]
    pub muted: bool,
    #[packed_field(bits = "430")]
    pub microphone: bool,
    #[packed_field(bits = "431")]
    pub headphones: bool,

    // byte 54-62
    #[packed_field(bytes = "54..=62")]
    pub reserved: [u8; 9],
}

impl InputState {
    pub fn to_state(&self) -> State {
        State {
            left_pad: AnalogPad {
                x: self.left_stick_x,
                y: self.left_stick_y,
            },
            right_pad: AnalogPad {
                x: self.right_stick_x,
                y: self.right_stick_y,
            },
            left_trigger: Trigger {
                value: self.left_trigger,
                stop_location: self.left_trigger_stop.to_primitive(),
            },
            right_trigger: Trigger {
                value: self.right_trigger,
                stop_location: self.right_trigger_stop.to_primitive(),
            },
            dpad_direction: self.dpad,
            button_pad: ButtonPad {
                triangle: self.triangle,
                circle: self.circle,
                cross: self.cross,
                square: self.square,
            },
            buttons: Buttons {
                l1: self.l1,
                r1: self.r1,
                l2: self.l2,
                r2: self.r2,
                create: self.create,
                menu: self.menu,
                l3: self.l3,
                r3: self.r3,
                home: self.home,
                touchpad: self.touchpad,
                mute: self.mute,
            },
            gyro: Gyro {
                pitch: self.gyro_pitch.to_primitive() as i32,
                yaw: self.gyro_yaw.to_primitive() as i32,
                roll: self.gyro_roll.to_primitive() as i32,
            },
            acceleration: Acceleration {
                x: self.accel_x.to_primitive() as i32,
                y: self.accel_y.to_primitive() as i32,
                z: self.accel_z.to_primitive() as i32,
            },
            temperature: self.temperature,
            touch_point_0: self.touch_data.points[0].to_touch_point(),
            touch_point_1: self.touch_data.points[1].to_touch_point(),
            battery: Battery {
                level: self.battery_level.to_primitive(),
                power_status: self.power_status,
            },
            audio: Audio {
                muted: self.muted,
                headphones_connected: self.headphones,
                microphone_connected: self.microphone,
            },
        }
    }
}

/// Common 63-byte input payload, earlier protocol revision. Identical to
/// [`InputState`] except for byte 7 (d-pad nibble in the high half, face
/// buttons in the low) and byte 52 (raw charging flags instead of a power
/// status enum).
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "63")]
pub struct LegacyInputState {
    // byte 0-5
    #[packed_field(bytes = "0")]
    pub left_stick_x: u8,
    #[packed_field(bytes = "1")]
    pub left_stick_y: u8,
    #[packed_field(bytes = "2")]
    pub right_stick_x: u8,
    #[packed_field(bytes = "3")]
    pub right_stick_y: u8,
    #[packed_field(bytes = "4")]
    pub left_trigger: u8,
    #[packed_field(bytes = "5")]
    pub right_trigger: u8,

    // byte 6
    #[packed_field(bytes = "6")]
    pub seq_number: u8,

    // byte 7, d-pad in the high nibble, face buttons in the low
    #[packed_field(bits = "56..=59", ty = "enum")]
    pub dpad: Direction,
    #[packed_field(bits = "60")]
    pub triangle: bool,
    #[packed_field(bits = "61")]
    pub circle: bool,
    #[packed_field(bits = "62")]
    pub cross: bool,
    #[packed_field(bits = "63")]
    pub square: bool,

    // byte 8
    #[packed_field(bits = "64")]
    pub r3: bool,
    #[packed_field(bits = "65")]
    pub l3: bool,
    #[packed_field(bits = "66")]
    pub menu: bool,
    #[packed_field(bits = "67")]
    pub create: bool,
    #[packed_field(bits = "68")]
    pub r2: bool,
    #[packed_field(bits = "69")]
    pub l2: bool,
    #[packed_field(bits = "70")]
    pub r1: bool,
    #[packed_field(bits = "71")]
    pub l1: bool,

    // byte 9
    #[packed_field(bits = "72..=76")]
    pub _unkn_0: Integer<u8, packed_bits::Bits<5>>,
    #[packed_field(bits = "77")]
    pub mute: bool,
    #[packed_field(bits = "78")]
    pub touchpad: bool,
    #[packed_field(bits = "79")]
    pub home: bool,

    // byte 10
    #[packed_field(bytes = "10")]
    pub _unkn_1: u8,

    // byte 11-14
    #[packed_field(bytes = "11..=14", endian = "lsb")]
    pub timestamp: Integer<u32, packed_bits::Bits<32>>,

    // byte 15-26
    #[packed_field(bytes = "15..=16", endian = "lsb")]
    pub gyro_pitch: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "17..=18", endian = "lsb")]
    pub gyro_yaw: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "19..=20", endian = "lsb")]
    pub gyro_roll: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "21..=22", endian = "lsb")]
    pub accel_x: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "23..=24", endian = "lsb")]
    pub accel_y: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "25..=26", endian = "lsb")]
    pub accel_z: Integer<i16, packed_bits::Bits<16>>,

    // byte 27-30
    #[packed_field(bytes = "27..=30", endian = "lsb")]
    pub sensor_timestamp: Integer<u32, packed_bits::Bits<32>>,

    // byte 31
    #[packed_field(bytes = "31")]
    pub temperature: u8,

    // byte 32-40
    #[packed_field(bytes = "32..=40")]
    pub touch_data: TouchData,

    // byte 41-42
    #[packed_field(bits = "328..=331")]
    pub _right_trigger_unkn: Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(bits = "332..=335")]
    pub right_trigger_stop: Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(bits = "336..=339")]
    pub _left_trigger_unkn: Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(bits = "340..=343")]
    pub left_trigger_stop: Integer<u8, packed_bits::Bits<4>>,

    // byte 43-46
    #[packed_field(bytes = "43..=46", endian = "lsb")]
    pub host_timestamp: Integer<u32, packed_bits::Bits<32>>,

    // byte 47
    #[packed_field(bytes = "47")]
    pub _unkn_2: u8,

    // byte 48-51
    #[packed_field(bytes = "48..=51", endian = "lsb")]
    pub device_timestamp: Integer<u32, packed_bits::Bits<32>>,

    // byte 52, raw charging flags
    #[packed_field(bits = "416..=417")]
    pub _unkn_battery: Integer<u8, packed_bits::Bits<2>>,
    #[packed_field(bits = "418")]
    pub charged: bool,
    #[packed_field(bits = "419")]
    pub charging: bool,
    #[packed_field(bits = "420..=423")]
    pub battery_level: Integer<u8, packed_bits::Bits<4>>,

    // byte 53
    #[packed_field(bits = "424..=428")]
    pub _unkn_3: Integer<u8, packed_bits::Bits<5>>,
    #[packed_field(bits = "429")]
    pub muted: bool,
    #[packed_field(bits = "430")]
    pub microphone: bool,
    #[packed_field(bits = "431")]
    pub headphones: bool,

    // byte 54-62
    #[packed_field(bytes = "54..=62")]
    pub reserved: [u8; 9],
}

impl LegacyInputState {
    pub fn to_state(&self) -> State {
        let power_status = if self.charging {
            PowerStatus::Charging
        } else if self.charged {
            PowerStatus::Charged
        } else {
            PowerStatus::Discharging
        };

        State {
            left_pad: AnalogPad {
                x: self.left_stick_x,
                y: self.left_stick_y,
            },
            right_pad: AnalogPad {
                x: self.right_stick_x,
                y: self.right_stick_y,
            },
            left_trigger: Trigger {
                value: self.left_trigger,
                stop_location: self.left_trigger_stop.to_primitive(),
            },
            right_trigger: Trigger {
                value: self.right_trigger,
                stop_location: self.right_trigger_stop.to_primitive(),
            },
            dpad_direction: self.dpad,
            button_pad: ButtonPad {
                triangle: self.triangle,
                circle: self.circle,
                cross: self.cross,
                square: self.square,
            },
            buttons: Buttons {
                l1: self.l1,
                r1: self.r1,
                l2: self.l2,
                r2: self.r2,
                create: self.create,
                menu: self.menu,
                l3: self.l3,
                r3: self.r3,
                home: self.home,
                touchpad: self.touchpad,
                mute: self.mute,
            },
            gyro: Gyro {
                pitch: self.gyro_pitch.to_primitive() as i32,
                yaw: self.gyro_yaw.to_primitive() as i32,
                roll: self.gyro_roll.to_primitive() as i32,
            },
            acceleration: Acceleration {
                x: self.accel_x.to_primitive() as i32,
                y: self.accel_y.to_primitive() as i32,
                z: self.accel_z.to_primitive() as i32,
            },
            temperature: self.temperature,
            touch_point_0: self.touch_data.points[0].to_touch_point(),
            touch_point_1: self.touch_data.points[1].to_touch_point(),
            battery: Battery {
                level: self.battery_level.to_primitive(),
                power_status,
            },
            audio: Audio {
                muted: self.muted,
                headphones_connected: self.headphones,
                microphone_connected: self.microphone,
            },
        }
    }
}

#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "64")]
pub struct UsbPackedInputDataReport {
    // byte 0, ignored by the decoder
    #[packed_field(bytes = "0")]
    pub report_id: u8,

    // byte 1-63
    #[packed_field(bytes = "1..=63")]
    pub state: InputState,
}

#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "64")]
pub struct LegacyUsbPackedInputDataReport {
    #[packed_field(bytes = "0")]
    pub report_id: u8,

    #[packed_field(bytes = "1..=63")]
    pub state: LegacyInputState,
}

/// Bluetooth framing: one extra header byte before the common payload and a
/// 13-byte trailer after it.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "78")]
pub struct BluetoothPackedInputDataReport {
    // byte 0, ignored by the decoder
    #[packed_field(bytes = "0")]
    pub report_id: u8,

    // byte 1
    #[packed_field(bits = "8..=11")]
    pub seq_number: Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(bits = "12..=13")]
    pub _unkn_0: Integer<u8, packed_bits::Bits<2>>,
    #[packed_field(bits = "14")]
    pub has_mic: bool,
    #[packed_field(bits = "15")]
    pub has_hid: bool,

    // byte 2-64
    #[packed_field(bytes = "2..=64")]
    pub state: InputState,

    // byte 65-77, unused
    #[packed_field(bytes = "65..=77")]
    pub trailer: [u8; 13],
}

#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "78")]
pub struct LegacyBluetoothPackedInputDataReport {
    #[packed_field(bytes = "0")]
    pub report_id: u8,

    #[packed_field(bits = "8..=11")]
    pub seq_number: Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(bits = "12..=13")]
    pub _unkn_0: Integer<u8, packed_bits::Bits<2>>,
    #[packed_field(bits = "14")]
    pub has_mic: bool,
    #[packed_field(bits = "15")]
    pub has_hid: bool,

    #[packed_field(bytes = "2..=64")]
    pub state: LegacyInputState,

    #[packed_field(bytes = "65..=77")]
    pub trailer: [u8; 13],
}

/// Input report decoded from either transport framing and either protocol
/// revision.
#[derive(Debug, Copy, Clone)]
pub enum PackedInputDataReport {
    Usb(UsbPackedInputDataReport),
    UsbLegacy(LegacyUsbPackedInputDataReport),
    Bluetooth(BluetoothPackedInputDataReport),
    BluetoothLegacy(LegacyBluetoothPackedInputDataReport),
}

impl PackedInputDataReport {
    /// Unpack a raw report buffer. The layout is selected by the transport
    /// tag and protocol revision; the buffer length must exactly match the
    /// transport's report size.
    pub fn unpack(
        buf: &[u8],
        connection_type: ConnectionType,
        version: ProtocolVersion,
    ) -> Result<Self, ReportError> {
        match connection_type {
            ConnectionType::Usb => {
                if buf.len() != INPUT_REPORT_USB_SIZE {
                    return Err(ReportError::InvalidSize {
                        expected: INPUT_REPORT_USB_SIZE,
                        got: buf.len(),
                    });
                }
                log::trace!("Got USB input report");
                match version {
                    ProtocolVersion::V2 => Ok(Self::Usb(
                        UsbPackedInputDataReport::unpack_from_slice(buf)?,
                    )),
                    ProtocolVersion::V1 => Ok(Self::UsbLegacy(
                        LegacyUsbPackedInputDataReport::unpack_from_slice(buf)?,
                    )),
                }
            }
            ConnectionType::Bluetooth => {
                if buf.len() != INPUT_REPORT_BT_SIZE {
                    return Err(ReportError::InvalidSize {
                        expected: INPUT_REPORT_BT_SIZE,
                        got: buf.len(),
                    });
                }
                log::trace!("Got Bluetooth input report");
                match version {
                    ProtocolVersion::V2 => Ok(Self::Bluetooth(
                        BluetoothPackedInputDataReport::unpack_from_slice(buf)?,
                    )),
                    ProtocolVersion::V1 => Ok(Self::BluetoothLegacy(
                        LegacyBluetoothPackedInputDataReport::unpack_from_slice(buf)?,
                    )),
                }
            }
        }
    }

    /// Build a fresh [`State`] snapshot from the decoded report.
    pub fn state(&self) -> State {
        match self {
            Self::Usb(report) => report.state.to_state(),
            Self::UsbLegacy(report) => report.state.to_state(),
            Self::Bluetooth(report) => report.state.to_state(),
            Self::BluetoothLegacy(report) => report.state.to_state(),
        }
    }
}

/// Fade animation applied when the LED color section is pushed.
#[derive(PrimitiveEnum_u8, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum LightFadeAnimation {
    #[default]
    Nothing = 0,
    FadeIn = 1,
    FadeOut = 2,
}

/// Section-gated output record. The device ignores the payload bytes of any
/// section whose enable bit is cleared, so an all-zero record is a legal
/// no-op write.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "47")]
pub struct SetStatePackedOutputData {
    // byte 0
    #[packed_field(bits = "0")]
    pub enable_audio_control_section: bool,
    #[packed_field(bits = "1")]
    pub enable_mic_volume_section: bool,
    #[packed_field(bits = "2")]
    pub enable_speaker_volume_section: bool,
    #[packed_field(bits = "3")]
    pub enable_headphone_volume_section: bool,
    #[packed_field(bits = "4")]
    pub enable_left_trigger_section: bool,
    #[packed_field(bits = "5")]
    pub enable_right_trigger_section: bool,
    #[packed_field(bits = "6")]
    pub use_haptics: bool,
    #[packed_field(bits = "7")]
    pub rumble_emulation: bool,

    // byte 1
    #[packed_field(bits = "8")]
    pub enable_additional_audio_section: bool,
    #[packed_field(bits = "9")]
    pub enable_motor_section: bool,
    #[packed_field(bits = "10")]
    pub enable_haptic_filter_section: bool,
    #[packed_field(bits = "11")]
    pub enable_player_indicators_section: bool,
    #[packed_field(bits = "12")]
    pub reset_lights: bool,
    #[packed_field(bits = "13")]
    pub enable_led_color_section: bool,
    #[packed_field(bits = "14")]
    pub enable_audio_mute_section: bool,
    #[packed_field(bits = "15")]
    pub enable_mute_light_section: bool,

    // byte 2-6, rumble and volume passthrough
    #[packed_field(bytes = "2")]
    pub rumble_right: u8,
    #[packed_field(bytes = "3")]
    pub rumble_left: u8,
    #[packed_field(bytes = "4")]
    pub volume_headphones: u8,
    #[packed_field(bytes = "5")]
    pub volume_speaker: u8,
    #[packed_field(bytes = "6")]
    pub volume_mic: u8,

    // byte 7
    #[packed_field(bits = "56..=57")]
    pub input_audio_path: Integer<u8, packed_bits::Bits<2>>,
    #[packed_field(bits = "58..=59")]
    pub output_audio_path: Integer<u8, packed_bits::Bits<2>>,
    #[packed_field(bits = "60")]
    pub noise_cancel: bool,
    #[packed_field(bits = "61")]
    pub echo_cancel: bool,
    #[packed_field(bits = "62..=63")]
    pub microphone_selection: Integer<u8, packed_bits::Bits<2>>,

    // byte 8
    #[packed_field(bytes = "8", ty = "enum")]
    pub mute_light_mode: MuteLightMode,

    // byte 9
    #[packed_field(bits = "72")]
    pub haptic_mute: bool,
    #[packed_field(bits = "73")]
    pub headphone_mute: bool,
    #[packed_field(bits = "74")]
    pub speaker_mute: bool,
    #[packed_field(bits = "75")]
    pub mic_mute: bool,
    #[packed_field(bits = "76")]
    pub audio_power_save: bool,
    #[packed_field(bits = "77")]
    pub haptic_power_save: bool,
    #[packed_field(bits = "78")]
    pub motion_power_save: bool,
    #[packed_field(bits = "79")]
    pub touchpad_power_save: bool,

    // byte 10-31, adaptive trigger passthrough
    #[packed_field(bytes = "10..=20")]
    pub right_trigger_ffb: [u8; 11],
    #[packed_field(bytes = "21..=31")]
    pub left_trigger_ffb: [u8; 11],

    // byte 32-35, mirrored back in input reports
    #[packed_field(bytes = "32..=35", endian = "lsb")]
    pub host_timestamp: Integer<u32, packed_bits::Bits<32>>,

    // byte 36
    #[packed_field(bits = "288..=291")]
    pub rumble_power_reduction: Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(bits = "292..=295")]
    pub trigger_power_reduction: Integer<u8, packed_bits::Bits<4>>,

    // byte 37
    #[packed_field(bits = "296..=299")]
    pub _unkn_audio: Integer<u8, packed_bits::Bits<4>>,
    #[packed_field(bits = "300")]
    pub beamforming: bool,
    #[packed_field(bits = "301..=303")]
    pub speaker_pre_gain: Integer<u8, packed_bits::Bits<3>>,

    // byte 38
    #[packed_field(bits = "304..=309")]
    pub _unkn_0: Integer<u8, packed_bits::Bits<6>>,
    #[packed_field(bits = "310")]
    pub enable_color_light_fade_section: bool,
    #[packed_field(bits = "311")]
    pub enable_light_brightness_section: bool,

    // byte 39
    #[packed_field(bits = "312..=318")]
    pub _unkn_1: Integer<u8, packed_bits::Bits<7>>,
    #[packed_field(bits = "319")]
    pub haptic_low_pass_filter: bool,

    // byte 40
    #[packed_field(bytes = "40")]
    pub _unkn_2: u8,

    // byte 41-42
    #[packed_field(bytes = "41", ty = "enum")]
    pub light_fade_animation: LightFadeAnimation,
    #[packed_field(bytes = "42", ty = "enum")]
    pub light_brightness: PlayerIndicatorBrightness,

    // byte 43, bit n drives physical LED n+1
    #[packed_field(bits = "344..=345")]
    pub _unkn_player_led: Integer<u8, packed_bits::Bits<2>>,
    #[packed_field(bits = "346")]
    pub player_led_fade: bool,
    #[packed_field(bits = "347")]
    pub player_led_5: bool,
    #[packed_field(bits = "348")]
    pub player_led_4: bool,
    #[packed_field(bits = "349")]
    pub player_led_3: bool,
    #[packed_field(bits = "350")]
    pub player_led_2: bool,
    #[packed_field(bits = "351")]
    pub player_led_1: bool,

    // byte 44-46
    #[packed_field(bytes = "44")]
    pub led_red: u8,
    #[packed_field(bytes = "45")]
    pub led_green: u8,
    #[packed_field(bytes = "46")]
    pub led_blue: u8,
}

/// USB output framing: report ID plus the 47-byte section-gated record.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "48")]
pub struct UsbPackedOutputReport {
    // byte 0
    #[packed_field(bytes = "0")]
    pub report_id: u8,

    // byte 1-47
    #[packed_field(bytes = "1..=47")]
    pub state: SetStatePackedOutputData,
}

impl Default for UsbPackedOutputReport {
    fn default() -> Self {
        Self {
            report_id: crate::driver::OUTPUT_REPORT_USB,
            state: Default::default(),
        }
    }
}

/// Calibration feature report: seventeen little-endian signed bias/range
/// fields plus two reserved trailing bytes.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "37")]
pub struct CalibrationReport {
    // byte 0
    #[packed_field(bytes = "0")]
    pub report_id: u8,

    // byte 1-6
    #[packed_field(bytes = "1..=2", endian = "lsb")]
    pub gyro_pitch_bias: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "3..=4", endian = "lsb")]
    pub gyro_yaw_bias: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "5..=6", endian = "lsb")]
    pub gyro_roll_bias: Integer<i16, packed_bits::Bits<16>>,

    // byte 7-18
    #[packed_field(bytes = "7..=8", endian = "lsb")]
    pub gyro_pitch_plus: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "9..=10", endian = "lsb")]
    pub gyro_pitch_minus: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "11..=12", endian = "lsb")]
    pub gyro_yaw_plus: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "13..=14", endian = "lsb")]
    pub gyro_yaw_minus: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "15..=16", endian = "lsb")]
    pub gyro_roll_plus: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "17..=18", endian = "lsb")]
    pub gyro_roll_minus: Integer<i16, packed_bits::Bits<16>>,

    // byte 19-22
    #[packed_field(bytes = "19..=20", endian = "lsb")]
    pub gyro_speed_plus: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "21..=22", endian = "lsb")]
    pub gyro_speed_minus: Integer<i16, packed_bits::Bits<16>>,

    // byte 23-34
    #[packed_field(bytes = "23..=24", endian = "lsb")]
    pub accel_x_plus: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "25..=26", endian = "lsb")]
    pub accel_x_minus: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "27..=28", endian = "lsb")]
    pub accel_y_plus: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "29..=30", endian = "lsb")]
    pub accel_y_minus: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "31..=32", endian = "lsb")]
    pub accel_z_plus: Integer<i16, packed_bits::Bits<16>>,
    #[packed_field(bytes = "33..=34", endian = "lsb")]
    pub accel_z_minus: Integer<i16, packed_bits::Bits<16>>,

    // byte 35-36
    #[packed_field(bytes = "35..=36")]
    pub reserved: [u8; 2],
}

/// Pairing info feature report: two MAC addresses with a trailing checksum
/// computed over the preceding bytes.
#[derive(PackedStruct, Debug, Copy, Clone, PartialEq, Default)]
#[packed_struct(bit_numbering = "msb0", size_bytes = "20")]
pub struct PairingInfoReport {
    // byte 0
    #[packed_field(bytes = "0")]
    pub report_id: u8,

    // byte 1-6
    #[packed_field(bytes = "1..=6")]
    pub client_mac: [u8; 6],

    // byte 7-9
    #[packed_field(bytes = "7..=9")]
    pub reserved: [u8; 3],

    // byte 10-15
    #[packed_field(bytes = "10..=15")]
    pub host_mac: [u8; 6],

    // byte 16-19
    #[packed_field(bytes = "16..=19", endian = "lsb")]
    pub crc: Integer<u32, packed_bits::Bits<32>>,
}
