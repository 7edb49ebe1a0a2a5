//! Decoded gamepad snapshot types.
//!
//! A [`State`] is a plain value built fresh from every input report. The raw
//! packed layouts live in [`crate::hid_report`]; motion axes are widened to
//! `i32` so that calibrated readings fit alongside raw sensor counts.

use crate::hid_report::{Direction, PowerStatus};

/// Position of one analog stick.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct AnalogPad {
    pub x: u8,
    pub y: u8,
}

/// One adaptive trigger reading.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Trigger {
    /// How far the trigger is pulled.
    pub value: u8,
    /// Feedback stop location reported by the trigger, 0-9.
    pub stop_location: u8,
}

/// The four face buttons.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ButtonPad {
    pub triangle: bool,
    pub circle: bool,
    pub cross: bool,
    pub square: bool,
}

/// Every button outside the face pad and d-pad.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Buttons {
    pub l1: bool,
    pub r1: bool,
    pub l2: bool,
    pub r2: bool,
    pub create: bool,
    pub menu: bool,
    pub l3: bool,
    pub r3: bool,
    pub home: bool,
    pub touchpad: bool,
    pub mute: bool,
}

/// Angular velocity sample. Raw sensor counts, or calibrated values once the
/// calibration transform has been applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Gyro {
    pub pitch: i32,
    pub yaw: i32,
    pub roll: i32,
}

/// Linear acceleration sample, same raw/calibrated convention as [`Gyro`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Acceleration {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// One touchpad contact. Origin is the top-left corner of the touchpad;
/// X spans [0, 1920) and Y spans [0, 1080).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TouchPoint {
    pub active: bool,
    pub x: u16,
    pub y: u16,
    /// Rolling 7-bit identifier, incremented for every new contact.
    pub id: u8,
}

/// Battery level and power status.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Battery {
    /// Charge level, 4-bit.
    pub level: u8,
    pub power_status: PowerStatus,
}

/// Audio peripheral flags.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Audio {
    /// Internal microphone muted. Independent of the mute LED state.
    pub muted: bool,
    pub headphones_connected: bool,
    pub microphone_connected: bool,
}

/// Full gamepad snapshot decoded from one input report.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct State {
    pub left_pad: AnalogPad,
    pub right_pad: AnalogPad,
    pub left_trigger: Trigger,
    pub right_trigger: Trigger,
    pub dpad_direction: Direction,
    pub button_pad: ButtonPad,
    pub buttons: Buttons,
    pub gyro: Gyro,
    pub acceleration: Acceleration,
    pub temperature: u8,
    pub touch_point_0: TouchPoint,
    pub touch_point_1: TouchPoint,
    pub battery: Battery,
    pub audio: Audio,
}
