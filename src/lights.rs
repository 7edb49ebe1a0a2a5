//! Desired LED/light state and the output report composer.
//!
//! A [`Lights`] value holds what the caller wants the controller's lights to
//! look like. Setters raise a dirty flag when they actually change a value;
//! [`Lights::compose`] turns the configuration into the section-gated output
//! record, enabling sections only when there is something to push. The
//! session clears the dirty flag after a successful write.

use packed_struct::prelude::*;

use crate::hid_report::SetStatePackedOutputData;

/// Mute button LED mode.
#[derive(PrimitiveEnum_u8, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum MuteLightMode {
    #[default]
    Off = 0,
    On = 1,
    Breathing = 2,
}

/// Player number shown on the indicator LEDs below the touchpad.
#[derive(PrimitiveEnum_u8, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PlayerIndicator {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    #[default]
    Disabled = 5,
}

impl PlayerIndicator {
    /// LED bitmask driving the five indicator LEDs; bit n lights physical
    /// LED n+1.
    pub fn led_bitmask(&self) -> u8 {
        match self {
            Self::One => 0b00100,
            Self::Two => 0b01010,
            Self::Three => 0b10101,
            Self::Four => 0b01110,
            Self::Five => 0b11111,
            Self::Disabled => 0b00000,
        }
    }
}

/// Brightness level of the player indicator LEDs.
#[derive(PrimitiveEnum_u8, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum PlayerIndicatorBrightness {
    #[default]
    Max = 0,
    Medium = 1,
    Low = 2,
}

/// Desired light configuration for one gamepad session.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lights {
    mute_light_mode: MuteLightMode,
    player_indicator: PlayerIndicator,
    player_indicator_brightness: PlayerIndicatorBrightness,
    touchpad_light_red: u8,
    touchpad_light_green: u8,
    touchpad_light_blue: u8,
    changed: bool,
}

impl Lights {
    /// Set the mute button LED mode.
    pub fn set_mute_light_mode(&mut self, mode: MuteLightMode) {
        if self.mute_light_mode != mode {
            self.mute_light_mode = mode;
            self.changed = true;
        }
    }

    /// Set which player number the indicator LEDs display.
    pub fn set_player_indicator(&mut self, indicator: PlayerIndicator) {
        if self.player_indicator != indicator {
            self.player_indicator = indicator;
            self.changed = true;
        }
    }

    /// Set the brightness of the player indicator LEDs.
    pub fn set_player_indicator_brightness(&mut self, brightness: PlayerIndicatorBrightness) {
        if self.player_indicator_brightness != brightness {
            self.player_indicator_brightness = brightness;
            self.changed = true;
        }
    }

    /// Set the touchpad backlight color.
    pub fn set_touchpad_light_color(&mut self, red: u8, green: u8, blue: u8) {
        if (self.touchpad_light_red, self.touchpad_light_green, self.touchpad_light_blue)
            != (red, green, blue)
        {
            self.touchpad_light_red = red;
            self.touchpad_light_green = green;
            self.touchpad_light_blue = blue;
            self.changed = true;
        }
    }

    /// True when the configuration differs from what was last pushed.
    pub fn changed(&self) -> bool {
        self.changed
    }

    pub(crate) fn clear_changed(&mut self) {
        self.changed = false;
    }

    /// Serialize the configuration into an output record. Sections are
    /// enabled only when `full_update` is set or the configuration changed
    /// since the last push; otherwise the record is a no-op with every
    /// enable bit cleared.
    pub fn compose(&self, full_update: bool) -> SetStatePackedOutputData {
        let mut data = SetStatePackedOutputData::default();
        if !full_update && !self.changed {
            return data;
        }

        data.enable_mute_light_section = true;
        data.mute_light_mode = self.mute_light_mode;

        data.enable_player_indicators_section = true;
        let mask = self.player_indicator.led_bitmask();
        data.player_led_1 = mask & 0b00001 != 0;
        data.player_led_2 = mask & 0b00010 != 0;
        data.player_led_3 = mask & 0b00100 != 0;
        data.player_led_4 = mask & 0b01000 != 0;
        data.player_led_5 = mask & 0b10000 != 0;

        data.enable_light_brightness_section = true;
        data.light_brightness = self.player_indicator_brightness;

        data.enable_color_light_fade_section = true;
        data.enable_led_color_section = true;
        data.led_red = self.touchpad_light_red;
        data.led_green = self.touchpad_light_green;
        data.led_blue = self.touchpad_light_blue;

        data
    }

    /// Output record asserting ownership of the light hardware: only the
    /// reset bit is set, every section stays disabled. Pushed once per
    /// session before the first differential update.
    pub fn compose_take_control() -> SetStatePackedOutputData {
        SetStatePackedOutputData {
            reset_lights: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packed_struct::PackedStruct;

    #[test]
    fn led_bitmask_table() {
        assert_eq!(PlayerIndicator::One.led_bitmask(), 0b00100);
        assert_eq!(PlayerIndicator::Two.led_bitmask(), 0b01010);
        assert_eq!(PlayerIndicator::Three.led_bitmask(), 0b10101);
        assert_eq!(PlayerIndicator::Four.led_bitmask(), 0b01110);
        assert_eq!(PlayerIndicator::Five.led_bitmask(), 0b11111);
        assert_eq!(PlayerIndicator::Disabled.led_bitmask(), 0b00000);
    }

    #[test]
    fn compose_without_changes_is_noop() {
        let lights = Lights::default();
        let data = lights.compose(false);
        assert!(!data.enable_mute_light_section);
        assert!(!data.enable_led_color_section);
        assert!(!data.enable_player_indicators_section);
        assert!(!data.enable_light_brightness_section);
        assert!(!data.enable_color_light_fade_section);
        assert_eq!(data.pack().unwrap(), [0u8; 47]);
    }

    #[test]
    fn compose_full_update_enables_sections() {
        let lights = Lights::default();
        let data = lights.compose(true);
        assert!(data.enable_mute_light_section);
        assert!(data.enable_led_color_section);
        assert!(data.enable_player_indicators_section);
        assert!(data.enable_light_brightness_section);
        assert!(data.enable_color_light_fade_section);
        assert!(!data.reset_lights);
    }

    #[test]
    fn setters_track_changes() {
        let mut lights = Lights::default();
        assert!(!lights.changed());

        // Writing the current value back is not a change
        lights.set_mute_light_mode(MuteLightMode::Off);
        assert!(!lights.changed());

        lights.set_mute_light_mode(MuteLightMode::Breathing);
        assert!(lights.changed());

        lights.clear_changed();
        lights.set_touchpad_light_color(0, 0, 0);
        assert!(!lights.changed());
        lights.set_touchpad_light_color(255, 128, 0);
        assert!(lights.changed());
    }

    #[test]
    fn composed_record_bytes() {
        let mut lights = Lights::default();
        lights.set_player_indicator(PlayerIndicator::Three);
        lights.set_player_indicator_brightness(PlayerIndicatorBrightness::Low);
        lights.set_mute_light_mode(MuteLightMode::On);
        lights.set_touchpad_light_color(10, 20, 30);

        let buf = lights.compose(false).pack().unwrap();
        // mute light mode
        assert_eq!(buf[8], 1);
        // brightness
        assert_eq!(buf[42], 2);
        // player LEDs 1, 3 and 5
        assert_eq!(buf[43], 0b10101);
        // touchpad RGB
        assert_eq!(&buf[44..47], &[10, 20, 30]);
    }

    #[test]
    fn take_control_sets_only_reset_bit() {
        let buf = Lights::compose_take_control().pack().unwrap();
        // reset bit lives in the second enable byte
        assert_eq!(buf[1], 0b0000_1000);
        assert!(buf[2..].iter().all(|b| *b == 0));
        assert_eq!(buf[0], 0);
    }
}
