//! Motion sensor calibration.
//!
//! The controller reports factory calibration through a feature report: bias
//! and plus/minus range fields for every gyro and accelerometer axis. From
//! those we derive a per-axis fixed-point correction (offset, scale numerator
//! and denominator) and apply it to raw sensor counts.

use packed_struct::types::SizedInteger;
use thiserror::Error;

use crate::hid_report::{CalibrationReport, ReportError};
use crate::state::State;

/// Gyroscope reading resolution, counts per degree/s.
pub const GYROSCOPE_RESOLUTION: i32 = 1024;
/// Accelerometer reading resolution, counts per g.
pub const ACCELEROMETER_RESOLUTION: i32 = 8192;

#[derive(Error, Debug)]
pub enum CalibrationError {
    /// A plus/minus range collapsed to zero, so the axis scale is undefined.
    /// Callers should fall back to raw sensor counts.
    #[error("calibration report has a zero range for the {0} axis")]
    ZeroRange(&'static str),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Fixed-point correction parameters for a single motion axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AxisCalibration {
    pub offset: i32,
    pub numerator: i32,
    pub denominator: i32,
}

impl AxisCalibration {
    /// Scale a raw sensor count. The whole and fractional contributions are
    /// computed separately with truncating division so the intermediate
    /// products stay within a 32-bit accumulator; a naive
    /// `(value * numerator) / denominator` would overflow for mid-range
    /// inputs.
    pub fn apply(&self, raw: i32) -> i32 {
        let shifted = raw - self.offset;
        (shifted / self.denominator) * self.numerator
            + ((shifted % self.denominator) * self.numerator) / self.denominator
    }
}

/// Per-axis calibration derived from the device's calibration feature
/// report. Decoded once per session and cached.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Calibration {
    pub gyro_pitch: AxisCalibration,
    pub gyro_yaw: AxisCalibration,
    pub gyro_roll: AxisCalibration,
    pub accel_x: AxisCalibration,
    pub accel_y: AxisCalibration,
    pub accel_z: AxisCalibration,
}

impl Calibration {
    /// Derive the per-axis corrections from a decoded calibration report.
    ///
    /// Fails without partial state if any derived denominator is zero.
    pub fn from_report(report: &CalibrationReport) -> Result<Self, CalibrationError> {
        let speed_plus = i32::from(report.gyro_speed_plus.to_primitive());
        let speed_minus = i32::from(report.gyro_speed_minus.to_primitive());
        let gyro_numerator = (speed_plus + speed_minus) * GYROSCOPE_RESOLUTION;

        let gyro_axis = |name: &'static str,
                         bias: i16,
                         plus: i16,
                         minus: i16|
         -> Result<AxisCalibration, CalibrationError> {
            let denominator = i32::from(plus) - i32::from(minus);
            if denominator == 0 {
                return Err(CalibrationError::ZeroRange(name));
            }
            Ok(AxisCalibration {
                offset: i32::from(bias),
                numerator: gyro_numerator,
                denominator,
            })
        };

        let accel_axis = |name: &'static str,
                          plus: i16,
                          minus: i16|
         -> Result<AxisCalibration, CalibrationError> {
            let range = i32::from(plus) - i32::from(minus);
            if range == 0 {
                return Err(CalibrationError::ZeroRange(name));
            }
            Ok(AxisCalibration {
                offset: i32::from(plus) - range / 2,
                numerator: 2 * ACCELEROMETER_RESOLUTION,
                denominator: range,
            })
        };

        Ok(Self {
            gyro_pitch: gyro_axis(
                "gyro pitch",
                report.gyro_pitch_bias.to_primitive(),
                report.gyro_pitch_plus.to_primitive(),
                report.gyro_pitch_minus.to_primitive(),
            )?,
            gyro_yaw: gyro_axis(
                "gyro yaw",
                report.gyro_yaw_bias.to_primitive(),
                report.gyro_yaw_plus.to_primitive(),
                report.gyro_yaw_minus.to_primitive(),
            )?,
            gyro_roll: gyro_axis(
                "gyro roll",
                report.gyro_roll_bias.to_primitive(),
                report.gyro_roll_plus.to_primitive(),
                report.gyro_roll_minus.to_primitive(),
            )?,
            accel_x: accel_axis(
                "accel x",
                report.accel_x_plus.to_primitive(),
                report.accel_x_minus.to_primitive(),
            )?,
            accel_y: accel_axis(
                "accel y",
                report.accel_y_plus.to_primitive(),
                report.accel_y_minus.to_primitive(),
            )?,
            accel_z: accel_axis(
                "accel z",
                report.accel_z_plus.to_primitive(),
                report.accel_z_minus.to_primitive(),
            )?,
        })
    }

    /// Replace the raw motion readings of a snapshot with calibrated values.
    pub fn apply(&self, state: &mut State) {
        state.gyro.pitch = self.gyro_pitch.apply(state.gyro.pitch);
        state.gyro.yaw = self.gyro_yaw.apply(state.gyro.yaw);
        state.gyro.roll = self.gyro_roll.apply(state.gyro.roll);
        state.acceleration.x = self.accel_x.apply(state.acceleration.x);
        state.acceleration.y = self.accel_y.apply(state.acceleration.y);
        state.acceleration.z = self.accel_z.apply(state.acceleration.z);
    }
}
