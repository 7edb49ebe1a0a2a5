//! Gamepad session: device constants, enumeration, and the polling/push
//! orchestration around the packed report layer.

use std::ffi::CString;

use hidapi::{HidApi, HidDevice};
use packed_struct::prelude::*;
use thiserror::Error;

use crate::calibration::{Calibration, CalibrationError};
use crate::crc32::crc32;
use crate::hid_report::{
    CalibrationReport, PackedInputDataReport, PairingInfoReport, ReportError,
    SetStatePackedOutputData, UsbPackedOutputReport,
};
use crate::lights::Lights;
use crate::state::State;

pub const VID: u16 = 0x054c;
pub const PID: u16 = 0x0ce6;

pub const INPUT_REPORT_USB: u8 = 0x01;
pub const INPUT_REPORT_USB_SIZE: usize = 64;
pub const INPUT_REPORT_BT: u8 = 0x31;
pub const INPUT_REPORT_BT_SIZE: usize = 78;
pub const OUTPUT_REPORT_USB: u8 = 0x02;
pub const OUTPUT_REPORT_USB_SIZE: usize = 48;
pub const FEATURE_REPORT_CALIBRATION: u8 = 0x05;
pub const FEATURE_REPORT_CALIBRATION_SIZE: usize = 37;
pub const FEATURE_REPORT_PAIRING_INFO: u8 = 0x09;
pub const FEATURE_REPORT_PAIRING_INFO_SIZE: usize = 20;

pub const TOUCHPAD_WIDTH: u16 = 1920;
pub const TOUCHPAD_HEIGHT: u16 = 1080;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("hidapi error: {0}")]
    Hid(#[from] hidapi::HidError),

    #[error("invalid device path: {0}")]
    InvalidPath(#[from] std::ffi::NulError),

    #[error("device {vid:04x}:{pid:04x} is not a DualSense controller")]
    NotADualSense { vid: u16, pid: u16 },

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error("pairing report checksum mismatch")]
    ChecksumMismatch,
}

/// Transport the session communicates over. Affects the input report size
/// and payload offset.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConnectionType {
    Usb,
    Bluetooth,
}

/// Input report layout revision. Firmware revisions disagree on the
/// face-button/d-pad nibble order and the battery byte encoding; the
/// revision is chosen explicitly at session construction, never guessed
/// from the data. [`ProtocolVersion::V2`] matches current hardware.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ProtocolVersion {
    V1,
    #[default]
    V2,
}

/// Metadata for one enumerated controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub path: String,
    pub serial: String,
    pub manufacturer: String,
    pub product: String,
    pub connection_type: ConnectionType,
}

/// Enumerate connected DualSense controllers.
///
/// Bluetooth-connected controllers report a zero release number, which is
/// how the transport is told apart before opening the device.
pub fn enumerate() -> Result<Vec<DeviceInfo>, DriverError> {
    let api = HidApi::new()?;
    let devices = api
        .device_list()
        .filter(|info| info.vendor_id() == VID && info.product_id() == PID)
        .map(|info| DeviceInfo {
            path: info.path().to_string_lossy().into_owned(),
            serial: info.serial_number().unwrap_or_default().to_string(),
            manufacturer: info.manufacturer_string().unwrap_or_default().to_string(),
            product: info.product_string().unwrap_or_default().to_string(),
            connection_type: if info.release_number() == 0 {
                ConnectionType::Bluetooth
            } else {
                ConnectionType::Usb
            },
        })
        .collect();
    Ok(devices)
}

/// MAC addresses read from the pairing info feature report.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PairingInfo {
    pub client_mac: [u8; 6],
    pub host_mac: [u8; 6],
}

/// Session handle for one DualSense controller.
pub struct Gamepad {
    device: HidDevice,
    connection_type: ConnectionType,
    protocol_version: ProtocolVersion,
    calibration: Option<Calibration>,
    lights: Lights,
    lights_reset: bool,
}

impl Gamepad {
    /// Open a session for the given device using the current protocol
    /// revision.
    pub fn new(device_info: &DeviceInfo) -> Result<Self, DriverError> {
        Self::with_protocol_version(device_info, ProtocolVersion::default())
    }

    /// Open a session decoding input reports with an explicit protocol
    /// revision.
    pub fn with_protocol_version(
        device_info: &DeviceInfo,
        protocol_version: ProtocolVersion,
    ) -> Result<Self, DriverError> {
        let c_path = CString::new(device_info.path.clone())?;
        let api = HidApi::new()?;
        let device = api.open_path(&c_path)?;
        let info = device.get_device_info()?;
        let (vid, pid) = (info.vendor_id(), info.product_id());
        if vid != VID || pid != PID {
            return Err(DriverError::NotADualSense { vid, pid });
        }

        Ok(Self {
            device,
            connection_type: device_info.connection_type,
            protocol_version,
            calibration: None,
            lights: Lights::default(),
            lights_reset: false,
        })
    }

    pub fn connection_type(&self) -> ConnectionType {
        self.connection_type
    }

    /// Read and decode one input report. With `use_calibration` the motion
    /// readings are corrected using the cached calibration data, fetching
    /// it from the device on first use.
    pub fn poll(&mut self, use_calibration: bool) -> Result<State, DriverError> {
        let mut buf = [0; INPUT_REPORT_BT_SIZE];
        let bytes_read = self.device.read(&mut buf[..])?;

        let report = PackedInputDataReport::unpack(
            &buf[..bytes_read],
            self.connection_type,
            self.protocol_version,
        )?;
        let mut state = report.state();

        if use_calibration {
            let calibration = self.get_calibration_data()?;
            calibration.apply(&mut state);
        }

        Ok(state)
    }

    /// The calibration data for this controller, fetched and decoded on
    /// first call, cached afterwards. A failed fetch leaves the cache
    /// empty.
    pub fn get_calibration_data(&mut self) -> Result<Calibration, DriverError> {
        if let Some(calibration) = self.calibration {
            return Ok(calibration);
        }
        let calibration = self.fetch_calibration()?;
        log::debug!("Loaded motion calibration data");
        self.calibration = Some(calibration);
        Ok(calibration)
    }

    fn fetch_calibration(&self) -> Result<Calibration, DriverError> {
        let mut buf = [0u8; FEATURE_REPORT_CALIBRATION_SIZE];
        buf[0] = FEATURE_REPORT_CALIBRATION;
        let bytes_read = self.device.get_feature_report(&mut buf)?;
        if bytes_read != FEATURE_REPORT_CALIBRATION_SIZE {
            return Err(ReportError::InvalidSize {
                expected: FEATURE_REPORT_CALIBRATION_SIZE,
                got: bytes_read,
            }
            .into());
        }

        let report = CalibrationReport::unpack(&buf).map_err(ReportError::from)?;
        if report.report_id != FEATURE_REPORT_CALIBRATION {
            return Err(ReportError::InvalidReportId(report.report_id).into());
        }

        Ok(Calibration::from_report(&report)?)
    }

    /// Read the pairing info feature report and validate its trailing
    /// checksum.
    pub fn read_pairing_info(&self) -> Result<PairingInfo, DriverError> {
        let mut buf = [0u8; FEATURE_REPORT_PAIRING_INFO_SIZE];
        buf[0] = FEATURE_REPORT_PAIRING_INFO;
        let bytes_read = self.device.get_feature_report(&mut buf)?;
        if bytes_read != FEATURE_REPORT_PAIRING_INFO_SIZE {
            return Err(ReportError::InvalidSize {
                expected: FEATURE_REPORT_PAIRING_INFO_SIZE,
                got: bytes_read,
            }
            .into());
        }

        let report = PairingInfoReport::unpack(&buf).map_err(ReportError::from)?;
        if crc32(&buf[..FEATURE_REPORT_PAIRING_INFO_SIZE - 4]) != report.crc.to_primitive() {
            return Err(DriverError::ChecksumMismatch);
        }

        Ok(PairingInfo {
            client_mac: report.client_mac,
            host_mac: report.host_mac,
        })
    }

    /// Desired light configuration. Mutate through the setters, then call
    /// [`Gamepad::push_state`] to apply.
    pub fn lights(&self) -> &Lights {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut Lights {
        &mut self.lights
    }

    /// Push the light configuration to the device. With `full_update` every
    /// light section is written; otherwise sections are written only when
    /// the configuration changed since the last push. Only the USB framing
    /// is supported for output; over Bluetooth this is a silent no-op.
    pub fn push_state(&mut self, full_update: bool) -> Result<(), DriverError> {
        if self.connection_type == ConnectionType::Bluetooth {
            log::trace!("Skipping state push on Bluetooth transport");
            return Ok(());
        }

        if !self.lights_reset {
            self.take_lights_control()?;
        }

        let applied = full_update || self.lights.changed();
        let data = self.lights.compose(full_update);
        self.write(data)?;
        if applied {
            self.lights.clear_changed();
        }

        Ok(())
    }

    /// Release the lights from firmware control so subsequent pushes take
    /// effect. Issued at most once per session; repeat calls are no-ops.
    pub fn take_lights_control(&mut self) -> Result<(), DriverError> {
        if self.lights_reset {
            return Ok(());
        }
        log::debug!("Taking control of light hardware");
        self.write(Lights::compose_take_control())?;
        self.lights_reset = true;
        Ok(())
    }

    fn write(&self, state: SetStatePackedOutputData) -> Result<(), DriverError> {
        let report = UsbPackedOutputReport {
            state,
            ..Default::default()
        };
        let buf = report.pack().map_err(ReportError::from)?;
        let _bytes_written = self.device.write(&buf)?;
        Ok(())
    }
}
