//! Userspace driver for the Sony DualSense controller.
//!
//! Talks to the controller over hidraw via [`hidapi`], decodes the packed
//! USB and Bluetooth input reports into plain [`state::State`] snapshots,
//! applies the factory motion calibration, and composes the output reports
//! that drive the controller's lights.
//!
//! ```no_run
//! use dualsense_hid::{enumerate, Gamepad};
//!
//! # fn main() -> Result<(), dualsense_hid::driver::DriverError> {
//! let devices = enumerate()?;
//! let mut gamepad = Gamepad::new(&devices[0])?;
//! let state = gamepad.poll(true)?;
//! println!("left stick at ({}, {})", state.left_pad.x, state.left_pad.y);
//! # Ok(())
//! # }
//! ```

pub mod calibration;
pub mod crc32;
pub mod driver;
pub mod hid_report;
#[cfg(test)]
mod hid_report_test;
pub mod lights;
pub mod state;

pub use driver::{enumerate, ConnectionType, DeviceInfo, Gamepad, ProtocolVersion};
pub use state::State;
