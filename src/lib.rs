//! Driver for the Hynitron CST328 five-point capacitive touch controller.
//!
//! ```ignore
//! let mut touch = Cst328::new(I2cBus::new(i2c), 240, 320);
//! touch.init_with_reset(&mut reset_pin, &mut delay)?;
//! for point in touch.poll() {
//!     info!("finger {} at {}, {}", point.touch_id(), point.x(), point.y());
//! }
//! ```
#![no_std]

// This must go first so the logging macros are visible to the other modules.
#[macro_use]
mod fmt;

mod bus;
mod cst328;
mod error;
mod extensions;
mod geometry;
mod point;

pub use bus::{I2cBus, RegisterBus, DEFAULT_ADDRESS};
pub use cst328::{
    Cst328, ReadStatus, Register, Touches, FIRMWARE_MARKER, MAX_TOUCH_POINTS, PROBE_ATTEMPTS,
    PROBE_RETRY_MS, RECORD_LEN, RECORD_OFFSETS, RESET_BOOT_MS, RESET_PULSE_MS, TOUCH_DATA_LEN,
};
pub use error::Error;
pub use geometry::{Geometry, Rotation};
pub use point::{TouchPoint, TouchState};
