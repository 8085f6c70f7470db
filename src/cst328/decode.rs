//! Touch frame layout and decoding
//!
//! The frame read from `0xD000` holds five 5-byte finger records. Bytes 5 and
//! 6 (`0xD005`, `0xD006`) sit between finger 1 and finger 2 and carry no
//! finger data; the remaining records are contiguous.

use crate::point::{TouchPoint, TouchState};

pub const MAX_TOUCH_POINTS: usize = 5;

/// Size of one bulk touch frame read
pub const TOUCH_DATA_LEN: usize = 27;

pub const RECORD_LEN: usize = 5;

/// Start of each finger record within the frame
pub const RECORD_OFFSETS: [usize; MAX_TOUCH_POINTS] = [0, 7, 12, 17, 22];

/// Event code in the low nibble of a record's first byte meaning "finger down"
const EVENT_PRESSED: u8 = 0x06;

/// Fields of one finger record
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Record {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    pub state: TouchState,
}

impl Record {
    /// The high nibble of byte 0 (the controller's finger id) is not checked.
    pub fn from_bytes(bytes: &[u8; RECORD_LEN]) -> Self {
        let state = if bytes[0] & 0x0F == EVENT_PRESSED {
            TouchState::Active
        } else {
            TouchState::Inactive
        };
        let x = ((bytes[1] as i16) << 4) | ((bytes[3] >> 4) & 0x0F) as i16;
        let y = ((bytes[2] as i16) << 4) | (bytes[3] & 0x0F) as i16;
        Record {
            x,
            y,
            z: bytes[4] as i16,
            state,
        }
    }

    pub fn apply(self, point: &mut TouchPoint) {
        point.update(self.x, self.y, self.z, self.state);
    }
}

pub fn record_at(frame: &[u8; TOUCH_DATA_LEN], slot: usize) -> Option<&[u8; RECORD_LEN]> {
    let offset = *RECORD_OFFSETS.get(slot)?;
    frame[offset..offset + RECORD_LEN].try_into().ok()
}

/// Overwrite every slot from `frame`, active or not.
pub fn decode_frame(frame: &[u8; TOUCH_DATA_LEN], points: &mut [TouchPoint; MAX_TOUCH_POINTS]) {
    for (slot, point) in points.iter_mut().enumerate() {
        if let Some(bytes) = record_at(frame, slot) {
            Record::from_bytes(bytes).apply(point);
        }
    }
}

pub fn count_active(points: &[TouchPoint]) -> u8 {
    points.iter().filter(|p| p.is_active()).count() as u8
}
