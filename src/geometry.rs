use core::fmt;

/// Panel orientation in 90° clockwise steps
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Rotation {
    #[default]
    Rotate0 = 0,
    Rotate90 = 1,
    Rotate180 = 2,
    Rotate270 = 3,
}

impl Rotation {
    /// Any integer maps onto one of the four orientations, modulo 4.
    pub fn from_index(r: u8) -> Self {
        use Rotation::*;
        match r % 4 {
            0 => Rotate0,
            1 => Rotate90,
            2 => Rotate180,
            _ => Rotate270,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Rotate90 | Rotation::Rotate270)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.index() as u16 * 90)
    }
}

/// Reported panel dimensions for the current rotation.
///
/// Rotation only swaps the reported width and height. Decoded touch
/// coordinates stay in the panel's native frame.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    default_width: u16,
    default_height: u16,
    width: u16,
    height: u16,
    rotation: Rotation,
}

impl Geometry {
    pub const fn new(width: u16, height: u16) -> Self {
        Geometry {
            default_width: width,
            default_height: height,
            width,
            height,
            rotation: Rotation::Rotate0,
        }
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        if rotation.swaps_axes() {
            self.width = self.default_height;
            self.height = self.default_width;
        } else {
            self.width = self.default_width;
            self.height = self.default_height;
        }
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn default_width(&self) -> u16 {
        self.default_width
    }

    pub fn default_height(&self) -> u16 {
        self.default_height
    }
}
