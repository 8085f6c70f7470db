use core::fmt;

/// Whether a touch slot currently tracks a finger
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i16)]
pub enum TouchState {
    #[default]
    Inactive = 0,
    Active = 1,
}

impl TouchState {
    pub fn is_active(self) -> bool {
        self == TouchState::Active
    }
}

/// One finger's coordinates as reported by a touch slot.
///
/// `touch_id` is the 1-based slot identity and is fixed when the slot array is
/// built. Equality compares `x`, `y`, `z` and `touch_id` only; the state is
/// ignored.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchPoint {
    x: i16,
    y: i16,
    z: i16,
    touch_id: u8,
    state: TouchState,
}

impl TouchPoint {
    /// A point with explicit coordinates. The state always starts out inactive.
    pub const fn new(x: i16, y: i16, z: i16, touch_id: u8) -> Self {
        TouchPoint {
            x,
            y,
            z,
            touch_id,
            state: TouchState::Inactive,
        }
    }

    pub fn x(&self) -> i16 {
        self.x
    }

    pub fn y(&self) -> i16 {
        self.y
    }

    /// Touch weight, a proxy for pressure
    pub fn z(&self) -> i16 {
        self.z
    }

    pub fn touch_id(&self) -> u8 {
        self.touch_id
    }

    pub fn state(&self) -> TouchState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub(crate) fn update(&mut self, x: i16, y: i16, z: i16, state: TouchState) {
        self.x = x;
        self.y = y;
        self.z = z;
        self.state = state;
    }
}

impl PartialEq for TouchPoint {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z && self.touch_id == other.touch_id
    }
}

impl Eq for TouchPoint {}

impl fmt::Display for TouchPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {}, {} : {} : {:?}",
            self.touch_id, self.x, self.y, self.z, self.state
        )
    }
}
