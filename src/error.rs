use core::fmt;

/// Error type for the CST328 driver
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The underlying register bus failed.
    Bus(E),
    /// The identification probe never saw the firmware marker.
    DeviceNotFound,
    /// A diagnostic register read transferred fewer bytes than requested.
    ShortRead { expected: usize, received: usize },
    /// A touch slot index outside `0..MAX_TOUCH_POINTS`.
    OutOfRange { index: usize },
    /// The reset pin could not be driven.
    Pin,
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::Bus(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "Bus error: {:?}", e),
            Error::DeviceNotFound => write!(f, "CST328 not found on the bus"),
            Error::ShortRead { expected, received } => {
                write!(f, "Short read: {} of {} bytes", received, expected)
            }
            Error::OutOfRange { index } => write!(f, "Touch slot {} out of range", index),
            Error::Pin => write!(f, "Pin error"),
        }
    }
}
