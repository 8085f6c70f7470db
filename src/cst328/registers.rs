//! CST328 register map

/// Value of the top two bytes of [`Register::FirmwareChecksum`] on a genuine CST328
pub const FIRMWARE_MARKER: u16 = 0xCACA;

/// Identification attempts made by `init` before giving up
pub const PROBE_ATTEMPTS: u8 = 3;

/// Reset pulse timings, datasheet-derived
pub const RESET_PULSE_MS: u32 = 10;
pub const RESET_BOOT_MS: u32 = 100;

/// Pause between failed identification attempts
pub const PROBE_RETRY_MS: u32 = 10;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum Register {
    /// Start of the 27-byte touch frame (0xD000..=0xD01A)
    TouchData = 0xD000,
    /// Command: expose the information registers
    DebugInfoMode = 0xD101,
    /// Command: back to touch reporting
    NormalMode = 0xD109,
    /// 32-bit firmware checksum, readable in debug-info mode only
    FirmwareChecksum = 0xD1FC,
}

impl Register {
    pub fn addr(self) -> u16 {
        self as u16
    }
}

impl From<Register> for u16 {
    fn from(reg: Register) -> Self {
        reg.addr()
    }
}
