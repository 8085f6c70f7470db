//! Register-addressed transport used by the driver

use core::fmt::Debug;

use embedded_hal::i2c::{I2c, Operation};

/// CST328 I2C slave address
pub const DEFAULT_ADDRESS: u8 = 0x1A;

/// A bus that reads and writes 16-bit addressed registers.
///
/// Register addresses go out high byte first.
pub trait RegisterBus {
    type Error: Debug;

    /// Write the register address followed by `payload` (possibly empty).
    fn write(&mut self, reg: u16, payload: &[u8]) -> Result<(), Self::Error>;

    /// Read from `reg` into `buf`, returning how many bytes were transferred.
    fn read(&mut self, reg: u16, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    type Error = T::Error;

    fn write(&mut self, reg: u16, payload: &[u8]) -> Result<(), Self::Error> {
        (**self).write(reg, payload)
    }

    fn read(&mut self, reg: u16, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read(reg, buf)
    }
}

/// [`RegisterBus`] over an `embedded-hal` I2C bus
pub struct I2cBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        I2cBus { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> RegisterBus for I2cBus<I2C> {
    type Error = I2C::Error;

    fn write(&mut self, reg: u16, payload: &[u8]) -> Result<(), Self::Error> {
        let addr = reg.to_be_bytes();
        // Adjacent writes are merged into one transfer, no repeated start in between.
        self.i2c.transaction(
            self.address,
            &mut [Operation::Write(&addr), Operation::Write(payload)],
        )
    }

    fn read(&mut self, reg: u16, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.i2c.write_read(self.address, &reg.to_be_bytes(), buf)?;
        Ok(buf.len())
    }
}
