//! Hynitron CST328 touch panel driver

mod decode;
mod registers;

use embedded_hal::{delay::DelayNs, digital::OutputPin};

use crate::bus::RegisterBus;
use crate::error::Error;
use crate::geometry::{Geometry, Rotation};
use crate::point::TouchPoint;

pub use decode::{MAX_TOUCH_POINTS, RECORD_LEN, RECORD_OFFSETS, TOUCH_DATA_LEN};
pub use registers::{
    Register, FIRMWARE_MARKER, PROBE_ATTEMPTS, PROBE_RETRY_MS, RESET_BOOT_MS, RESET_PULSE_MS,
};

/// Active touch points, in slot order
pub type Touches = heapless::Vec<TouchPoint, MAX_TOUCH_POINTS>;

/// Outcome of a best-effort touch read
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadStatus {
    #[default]
    Complete,
    /// Fewer bytes than requested arrived; the rest of the frame is left over
    /// from an earlier read.
    Short { received: usize },
}

impl ReadStatus {
    pub fn is_complete(self) -> bool {
        self == ReadStatus::Complete
    }
}

/// CST328 driver
///
/// Touch queries poll the controller synchronously. Callers sharing one driver
/// across contexts must serialize access themselves.
pub struct Cst328<BUS> {
    bus: BUS,
    frame: [u8; TOUCH_DATA_LEN],
    points: [TouchPoint; MAX_TOUCH_POINTS],
    geometry: Geometry,
    last_status: ReadStatus,
    short_reads: u32,
}

impl<BUS> Cst328<BUS>
where
    BUS: RegisterBus,
{
    pub fn new(bus: BUS, width: u16, height: u16) -> Self {
        Cst328 {
            bus,
            frame: [0; TOUCH_DATA_LEN],
            points: core::array::from_fn(|i| TouchPoint::new(0, 0, 0, i as u8 + 1)),
            geometry: Geometry::new(width, height),
            last_status: ReadStatus::Complete,
            short_reads: 0,
        }
    }

    pub fn release(self) -> BUS {
        self.bus
    }

    /// Pulse the reset line and wait for the controller to boot.
    pub fn hardware_reset<P: OutputPin, D: DelayNs>(
        &mut self,
        reset_pin: &mut P,
        delay: &mut D,
    ) -> Result<(), Error<BUS::Error>> {
        reset_pin.set_high().map_err(|_| Error::Pin)?;
        delay.delay_ms(RESET_PULSE_MS);
        reset_pin.set_low().map_err(|_| Error::Pin)?;
        delay.delay_ms(RESET_PULSE_MS);
        reset_pin.set_high().map_err(|_| Error::Pin)?;
        delay.delay_ms(RESET_BOOT_MS);
        Ok(())
    }

    /// Identify the controller and switch it to touch reporting.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<BUS::Error>> {
        for attempt in 1..=PROBE_ATTEMPTS {
            match self.probe() {
                Ok(true) => {
                    info!("CST328 is found on the bus");
                    self.write_command(Register::NormalMode.addr())?;
                    return Ok(());
                }
                Ok(false) => debug!("CST328 probe {}: marker mismatch", attempt),
                Err(_) => debug!("CST328 probe {}: bus error", attempt),
            }
            if attempt < PROBE_ATTEMPTS {
                delay.delay_ms(PROBE_RETRY_MS);
            }
        }
        error!("CST328 not found on the bus");
        Err(Error::DeviceNotFound)
    }

    pub fn init_with_reset<P: OutputPin, D: DelayNs>(
        &mut self,
        reset_pin: &mut P,
        delay: &mut D,
    ) -> Result<(), Error<BUS::Error>> {
        self.hardware_reset(reset_pin, delay)?;
        self.init(delay)
    }

    /// The information registers are only readable in debug-info mode.
    fn probe(&mut self) -> Result<bool, Error<BUS::Error>> {
        self.write_command(Register::DebugInfoMode.addr())?;
        let id = self.read_register32(Register::FirmwareChecksum.addr())?;
        trace!("CST328 firmware checksum {:x}", id);
        Ok((id >> 16) as u16 == FIRMWARE_MARKER)
    }

    /// Read the whole touch frame and decode every slot.
    ///
    /// Never fails: a short transfer or a bus error is logged and the slots are
    /// decoded from whatever the frame buffer holds.
    pub fn read_data(&mut self) -> ReadStatus {
        let received = match self.bus.read(Register::TouchData.addr(), &mut self.frame) {
            Ok(n) => n.min(TOUCH_DATA_LEN),
            Err(_) => {
                warn!("CST328 touch read failed on the bus");
                0
            }
        };
        let status = self.track(received, TOUCH_DATA_LEN);
        decode::decode_frame(&self.frame, &mut self.points);
        trace!("CST328 frame decoded, {} active", decode::count_active(&self.points));
        status
    }

    /// Read and decode a single finger record.
    pub fn fast_read_data(&mut self, slot: usize) -> Result<ReadStatus, Error<BUS::Error>> {
        let offset = *RECORD_OFFSETS
            .get(slot)
            .ok_or(Error::OutOfRange { index: slot })?;
        let record = &mut self.frame[offset..offset + RECORD_LEN];
        let received = match self.bus.read(Register::TouchData.addr() + offset as u16, record) {
            Ok(n) => n.min(RECORD_LEN),
            Err(_) => {
                warn!("CST328 finger {} read failed on the bus", slot);
                0
            }
        };
        let status = self.track(received, RECORD_LEN);
        if let Some(bytes) = decode::record_at(&self.frame, slot) {
            decode::Record::from_bytes(bytes).apply(&mut self.points[slot]);
        }
        Ok(status)
    }

    fn track(&mut self, received: usize, expected: usize) -> ReadStatus {
        let status = if received < expected {
            warn!("CST328 short read: {} of {} bytes", received, expected);
            self.short_reads = self.short_reads.wrapping_add(1);
            ReadStatus::Short { received }
        } else {
            ReadStatus::Complete
        };
        self.last_status = status;
        status
    }

    /// Number of fingers on the panel (0..=5). Reads the controller.
    pub fn touch_count(&mut self) -> u8 {
        self.read_data();
        decode::count_active(&self.points)
    }

    /// Reads the controller.
    pub fn is_touched(&mut self) -> bool {
        self.touch_count() > 0
    }

    /// Whether one slot holds a finger. Reads the controller.
    pub fn is_slot_touched(&mut self, slot: usize) -> Result<bool, Error<BUS::Error>> {
        Self::check_slot(slot)?;
        self.read_data();
        Ok(self.points[slot].is_active())
    }

    /// Read the controller and return the active points.
    pub fn poll(&mut self) -> Touches {
        self.read_data();
        self.points.iter().filter(|p| p.is_active()).copied().collect()
    }

    /// Last decoded value of a slot. Does not read the controller.
    pub fn point(&self, slot: usize) -> Result<TouchPoint, Error<BUS::Error>> {
        Self::check_slot(slot)?;
        Ok(self.points[slot])
    }

    pub fn points(&self) -> &[TouchPoint; MAX_TOUCH_POINTS] {
        &self.points
    }

    pub fn last_status(&self) -> ReadStatus {
        self.last_status
    }

    pub fn short_reads(&self) -> u32 {
        self.short_reads
    }

    fn check_slot(slot: usize) -> Result<(), Error<BUS::Error>> {
        if slot < MAX_TOUCH_POINTS {
            Ok(())
        } else {
            Err(Error::OutOfRange { index: slot })
        }
    }

    /// Set the rotation from its index (taken modulo 4) and return the result.
    pub fn set_rotation(&mut self, r: u8) -> Rotation {
        let rotation = Rotation::from_index(r);
        self.set_orientation(rotation);
        rotation
    }

    pub fn set_orientation(&mut self, rotation: Rotation) {
        // TODO: remap decoded x/y per rotation once the panel mounting convention is settled
        self.geometry.set_rotation(rotation);
    }

    pub fn rotation(&self) -> Rotation {
        self.geometry.rotation()
    }

    pub fn width(&self) -> u16 {
        self.geometry.width()
    }

    pub fn height(&self) -> u16 {
        self.geometry.height()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn write_register8(&mut self, reg: u16, value: u8) -> Result<(), Error<BUS::Error>> {
        self.bus.write(reg, &[value])?;
        Ok(())
    }

    pub fn read_register8(&mut self, reg: u16) -> Result<u8, Error<BUS::Error>> {
        let mut rx = [0_u8; 1];
        self.read_exact(reg, &mut rx)?;
        Ok(rx[0])
    }

    /// Read four bytes, least significant first.
    pub fn read_register32(&mut self, reg: u16) -> Result<u32, Error<BUS::Error>> {
        let mut rx = [0_u8; 4];
        self.read_exact(reg, &mut rx)?;
        Ok(u32::from_le_bytes(rx))
    }

    /// Register-only write, used for mode commands.
    pub fn write_command(&mut self, reg: u16) -> Result<(), Error<BUS::Error>> {
        self.bus.write(reg, &[])?;
        Ok(())
    }

    fn read_exact(&mut self, reg: u16, buf: &mut [u8]) -> Result<(), Error<BUS::Error>> {
        let received = self.bus.read(reg, buf)?;
        if received < buf.len() {
            return Err(Error::ShortRead {
                expected: buf.len(),
                received,
            });
        }
        Ok(())
    }
}
