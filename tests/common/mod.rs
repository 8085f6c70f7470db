#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use cst328::{RegisterBus, TOUCH_DATA_LEN};
use embedded_hal::{
    delay::DelayNs,
    digital::{ErrorType, OutputPin},
};

pub const TOUCH_DATA: u16 = 0xD000;
pub const DEBUG_INFO_MODE: u16 = 0xD101;
pub const NORMAL_MODE: u16 = 0xD109;
pub const FIRMWARE_CHECKSUM: u16 = 0xD1FC;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeBusError;

/// Scripted CST328 register space.
pub struct FakeBus {
    pub touch_data: [u8; TOUCH_DATA_LEN],
    pub checksum: [u8; 4],
    /// Cap on bytes transferred per read
    pub limit: Option<usize>,
    pub fail_reads: bool,
    /// Checksum reads answered with zeros before the real value shows up
    pub probe_misses: usize,
    /// Touch frames (and transfer caps) handed out one per touch-data read
    pub queued: VecDeque<([u8; TOUCH_DATA_LEN], Option<usize>)>,
    pub registers: Vec<(u16, u8)>,
    pub writes: Vec<(u16, Vec<u8>)>,
    pub reads: Vec<(u16, usize)>,
}

impl FakeBus {
    pub fn new() -> Self {
        FakeBus {
            touch_data: [0; TOUCH_DATA_LEN],
            checksum: [0x34, 0x12, 0xCA, 0xCA],
            limit: None,
            fail_reads: false,
            probe_misses: 0,
            queued: VecDeque::new(),
            registers: Vec::new(),
            writes: Vec::new(),
            reads: Vec::new(),
        }
    }

    pub fn with_touch_data(touch_data: [u8; TOUCH_DATA_LEN]) -> Self {
        FakeBus {
            touch_data,
            ..FakeBus::new()
        }
    }

    pub fn commands(&self) -> Vec<u16> {
        self.writes
            .iter()
            .filter(|(_, payload)| payload.is_empty())
            .map(|(reg, _)| *reg)
            .collect()
    }
}

impl RegisterBus for FakeBus {
    type Error = FakeBusError;

    fn write(&mut self, reg: u16, payload: &[u8]) -> Result<(), Self::Error> {
        self.writes.push((reg, payload.to_vec()));
        if let [value] = payload {
            self.registers.push((reg, *value));
        }
        Ok(())
    }

    fn read(&mut self, reg: u16, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.reads.push((reg, buf.len()));
        if self.fail_reads {
            return Err(FakeBusError);
        }
        if reg == TOUCH_DATA {
            if let Some((touch_data, limit)) = self.queued.pop_front() {
                self.touch_data = touch_data;
                self.limit = limit;
            }
        }
        let n = buf.len().min(self.limit.unwrap_or(usize::MAX));
        match reg {
            FIRMWARE_CHECKSUM => {
                let value = if self.probe_misses > 0 {
                    self.probe_misses -= 1;
                    [0; 4]
                } else {
                    self.checksum
                };
                buf[..n].copy_from_slice(&value[..n]);
            }
            r if (TOUCH_DATA..TOUCH_DATA + TOUCH_DATA_LEN as u16).contains(&r) => {
                let start = (r - TOUCH_DATA) as usize;
                let n = n.min(TOUCH_DATA_LEN - start);
                buf[..n].copy_from_slice(&self.touch_data[start..start + n]);
                return Ok(n);
            }
            r => {
                let value = self
                    .registers
                    .iter()
                    .rev()
                    .find(|(reg, _)| *reg == r)
                    .map(|(_, v)| *v)
                    .unwrap_or(0);
                for (i, b) in buf[..n].iter_mut().enumerate() {
                    *b = value.wrapping_add(i as u8);
                }
            }
        }
        Ok(n)
    }
}

/// Build a finger record: event code, 12-bit x/y and weight.
pub fn record(event: u8, x: u16, y: u16, z: u8) -> [u8; 5] {
    [
        event,
        (x >> 4) as u8,
        (y >> 4) as u8,
        (((x & 0x0F) << 4) | (y & 0x0F)) as u8,
        z,
    ]
}

pub const RECORD_OFFSETS: [usize; 5] = [0, 7, 12, 17, 22];

/// Touch frame with the given records placed at the hardware offsets.
pub fn frame(records: [[u8; 5]; 5]) -> [u8; TOUCH_DATA_LEN] {
    let mut data = [0u8; TOUCH_DATA_LEN];
    for (offset, rec) in RECORD_OFFSETS.iter().zip(records.iter()) {
        data[*offset..*offset + 5].copy_from_slice(rec);
    }
    data
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    High,
    Low,
    DelayMs(u32),
    DelayNs(u32),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub struct FakePin(pub EventLog);

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Event::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Event::High);
        Ok(())
    }
}

pub struct FakeDelay(pub EventLog);

impl FakeDelay {
    pub fn detached() -> Self {
        FakeDelay(EventLog::default())
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(Event::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(Event::DelayMs(ms));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokenPinError;

impl embedded_hal::digital::Error for BrokenPinError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

pub struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = BrokenPinError;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(BrokenPinError)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(BrokenPinError)
    }
}
