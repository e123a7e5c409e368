//! Module for memory devices, such as RAM and ROM

use super::bus::{BusDevice, BusPeekResult};
use crate::error::EmulatorError;

pub struct Ram {
    buf: Vec<u8>,
    len: usize,
}

impl BusDevice for Ram {
    fn read(&mut self, addr: u16, last_bus_value: u8) -> u8 {
        self.peek(addr).unwrap(last_bus_value)
    }

    fn peek(&self, addr: u16) -> BusPeekResult {
        if (addr as usize) >= self.len {
            BusPeekResult::Unmapped
        } else {
            BusPeekResult::Result(self.buf[addr as usize])
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.buf[addr as usize] = value;
    }
}

impl Ram {
    pub fn new(size: usize) -> Ram {
        Ram {
            len: size,
            buf: vec![0u8; size],
        }
    }
}

/// Read-only backing store. Writes are silently dropped.
pub struct Rom {
    buf: Vec<u8>,
    len: usize,
}

impl BusDevice for Rom {
    fn read(&mut self, addr: u16, last_bus_value: u8) -> u8 {
        self.peek(addr).unwrap(last_bus_value)
    }

    fn peek(&self, addr: u16) -> BusPeekResult {
        if (addr as usize) >= self.len {
            BusPeekResult::Unmapped
        } else {
            BusPeekResult::Result(self.buf[addr as usize])
        }
    }

    fn write(&mut self, _addr: u16, _value: u8) {
        // ROM writes are a no-op.
    }
}

impl Rom {
    pub fn new(size: usize) -> Rom {
        Rom {
            len: size,
            buf: vec![0u8; size],
        }
    }

    /// Bulk-load an image into the ROM backing buffer, starting at offset 0.
    pub fn load(&mut self, image: &[u8]) -> Result<(), EmulatorError> {
        if image.len() > self.len {
            return Err(EmulatorError::RomTooLarge {
                size: image.len(),
                capacity: self.len,
            });
        }
        self.buf[..image.len()].copy_from_slice(image);
        Ok(())
    }
}
