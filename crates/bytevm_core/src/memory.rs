use anyhow::{bail, Result};

use crate::Width;

/// Abstraction over the emulated address space.
///
/// Handlers only ever talk to memory through this trait. Implementations
/// provide byte access; multi-byte accesses are little-endian and built on
/// top of `read8`/`write8` unless an implementation overrides them.
pub trait Memory {
    fn read8(&mut self, addr: u32) -> u8;
    fn write8(&mut self, addr: u32, value: u8);

    /// Little-endian read of `width` bytes starting at `addr`.
    fn read(&mut self, addr: u32, width: Width) -> u32 {
        (0..width.bytes()).fold(0u32, |acc, i| {
            acc | (self.read8(addr.wrapping_add(i)) as u32) << (8 * i)
        })
    }

    /// Little-endian write of the low `width` bytes of `value`.
    fn write(&mut self, addr: u32, width: Width, value: u32) {
        for i in 0..width.bytes() {
            self.write8(addr.wrapping_add(i), (value >> (8 * i)) as u8);
        }
    }

    fn get(&mut self, addr: u32, width: Width) -> Vec<u8> {
        (0..width.bytes())
            .map(|i| self.read8(addr.wrapping_add(i)))
            .collect()
    }

    fn set(&mut self, addr: u32, bytes: &[u8]) {
        for (i, byte) in bytes.iter().enumerate() {
            self.write8(addr.wrapping_add(i as u32), *byte);
        }
    }
}

/// Flat, zero-initialised memory backed by a `Vec<u8>`.
///
/// Accesses outside the allocated range do not fault: reads return 0 and
/// writes are dropped, both with a warning in the log.
#[derive(Clone, Debug)]
pub struct FlatMemory {
    data: Vec<u8>,
}

impl FlatMemory {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Copy `bytes` into memory starting at `addr`.
    pub fn load(&mut self, addr: u32, bytes: &[u8]) -> Result<()> {
        let start = addr as usize;
        let end = start + bytes.len();
        if end > self.data.len() {
            bail!(
                "image of {} bytes at 0x{:08X} does not fit in {} bytes of memory",
                bytes.len(),
                addr,
                self.data.len()
            );
        }
        self.data[start..end].copy_from_slice(bytes);
        Ok(())
    }
}

impl Memory for FlatMemory {
    fn read8(&mut self, addr: u32) -> u8 {
        match self.data.get(addr as usize) {
            Some(value) => *value,
            None => {
                log::warn!("read from unmapped address 0x{addr:08X}");
                0
            }
        }
    }

    fn write8(&mut self, addr: u32, value: u8) {
        match self.data.get_mut(addr as usize) {
            Some(slot) => *slot = value,
            None => log::warn!("dropped write of 0x{value:02X} to unmapped address 0x{addr:08X}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_byte_access_is_little_endian() {
        let mut mem = FlatMemory::new(16);
        mem.write(0x04, Width::Dword, 0x1234_5678);
        assert_eq!(mem.as_slice()[4..8], [0x78, 0x56, 0x34, 0x12]);
        assert_eq!(mem.read(0x04, Width::Word), 0x5678);
        assert_eq!(mem.read(0x06, Width::Byte), 0x34);
        assert_eq!(mem.get(0x04, Width::Word), vec![0x78, 0x56]);

        mem.set(0x00, &[0xAA, 0xBB]);
        assert_eq!(mem.read(0x00, Width::Word), 0xBBAA);
    }

    #[test]
    fn out_of_range_access_is_harmless() {
        let mut mem = FlatMemory::new(4);
        mem.write8(0x10, 0xFF);
        assert_eq!(mem.read8(0x10), 0);
        // A dword straddling the end keeps the in-range bytes.
        mem.write(0x02, Width::Dword, 0xDDCC_BBAA);
        assert_eq!(mem.as_slice(), &[0, 0, 0xAA, 0xBB]);
    }

    #[test]
    fn load_rejects_oversized_images() {
        let mut mem = FlatMemory::new(4);
        assert!(mem.load(2, &[1, 2, 3]).is_err());
        mem.load(1, &[1, 2, 3]).unwrap();
        assert_eq!(mem.as_slice(), &[0, 1, 2, 3]);
    }
}
