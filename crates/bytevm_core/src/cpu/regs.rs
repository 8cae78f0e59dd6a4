use bitflags::bitflags;

use crate::Width;

bitflags! {
    /// EFLAGS bits maintained by the execution core.
    ///
    /// Bit positions follow the x86 layout. Parity and auxiliary carry are
    /// not computed by any handler yet.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Eflags: u32 {
        const CF = 1 << 0;
        const ZF = 1 << 6;
        const SF = 1 << 7;
        const OF = 1 << 11;
    }
}

/// A single status flag, as seen by the flag-update contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Flag {
    Carry,
    Zero,
    Sign,
    Overflow,
}

impl Flag {
    #[inline]
    pub const fn bit(self) -> Eflags {
        match self {
            Flag::Carry => Eflags::CF,
            Flag::Zero => Eflags::ZF,
            Flag::Sign => Eflags::SF,
            Flag::Overflow => Eflags::OF,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Flag::Carry => "CF",
            Flag::Zero => "ZF",
            Flag::Sign => "SF",
            Flag::Overflow => "OF",
        }
    }
}

pub const EAX: u8 = 0;
pub const ECX: u8 = 1;
pub const EDX: u8 = 2;
pub const EBX: u8 = 3;
pub const ESP: u8 = 4;
pub const EBP: u8 = 5;
pub const ESI: u8 = 6;
pub const EDI: u8 = 7;

const NAMES_32: [&str; 8] = ["eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi"];
const NAMES_16: [&str; 8] = ["ax", "cx", "dx", "bx", "sp", "bp", "si", "di"];
const NAMES_8: [&str; 8] = ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"];

/// Register file of the emulated 32-bit CPU.
///
/// Register indices are the 3-bit encodings used by opcodes and ModRM bytes.
/// The sub-view selected by a width follows x86: dword and word views are
/// the low bits of the register; byte indices 0-3 are the low byte of
/// EAX..EBX and 4-7 are the second byte of the same four registers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub gpr: [u32; 8],
    pub eip: u32,
    pub eflags: Eflags,
}

impl Registers {
    /// Map an (index, width) pair to (backing register, bit shift).
    #[inline]
    fn slot(index: u8, width: Width) -> (usize, u32) {
        let index = (index & 0x07) as usize;
        match width {
            Width::Byte if index >= 4 => (index - 4, 8),
            _ => (index, 0),
        }
    }

    #[inline]
    pub fn read(&self, index: u8, width: Width) -> u32 {
        let (reg, shift) = Self::slot(index, width);
        ((self.gpr[reg] >> shift) as u64 & width.max_value()) as u32
    }

    /// Write the low `width` bytes of `value`, leaving the rest of the
    /// backing register untouched.
    #[inline]
    pub fn write(&mut self, index: u8, width: Width, value: u32) {
        let (reg, shift) = Self::slot(index, width);
        let mask = (width.max_value() as u32) << shift;
        let value = ((value as u64 & width.max_value()) as u32) << shift;
        self.gpr[reg] = (self.gpr[reg] & !mask) | value;
    }

    /// Little-endian bytes of the register's `width` sub-view.
    pub fn get(&self, index: u8, width: Width) -> Vec<u8> {
        self.read(index, width).to_le_bytes()[..width.bytes() as usize].to_vec()
    }

    /// Store little-endian `bytes`; the sub-view is chosen by `bytes.len()`.
    pub fn set(&mut self, index: u8, bytes: &[u8]) {
        let width = Width::from_bytes(bytes.len())
            .unwrap_or_else(|| panic!("invalid register write of {} bytes", bytes.len()));
        let mut raw = [0u8; 4];
        raw[..bytes.len()].copy_from_slice(bytes);
        self.write(index, width, u32::from_le_bytes(raw));
    }

    pub fn name(index: u8, width: Width) -> &'static str {
        let index = (index & 0x07) as usize;
        match width {
            Width::Byte => NAMES_8[index],
            Width::Word => NAMES_16[index],
            Width::Dword => NAMES_32[index],
        }
    }
}
