use std::fmt;

use super::{Cpu, Registers};
use crate::{Memory, Width};

/// Where an r/m operand lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location {
    Register(u8),
    Memory(u32),
}

/// The r/m half of a decoded ModRM byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RmOperand {
    pub location: Location,
    pub width: Width,
}

impl RmOperand {
    pub const fn register(index: u8, width: Width) -> Self {
        Self {
            location: Location::Register(index & 0x07),
            width,
        }
    }

    pub const fn memory(addr: u32, width: Width) -> Self {
        Self {
            location: Location::Memory(addr),
            width,
        }
    }
}

impl fmt::Display for RmOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Location::Register(index) => f.write_str(Registers::name(index, self.width)),
            Location::Memory(addr) => write!(f, "m{}[0x{:08X}]", self.width.bits(), addr),
        }
    }
}

/// The reg half of a decoded ModRM byte.
///
/// `value` is either a register index or, for group opcodes, the opcode
/// extension that selects the mnemonic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegField {
    pub value: u8,
    pub width: Width,
}

impl RegField {
    pub fn name(&self) -> &'static str {
        Registers::name(self.value, self.width)
    }
}

impl Cpu {
    /// Read the current value of an r/m operand.
    #[inline]
    pub fn read_rm<M: Memory>(&self, mem: &mut M, rm: &RmOperand) -> u32 {
        match rm.location {
            Location::Register(index) => self.regs.read(index, rm.width),
            Location::Memory(addr) => mem.read(addr, rm.width),
        }
    }

    /// Store `value` (masked to the operand width) into an r/m operand.
    #[inline]
    pub fn write_rm<M: Memory>(&mut self, mem: &mut M, rm: &RmOperand, value: u32) {
        match rm.location {
            Location::Register(index) => self.regs.write(index, rm.width, value),
            Location::Memory(addr) => mem.write(addr, rm.width, value),
        }
    }
}
