mod alu;
mod exec;
mod helpers;
mod modrm;
mod operand;
mod regs;

pub use alu::{ArithOp, BitwiseOp, Mnemonic, UnaryOp, MOV_EXTENSION};
pub use operand::{Location, RegField, RmOperand};
pub use regs::{Eflags, Flag, Registers, EAX, EBP, EBX, ECX, EDI, EDX, ESI, ESP};

/// Result of offering the bytes at `eip` to one handler.
///
/// Handlers either commit every effect (storage, flags and `eip`) or none
/// of them. A dispatcher that receives `NotMatched` may hand the very same
/// bytes to the next candidate handler.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The instruction was executed.
    Matched(Mnemonic),
    /// The bytes encode a different mnemonic; `eip` was restored to `eip`.
    NotMatched { eip: u32 },
}

impl Outcome {
    #[inline]
    pub fn is_matched(&self) -> bool {
        matches!(self, Outcome::Matched(_))
    }
}

/// CPU state shared by all instruction handlers.
///
/// The core is not reentrant: the caller owns the `Cpu` and the memory and
/// runs one handler at a time against them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cpu {
    pub regs: Registers,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn eip(&self) -> u32 {
        self.regs.eip
    }

    #[inline]
    pub fn set_eip(&mut self, eip: u32) {
        self.regs.eip = eip;
    }

    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.regs.eflags.contains(flag.bit())
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        self.regs.eflags.set(flag.bit(), value);
    }
}
