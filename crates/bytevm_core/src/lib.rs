//! Instruction execution core of ByteVM.
//!
//! Decodes operands of 1, 2 or 4 bytes, computes results with x86-style
//! status flags and implements the try-then-roll-back protocol used to
//! share one opcode byte between several mnemonics.

pub mod cpu;
pub mod memory;
pub mod width;

pub use cpu::{
    ArithOp, BitwiseOp, Cpu, Eflags, Flag, Location, Mnemonic, Outcome, RegField, Registers,
    RmOperand, UnaryOp,
};
pub use memory::{FlatMemory, Memory};
pub use width::{Width, ADDRESS_SIZE};
