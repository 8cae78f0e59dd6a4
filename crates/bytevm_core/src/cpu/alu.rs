use super::{Cpu, Flag};
use crate::Width;

/// Mnemonic of a committed instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Mov,
    Add,
    Sub,
    Cmp,
    And,
    Or,
    Xor,
    Test,
    Neg,
    Not,
    Jmp,
}

impl Mnemonic {
    pub const fn name(self) -> &'static str {
        match self {
            Mnemonic::Mov => "mov",
            Mnemonic::Add => "add",
            Mnemonic::Sub => "sub",
            Mnemonic::Cmp => "cmp",
            Mnemonic::And => "and",
            Mnemonic::Or => "or",
            Mnemonic::Xor => "xor",
            Mnemonic::Test => "test",
            Mnemonic::Neg => "neg",
            Mnemonic::Not => "not",
            Mnemonic::Jmp => "jmp",
        }
    }
}

/// Opcode extension of `MOV r/m, imm` (C6 /0, C7 /0).
pub const MOV_EXTENSION: u8 = 0;

/// Additive operations. CMP is SUB without the write-back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Cmp,
}

impl ArithOp {
    /// ModRM reg field selecting this operation in the 80/81/83 group.
    pub const fn extension(self) -> u8 {
        match self {
            ArithOp::Add => 0,
            ArithOp::Sub => 5,
            ArithOp::Cmp => 7,
        }
    }

    pub const fn subtracts(self) -> bool {
        matches!(self, ArithOp::Sub | ArithOp::Cmp)
    }

    pub const fn writes_back(self) -> bool {
        !matches!(self, ArithOp::Cmp)
    }

    pub const fn mnemonic(self) -> Mnemonic {
        match self {
            ArithOp::Add => Mnemonic::Add,
            ArithOp::Sub => Mnemonic::Sub,
            ArithOp::Cmp => Mnemonic::Cmp,
        }
    }
}

/// Bitwise operations. TEST is AND without the write-back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitwiseOp {
    And,
    Or,
    Xor,
    Test,
}

impl BitwiseOp {
    /// ModRM reg field selecting this operation. AND/OR/XOR live in the
    /// 80/81/83 group, TEST in the F6/F7 group.
    pub const fn extension(self) -> u8 {
        match self {
            BitwiseOp::Test => 0,
            BitwiseOp::Or => 1,
            BitwiseOp::And => 4,
            BitwiseOp::Xor => 6,
        }
    }

    pub const fn writes_back(self) -> bool {
        !matches!(self, BitwiseOp::Test)
    }

    #[inline]
    pub const fn apply(self, a: u32, b: u32) -> u32 {
        match self {
            BitwiseOp::And | BitwiseOp::Test => a & b,
            BitwiseOp::Or => a | b,
            BitwiseOp::Xor => a ^ b,
        }
    }

    pub const fn mnemonic(self) -> Mnemonic {
        match self {
            BitwiseOp::And => Mnemonic::And,
            BitwiseOp::Or => Mnemonic::Or,
            BitwiseOp::Xor => Mnemonic::Xor,
            BitwiseOp::Test => Mnemonic::Test,
        }
    }
}

/// Single-operand operations of the F6/F7 group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Not,
    Neg,
}

impl UnaryOp {
    pub const fn extension(self) -> u8 {
        match self {
            UnaryOp::Not => 2,
            UnaryOp::Neg => 3,
        }
    }

    pub const fn mnemonic(self) -> Mnemonic {
        match self {
            UnaryOp::Not => Mnemonic::Not,
            UnaryOp::Neg => Mnemonic::Neg,
        }
    }
}

impl Cpu {
    /// ADD/SUB/CMP core on `width`-wide operands; returns the masked result.
    ///
    /// Subtraction is `a + (MAX + 1 - b)` so both directions share the flag
    /// logic: SF is bit `8w-1` of the unmasked sum, OF is set when the
    /// unmasked sum exceeds `MAX`, ZF tests the masked result. CF is left
    /// alone.
    pub fn alu_arith(&mut self, op: ArithOp, width: Width, a: u32, b: u32) -> u32 {
        let a = width.mask(a as u64);
        let b = width.mask(b as u64);
        let rhs = if op.subtracts() { width.modulus() - b } else { b };
        let full = a + rhs;

        self.set_flag(Flag::Sign, width.sign_bit(full));
        self.set_flag(Flag::Overflow, full > width.max_value());

        let result = width.mask(full);
        self.set_flag(Flag::Zero, result == 0);
        result as u32
    }

    /// AND/OR/XOR/TEST core. OF and CF are always cleared.
    pub fn alu_bitwise(&mut self, op: BitwiseOp, width: Width, a: u32, b: u32) -> u32 {
        self.set_flag(Flag::Overflow, false);
        self.set_flag(Flag::Carry, false);

        let full = op.apply(a, b) as u64;
        self.set_flag(Flag::Sign, width.sign_bit(full));

        let result = width.mask(full);
        self.set_flag(Flag::Zero, result == 0);
        result as u32
    }

    /// NOT is `MAX - a`; NEG is `NOT(a) + 1` and sets CF to `a == 0`.
    /// No other flag is touched.
    pub fn alu_unary(&mut self, op: UnaryOp, width: Width, a: u32) -> u32 {
        let a = width.mask(a as u64);
        let not = width.max_value() - a;
        let result = match op {
            UnaryOp::Not => not,
            UnaryOp::Neg => {
                self.set_flag(Flag::Carry, a == 0);
                not + 1
            }
        };
        width.mask(result) as u32
    }
}
