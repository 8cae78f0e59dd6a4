use bytevm_core::{ArithOp, BitwiseOp, Cpu, Memory, Outcome, UnaryOp, Width};

/// Operand-size prefix: the next instruction uses 16-bit instead of 32-bit
/// operands.
pub const OPERAND_SIZE_PREFIX: u8 = 0x66;
pub const HLT: u8 = 0xF4;

/// Operand size as encoded by the opcode: always one byte, or the current
/// operand size (dword, or word after `0x66`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Size {
    Byte,
    Full,
}

impl Size {
    #[inline]
    pub const fn resolve(self, full: Width) -> Width {
        match self {
            Size::Byte => Width::Byte,
            Size::Full => full,
        }
    }
}

/// One candidate interpretation of an opcode byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handler {
    MovRegImm(Size),
    MovRmImm(Size),
    MovRmReg(Size),
    MovRegRm(Size),
    MovAccMoffs(Size),
    MovMoffsAcc(Size),
    ArithAccImm(ArithOp, Size),
    /// Operand size, then immediate size.
    ArithRmImm(ArithOp, Size, Size),
    ArithRmReg(ArithOp, Size),
    ArithRegRm(ArithOp, Size),
    BitwiseAccImm(BitwiseOp, Size),
    BitwiseRmImm(BitwiseOp, Size, Size),
    BitwiseRmReg(BitwiseOp, Size),
    BitwiseRegRm(BitwiseOp, Size),
    Unary(UnaryOp, Size),
    JmpRel(Size),
}

impl Handler {
    /// Run this handler against the bytes following `opcode`.
    pub fn invoke<M: Memory>(self, cpu: &mut Cpu, mem: &mut M, opcode: u8, full: Width) -> Outcome {
        match self {
            Handler::MovRegImm(size) => cpu.exec_mov_r_imm(mem, opcode, size.resolve(full)),
            Handler::MovRmImm(size) => cpu.exec_mov_rm_imm(mem, size.resolve(full)),
            Handler::MovRmReg(size) => cpu.exec_mov_rm_r(mem, size.resolve(full)),
            Handler::MovRegRm(size) => cpu.exec_mov_r_rm(mem, size.resolve(full)),
            Handler::MovAccMoffs(size) => cpu.exec_mov_acc_moffs(mem, size.resolve(full)),
            Handler::MovMoffsAcc(size) => cpu.exec_mov_moffs_acc(mem, size.resolve(full)),
            Handler::ArithAccImm(op, size) => cpu.exec_arith_acc_imm(mem, op, size.resolve(full)),
            Handler::ArithRmImm(op, size, imm) => {
                cpu.exec_arith_rm_imm(mem, op, size.resolve(full), imm.resolve(full))
            }
            Handler::ArithRmReg(op, size) => cpu.exec_arith_rm_r(mem, op, size.resolve(full)),
            Handler::ArithRegRm(op, size) => cpu.exec_arith_r_rm(mem, op, size.resolve(full)),
            Handler::BitwiseAccImm(op, size) => {
                cpu.exec_bitwise_acc_imm(mem, op, size.resolve(full))
            }
            Handler::BitwiseRmImm(op, size, imm) => {
                cpu.exec_bitwise_rm_imm(mem, op, size.resolve(full), imm.resolve(full))
            }
            Handler::BitwiseRmReg(op, size) => cpu.exec_bitwise_rm_r(mem, op, size.resolve(full)),
            Handler::BitwiseRegRm(op, size) => cpu.exec_bitwise_r_rm(mem, op, size.resolve(full)),
            Handler::Unary(op, size) => cpu.exec_unary_rm(mem, op, size.resolve(full)),
            Handler::JmpRel(size) => cpu.exec_jmp_rel(mem, size.resolve(full)),
        }
    }
}

/// Candidates of the 80/81/83 group, ordered by opcode extension.
macro_rules! immediate_group {
    ($size:expr, $imm:expr) => {
        &[
            Handler::ArithRmImm(ArithOp::Add, $size, $imm),
            Handler::BitwiseRmImm(BitwiseOp::Or, $size, $imm),
            Handler::BitwiseRmImm(BitwiseOp::And, $size, $imm),
            Handler::ArithRmImm(ArithOp::Sub, $size, $imm),
            Handler::BitwiseRmImm(BitwiseOp::Xor, $size, $imm),
            Handler::ArithRmImm(ArithOp::Cmp, $size, $imm),
        ]
    };
}

/// Candidates of the F6/F7 group, ordered by opcode extension.
macro_rules! unary_group {
    ($size:expr) => {
        &[
            Handler::BitwiseRmImm(BitwiseOp::Test, $size, $size),
            Handler::Unary(UnaryOp::Not, $size),
            Handler::Unary(UnaryOp::Neg, $size),
        ]
    };
}

const GROUP_80: &[Handler] = immediate_group!(Size::Byte, Size::Byte);
const GROUP_81: &[Handler] = immediate_group!(Size::Full, Size::Full);
const GROUP_83: &[Handler] = immediate_group!(Size::Full, Size::Byte);
const GROUP_F6: &[Handler] = unary_group!(Size::Byte);
const GROUP_F7: &[Handler] = unary_group!(Size::Full);

/// Ordered candidate handlers for `opcode`. Empty for unsupported opcodes.
///
/// Opcodes that are not shared between mnemonics have exactly one
/// candidate. Group opcodes list their candidates in ascending extension
/// order; the dispatcher tries them until one matches.
pub fn candidates(opcode: u8) -> &'static [Handler] {
    use Size::{Byte, Full};

    match opcode {
        // ADD
        0x00 => &[Handler::ArithRmReg(ArithOp::Add, Byte)],
        0x01 => &[Handler::ArithRmReg(ArithOp::Add, Full)],
        0x02 => &[Handler::ArithRegRm(ArithOp::Add, Byte)],
        0x03 => &[Handler::ArithRegRm(ArithOp::Add, Full)],
        0x04 => &[Handler::ArithAccImm(ArithOp::Add, Byte)],
        0x05 => &[Handler::ArithAccImm(ArithOp::Add, Full)],

        // OR
        0x08 => &[Handler::BitwiseRmReg(BitwiseOp::Or, Byte)],
        0x09 => &[Handler::BitwiseRmReg(BitwiseOp::Or, Full)],
        0x0A => &[Handler::BitwiseRegRm(BitwiseOp::Or, Byte)],
        0x0B => &[Handler::BitwiseRegRm(BitwiseOp::Or, Full)],
        0x0C => &[Handler::BitwiseAccImm(BitwiseOp::Or, Byte)],
        0x0D => &[Handler::BitwiseAccImm(BitwiseOp::Or, Full)],

        // AND
        0x20 => &[Handler::BitwiseRmReg(BitwiseOp::And, Byte)],
        0x21 => &[Handler::BitwiseRmReg(BitwiseOp::And, Full)],
        0x22 => &[Handler::BitwiseRegRm(BitwiseOp::And, Byte)],
        0x23 => &[Handler::BitwiseRegRm(BitwiseOp::And, Full)],
        0x24 => &[Handler::BitwiseAccImm(BitwiseOp::And, Byte)],
        0x25 => &[Handler::BitwiseAccImm(BitwiseOp::And, Full)],

        // SUB
        0x28 => &[Handler::ArithRmReg(ArithOp::Sub, Byte)],
        0x29 => &[Handler::ArithRmReg(ArithOp::Sub, Full)],
        0x2A => &[Handler::ArithRegRm(ArithOp::Sub, Byte)],
        0x2B => &[Handler::ArithRegRm(ArithOp::Sub, Full)],
        0x2C => &[Handler::ArithAccImm(ArithOp::Sub, Byte)],
        0x2D => &[Handler::ArithAccImm(ArithOp::Sub, Full)],

        // XOR
        0x30 => &[Handler::BitwiseRmReg(BitwiseOp::Xor, Byte)],
        0x31 => &[Handler::BitwiseRmReg(BitwiseOp::Xor, Full)],
        0x32 => &[Handler::BitwiseRegRm(BitwiseOp::Xor, Byte)],
        0x33 => &[Handler::BitwiseRegRm(BitwiseOp::Xor, Full)],
        0x34 => &[Handler::BitwiseAccImm(BitwiseOp::Xor, Byte)],
        0x35 => &[Handler::BitwiseAccImm(BitwiseOp::Xor, Full)],

        // CMP
        0x38 => &[Handler::ArithRmReg(ArithOp::Cmp, Byte)],
        0x39 => &[Handler::ArithRmReg(ArithOp::Cmp, Full)],
        0x3A => &[Handler::ArithRegRm(ArithOp::Cmp, Byte)],
        0x3B => &[Handler::ArithRegRm(ArithOp::Cmp, Full)],
        0x3C => &[Handler::ArithAccImm(ArithOp::Cmp, Byte)],
        0x3D => &[Handler::ArithAccImm(ArithOp::Cmp, Full)],

        // Immediate group: ADD/OR/AND/SUB/XOR/CMP r/m, imm
        0x80 => GROUP_80,
        0x81 => GROUP_81,
        0x83 => GROUP_83,

        // TEST r/m, r
        0x84 => &[Handler::BitwiseRmReg(BitwiseOp::Test, Byte)],
        0x85 => &[Handler::BitwiseRmReg(BitwiseOp::Test, Full)],

        // MOV r/m <-> r
        0x88 => &[Handler::MovRmReg(Byte)],
        0x89 => &[Handler::MovRmReg(Full)],
        0x8A => &[Handler::MovRegRm(Byte)],
        0x8B => &[Handler::MovRegRm(Full)],

        // MOV accumulator <-> moffs
        0xA0 => &[Handler::MovAccMoffs(Byte)],
        0xA1 => &[Handler::MovAccMoffs(Full)],
        0xA2 => &[Handler::MovMoffsAcc(Byte)],
        0xA3 => &[Handler::MovMoffsAcc(Full)],

        // TEST accumulator, imm
        0xA8 => &[Handler::BitwiseAccImm(BitwiseOp::Test, Byte)],
        0xA9 => &[Handler::BitwiseAccImm(BitwiseOp::Test, Full)],

        // MOV r, imm
        0xB0..=0xB7 => &[Handler::MovRegImm(Byte)],
        0xB8..=0xBF => &[Handler::MovRegImm(Full)],

        // MOV r/m, imm
        0xC6 => &[Handler::MovRmImm(Byte)],
        0xC7 => &[Handler::MovRmImm(Full)],

        // JMP rel
        0xE9 => &[Handler::JmpRel(Full)],
        0xEB => &[Handler::JmpRel(Byte)],

        // Unary group: TEST r/m, imm / NOT / NEG
        0xF6 => GROUP_F6,
        0xF7 => GROUP_F7,

        _ => &[],
    }
}
