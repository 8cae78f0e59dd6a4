use crate::cpu::{ArithOp, Cpu, Outcome, Registers, EAX};
use crate::{Memory, Width};

impl Cpu {
    /// ADD/SUB/CMP al/ax/eax, imm (04/05, 2C/2D, 3C/3D).
    pub fn exec_arith_acc_imm<M: Memory>(
        &mut self,
        mem: &mut M,
        op: ArithOp,
        width: Width,
    ) -> Outcome {
        let imm = self.fetch(mem, width);
        let a = self.regs.read(EAX, width);

        let result = self.alu_arith(op, width, a, imm);
        if op.writes_back() {
            self.regs.write(EAX, width, result);
        }

        log::debug!(
            "{} {}, imm{}(0x{:X})",
            op.mnemonic().name(),
            Registers::name(EAX, width),
            width.bits(),
            imm
        );
        Outcome::Matched(op.mnemonic())
    }

    /// ADD/SUB/CMP r/m, imm (80, 81, 83 with /0, /5, /7).
    ///
    /// `imm_width` may be narrower than `width` (83); the immediate is then
    /// sign-extended before use.
    pub fn exec_arith_rm_imm<M: Memory>(
        &mut self,
        mem: &mut M,
        op: ArithOp,
        width: Width,
        imm_width: Width,
    ) -> Outcome {
        debug_assert!(imm_width.bytes() <= width.bytes());

        let rm = match self.decode_group(mem, width, op.mnemonic(), op.extension()) {
            Ok(rm) => rm,
            Err(outcome) => return outcome,
        };

        let raw = self.fetch(mem, imm_width);
        let imm = width.sign_extend(raw as u64, imm_width) as u32;
        let a = self.read_rm(mem, &rm);

        let result = self.alu_arith(op, width, a, imm);
        if op.writes_back() {
            self.write_rm(mem, &rm, result);
        }

        log::debug!(
            "{} {}, imm{}(0x{:X})",
            op.mnemonic().name(),
            rm,
            imm_width.bits(),
            raw
        );
        Outcome::Matched(op.mnemonic())
    }

    /// ADD/SUB/CMP r/m, r (00/01, 28/29, 38/39): `rm = rm op reg`.
    pub fn exec_arith_rm_r<M: Memory>(
        &mut self,
        mem: &mut M,
        op: ArithOp,
        width: Width,
    ) -> Outcome {
        let (rm, reg) = self.decode_modrm(mem, width, width);
        let a = self.read_rm(mem, &rm);
        let b = self.regs.read(reg.value, reg.width);

        let result = self.alu_arith(op, width, a, b);
        if op.writes_back() {
            self.write_rm(mem, &rm, result);
        }

        log::debug!("{} {}, {}", op.mnemonic().name(), rm, reg.name());
        Outcome::Matched(op.mnemonic())
    }

    /// ADD/SUB/CMP r, r/m (02/03, 2A/2B, 3A/3B): `reg = rm op reg`.
    ///
    /// Only the destination differs from the r/m, r form; the operand order
    /// is the same, so SUB stores `rm - reg` and CMP flags `rm - reg`.
    pub fn exec_arith_r_rm<M: Memory>(
        &mut self,
        mem: &mut M,
        op: ArithOp,
        width: Width,
    ) -> Outcome {
        let (rm, reg) = self.decode_modrm(mem, width, width);
        let a = self.read_rm(mem, &rm);
        let b = self.regs.read(reg.value, reg.width);

        let result = self.alu_arith(op, width, a, b);
        if op.writes_back() {
            self.regs.write(reg.value, reg.width, result);
        }

        log::debug!("{} {}, {}", op.mnemonic().name(), reg.name(), rm);
        Outcome::Matched(op.mnemonic())
    }
}
