use crate::cpu::{BitwiseOp, Cpu, Outcome, Registers, EAX};
use crate::{Memory, Width};

impl Cpu {
    /// AND/OR/XOR/TEST al/ax/eax, imm (24/25, 0C/0D, 34/35, A8/A9).
    pub fn exec_bitwise_acc_imm<M: Memory>(
        &mut self,
        mem: &mut M,
        op: BitwiseOp,
        width: Width,
    ) -> Outcome {
        let imm = self.fetch(mem, width);
        let a = self.regs.read(EAX, width);

        let result = self.alu_bitwise(op, width, a, imm);
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

    /// AND/OR/XOR r/m, imm (80/81/83 with /4, /1, /6) and TEST r/m, imm
    /// (F6/F7 /0).
    ///
    /// Unlike ADD/SUB/CMP, a narrow immediate (83) is zero-extended: `83 /4
    /// ib 0xFF` masks with `0xFF`, not `0xFFFFFFFF`.
    pub fn exec_bitwise_rm_imm<M: Memory>(
        &mut self,
        mem: &mut M,
        op: BitwiseOp,
        width: Width,
        imm_width: Width,
    ) -> Outcome {
        debug_assert!(imm_width.bytes() <= width.bytes());

        let rm = match self.decode_group(mem, width, op.mnemonic(), op.extension()) {
            Ok(rm) => rm,
            Err(outcome) => return outcome,
        };

        let imm = self.fetch(mem, imm_width);
        let a = self.read_rm(mem, &rm);

        let result = self.alu_bitwise(op, width, a, imm);
        if op.writes_back() {
            self.write_rm(mem, &rm, result);
        }

        log::debug!(
            "{} {}, imm{}(0x{:X})",
            op.mnemonic().name(),
            rm,
            imm_width.bits(),
            imm
        );
        Outcome::Matched(op.mnemonic())
    }

    /// AND/OR/XOR/TEST r/m, r (20/21, 08/09, 30/31, 84/85).
    pub fn exec_bitwise_rm_r<M: Memory>(
        &mut self,
        mem: &mut M,
        op: BitwiseOp,
        width: Width,
    ) -> Outcome {
        let (rm, reg) = self.decode_modrm(mem, width, width);
        let a = self.read_rm(mem, &rm);
        let b = self.regs.read(reg.value, reg.width);

        let result = self.alu_bitwise(op, width, a, b);
        if op.writes_back() {
            self.write_rm(mem, &rm, result);
        }

        log::debug!("{} {}, {}", op.mnemonic().name(), rm, reg.name());
        Outcome::Matched(op.mnemonic())
    }

    /// AND/OR/XOR r, r/m (22/23, 0A/0B, 32/33).
    pub fn exec_bitwise_r_rm<M: Memory>(
        &mut self,
        mem: &mut M,
        op: BitwiseOp,
        width: Width,
    ) -> Outcome {
        let (rm, reg) = self.decode_modrm(mem, width, width);
        let a = self.regs.read(reg.value, reg.width);
        let b = self.read_rm(mem, &rm);

        let result = self.alu_bitwise(op, width, a, b);
        if op.writes_back() {
            self.regs.write(reg.value, reg.width, result);
        }

        log::debug!("{} {}, {}", op.mnemonic().name(), reg.name(), rm);
        Outcome::Matched(op.mnemonic())
    }
}
