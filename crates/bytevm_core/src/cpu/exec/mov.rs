use crate::cpu::{Cpu, Mnemonic, Outcome, Registers, EAX, MOV_EXTENSION};
use crate::{Memory, Width, ADDRESS_SIZE};

impl Cpu {
    /// MOV r, imm (B0-BF). The register is the low 3 bits of the opcode.
    pub fn exec_mov_r_imm<M: Memory>(&mut self, mem: &mut M, opcode: u8, width: Width) -> Outcome {
        let reg = opcode & 0x07;
        let imm = self.fetch(mem, width);
        self.regs.write(reg, width, imm);

        log::debug!("mov {}, imm{}(0x{:X})", Registers::name(reg, width), width.bits(), imm);
        Outcome::Matched(Mnemonic::Mov)
    }

    /// MOV r/m, imm (C6 /0, C7 /0).
    pub fn exec_mov_rm_imm<M: Memory>(&mut self, mem: &mut M, width: Width) -> Outcome {
        let rm = match self.decode_group(mem, width, Mnemonic::Mov, MOV_EXTENSION) {
            Ok(rm) => rm,
            Err(outcome) => return outcome,
        };

        let imm = self.fetch(mem, width);
        self.write_rm(mem, &rm, imm);

        log::debug!("mov {}, imm{}(0x{:X})", rm, width.bits(), imm);
        Outcome::Matched(Mnemonic::Mov)
    }

    /// MOV r/m, r (88, 89).
    pub fn exec_mov_rm_r<M: Memory>(&mut self, mem: &mut M, width: Width) -> Outcome {
        let (rm, reg) = self.decode_modrm(mem, width, width);
        let value = self.regs.read(reg.value, reg.width);
        self.write_rm(mem, &rm, value);

        log::debug!("mov {}, {}(0x{:X})", rm, reg.name(), value);
        Outcome::Matched(Mnemonic::Mov)
    }

    /// MOV r, r/m (8A, 8B).
    pub fn exec_mov_r_rm<M: Memory>(&mut self, mem: &mut M, width: Width) -> Outcome {
        let (rm, reg) = self.decode_modrm(mem, width, width);
        let value = self.read_rm(mem, &rm);
        self.regs.write(reg.value, reg.width, value);

        log::debug!("mov {}, {}(0x{:X})", reg.name(), rm, value);
        Outcome::Matched(Mnemonic::Mov)
    }

    /// MOV al/ax/eax, moffs (A0, A1).
    pub fn exec_mov_acc_moffs<M: Memory>(&mut self, mem: &mut M, width: Width) -> Outcome {
        let addr = self.fetch(mem, ADDRESS_SIZE);
        let value = mem.read(addr, width);
        self.regs.write(EAX, width, value);

        log::debug!(
            "mov {}, moffs{}[0x{:08X}](0x{:X})",
            Registers::name(EAX, width),
            width.bits(),
            addr,
            value
        );
        Outcome::Matched(Mnemonic::Mov)
    }

    /// MOV moffs, al/ax/eax (A2, A3).
    pub fn exec_mov_moffs_acc<M: Memory>(&mut self, mem: &mut M, width: Width) -> Outcome {
        let addr = self.fetch(mem, ADDRESS_SIZE);
        let value = self.regs.read(EAX, width);
        mem.write(addr, width, value);

        log::debug!(
            "mov moffs{}[0x{:08X}], {}(0x{:X})",
            width.bits(),
            addr,
            Registers::name(EAX, width),
            value
        );
        Outcome::Matched(Mnemonic::Mov)
    }
}
