use super::{Cpu, RegField, RmOperand};
use crate::{Memory, Width};

impl Cpu {
    /// Decode the ModRM byte (plus SIB and displacement) at `eip`.
    ///
    /// Uses 32-bit addressing:
    /// - mod=11: register operand
    /// - mod=00: `[base]`, or `[disp32]` when rm=101
    /// - mod=01: `[base + disp8]`
    /// - mod=10: `[base + disp32]`
    /// - rm=100 (memory modes): a SIB byte follows
    ///
    /// Only `eip` is modified. Decoding the same bytes again after restoring
    /// `eip` yields the same descriptors.
    pub fn decode_modrm<M: Memory>(
        &mut self,
        mem: &mut M,
        rm_width: Width,
        reg_width: Width,
    ) -> (RmOperand, RegField) {
        let modrm = self.fetch8(mem);
        let mode = modrm >> 6;
        let reg = RegField {
            value: (modrm >> 3) & 0x07,
            width: reg_width,
        };
        let rm = modrm & 0x07;

        if mode == 0b11 {
            return (RmOperand::register(rm, rm_width), reg);
        }

        let base = match rm {
            0b100 => self.decode_sib(mem, mode),
            0b101 if mode == 0b00 => self.fetch(mem, Width::Dword),
            _ => self.regs.read(rm, Width::Dword),
        };

        let displacement = match mode {
            0b01 => Width::Dword.sign_extend(self.fetch8(mem) as u64, Width::Byte) as u32,
            0b10 => self.fetch(mem, Width::Dword),
            _ => 0,
        };

        (
            RmOperand::memory(base.wrapping_add(displacement), rm_width),
            reg,
        )
    }

    /// Scale-index-base byte. Index 100 means "no index"; base 101 with
    /// mod=00 means a disp32 replaces the base register.
    fn decode_sib<M: Memory>(&mut self, mem: &mut M, mode: u8) -> u32 {
        let sib = self.fetch8(mem);
        let scale = sib >> 6;
        let index = (sib >> 3) & 0x07;
        let base = sib & 0x07;

        let scaled_index = if index == 0b100 {
            0
        } else {
            self.regs.read(index, Width::Dword) << scale
        };

        let base = if base == 0b101 && mode == 0b00 {
            self.fetch(mem, Width::Dword)
        } else {
            self.regs.read(base, Width::Dword)
        };

        base.wrapping_add(scaled_index)
    }
}
