use super::{Cpu, Mnemonic, Outcome, RmOperand};
use crate::{Memory, Width};

impl Cpu {
    #[inline]
    pub fn fetch8<M: Memory>(&mut self, mem: &mut M) -> u8 {
        let value = mem.read8(self.regs.eip);
        self.regs.eip = self.regs.eip.wrapping_add(1);
        value
    }

    /// Read a little-endian immediate of `width` bytes and advance `eip`.
    #[inline]
    pub fn fetch<M: Memory>(&mut self, mem: &mut M, width: Width) -> u32 {
        let value = mem.read(self.regs.eip, width);
        self.regs.eip = self.regs.eip.wrapping_add(width.bytes());
        value
    }

    /// Restore `eip` and report that the bytes belong to another mnemonic.
    pub(super) fn not_matched(&mut self, eip: u32, mnemonic: Mnemonic, extension: u8) -> Outcome {
        log::trace!(
            "not {} (extension /{}) at 0x{:08X}, rolling back",
            mnemonic.name(),
            extension,
            eip
        );
        self.regs.eip = eip;
        Outcome::NotMatched { eip }
    }

    /// Decode ModRM for a group opcode and check that its reg field carries
    /// `extension`. On mismatch `eip` is back where it started and the
    /// `NotMatched` outcome is returned as the error.
    pub(super) fn decode_group<M: Memory>(
        &mut self,
        mem: &mut M,
        width: Width,
        mnemonic: Mnemonic,
        extension: u8,
    ) -> Result<RmOperand, Outcome> {
        let start = self.regs.eip;
        let (rm, reg) = self.decode_modrm(mem, width, width);
        if reg.value != extension {
            return Err(self.not_matched(start, mnemonic, reg.value));
        }
        Ok(rm)
    }
}
