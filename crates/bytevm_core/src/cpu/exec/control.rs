use crate::cpu::{Cpu, Mnemonic, Outcome};
use crate::{Memory, Width};

impl Cpu {
    /// JMP rel (EB rel8, E9 rel16/rel32).
    ///
    /// The displacement is signed and relative to the address following it.
    pub fn exec_jmp_rel<M: Memory>(&mut self, mem: &mut M, width: Width) -> Outcome {
        let raw = self.fetch(mem, width);
        let displacement = width.to_signed(raw as u64) as i32;
        self.regs.eip = self.regs.eip.wrapping_add_signed(displacement);

        log::debug!("jmp rel{}({:+}) -> 0x{:08X}", width.bits(), displacement, self.regs.eip);
        Outcome::Matched(Mnemonic::Jmp)
    }
}
