use crate::cpu::{Cpu, Outcome, UnaryOp};
use crate::{Memory, Width};

impl Cpu {
    /// NOT r/m (F6/F7 /2) and NEG r/m (F6/F7 /3).
    pub fn exec_unary_rm<M: Memory>(&mut self, mem: &mut M, op: UnaryOp, width: Width) -> Outcome {
        let rm = match self.decode_group(mem, width, op.mnemonic(), op.extension()) {
            Ok(rm) => rm,
            Err(outcome) => return outcome,
        };

        let a = self.read_rm(mem, &rm);
        let result = self.alu_unary(op, width, a);
        self.write_rm(mem, &rm, result);

        log::debug!("{} {}", op.mnemonic().name(), rm);
        Outcome::Matched(op.mnemonic())
    }
}
