mod config;
pub mod dispatch;
mod vm;

use anyhow::Result;

pub use bytevm_core;
pub use config::{VmConfig, DEFAULT_MAX_STEPS, DEFAULT_MEMORY_SIZE};
pub use vm::{DecodeError, Step, Vm};

/// Load `program` and run it until it halts.
pub fn run(config: VmConfig, program: &[u8]) -> Result<Vm> {
    let mut vm = Vm::new(config, program)?;
    vm.run()?;
    Ok(vm)
}

#[cfg(test)]
mod tests;
