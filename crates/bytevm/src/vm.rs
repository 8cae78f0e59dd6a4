use std::fmt;

use anyhow::{bail, Result};
use bytevm_core::cpu::ESP;
use bytevm_core::{Cpu, FlatMemory, Memory, Mnemonic, Outcome, Width};

use crate::config::VmConfig;
use crate::dispatch::{self, HLT, OPERAND_SIZE_PREFIX};

/// Raised when the bytes at `eip` cannot be executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// No handler is registered for the opcode.
    UnknownOpcode { opcode: u8, eip: u32 },
    /// Every candidate handler rejected the opcode extension.
    NoMatchingHandler { opcode: u8, extension: u8, eip: u32 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnknownOpcode { opcode, eip } => {
                write!(f, "unknown opcode 0x{opcode:02X} at 0x{eip:08X}")
            }
            DecodeError::NoMatchingHandler {
                opcode,
                extension,
                eip,
            } => write!(
                f,
                "no handler for opcode 0x{opcode:02X} /{extension} at 0x{eip:08X}"
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// What a single `Vm::step` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Executed(Mnemonic),
    Halted,
}

/// A CPU wired to its memory, plus the fetch/dispatch loop.
pub struct Vm<M: Memory = FlatMemory> {
    pub cpu: Cpu,
    pub mem: M,
    config: VmConfig,
    halted: bool,
    steps: u64,
}

impl Vm<FlatMemory> {
    /// Allocate memory, load `program` at the configured address and point
    /// `eip` at it.
    pub fn new(config: VmConfig, program: &[u8]) -> Result<Self> {
        let mut mem = FlatMemory::new(config.memory_size);
        mem.load(config.load_address, program)?;
        log::info!(
            "loaded {} bytes at 0x{:08X} ({} bytes of memory)",
            program.len(),
            config.load_address,
            config.memory_size
        );
        Ok(Self::with_memory(config, mem))
    }
}

impl<M: Memory> Vm<M> {
    pub fn with_memory(config: VmConfig, mem: M) -> Self {
        let mut cpu = Cpu::new();
        cpu.set_eip(config.load_address);
        cpu.regs.write(ESP, Width::Dword, config.initial_esp());
        Self {
            cpu,
            mem,
            config,
            halted: false,
            steps: 0,
        }
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Number of instructions executed so far (HLT excluded).
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Fetch and execute one instruction.
    ///
    /// Candidate handlers for the opcode are tried in table order. A handler
    /// that declines must leave `eip` where it found it; anything else is a
    /// bug in the handler and panics. On error `eip` points at the first
    /// byte of the offending instruction.
    pub fn step(&mut self) -> Result<Step> {
        if self.halted {
            return Ok(Step::Halted);
        }

        let start = self.cpu.eip();
        let mut width = Width::Dword;
        let mut opcode = self.cpu.fetch8(&mut self.mem);
        if opcode == OPERAND_SIZE_PREFIX {
            width = Width::Word;
            opcode = self.cpu.fetch8(&mut self.mem);
        }

        if opcode == HLT {
            self.halted = true;
            log::info!("hlt at 0x{start:08X} after {} instructions", self.steps);
            return Ok(Step::Halted);
        }

        let candidates = dispatch::candidates(opcode);
        if candidates.is_empty() {
            self.cpu.set_eip(start);
            let err = DecodeError::UnknownOpcode { opcode, eip: start };
            log::error!("{err}");
            return Err(err.into());
        }

        let operands = self.cpu.eip();
        for handler in candidates {
            match handler.invoke(&mut self.cpu, &mut self.mem, opcode, width) {
                Outcome::Matched(mnemonic) => {
                    self.steps += 1;
                    return Ok(Step::Executed(mnemonic));
                }
                Outcome::NotMatched { eip } => {
                    assert_eq!(
                        (eip, self.cpu.eip()),
                        (operands, operands),
                        "{handler:?} declined opcode 0x{opcode:02X} without restoring eip"
                    );
                }
            }
        }

        let extension = (self.mem.read8(operands) >> 3) & 0x07;
        self.cpu.set_eip(start);
        let err = DecodeError::NoMatchingHandler {
            opcode,
            extension,
            eip: start,
        };
        log::error!("{err}");
        Err(err.into())
    }

    /// Step until HLT. Exceeding `max_steps` is an error.
    pub fn run(&mut self) -> Result<()> {
        while !self.halted {
            if self.steps >= self.config.max_steps {
                bail!(
                    "step budget of {} instructions exhausted at eip=0x{:08X}",
                    self.config.max_steps,
                    self.cpu.eip()
                );
            }
            self.step()?;
        }
        Ok(())
    }
}
