//! Instruction handlers.
//!
//! Every handler takes the operand width chosen by the dispatcher and
//! returns an [`Outcome`](super::Outcome). Handlers for group opcodes (the
//! ModRM reg field selects the mnemonic) decode the ModRM byte first and
//! roll `eip` back without touching any state when the extension is not
//! theirs.

mod arith;
mod bitwise;
mod control;
mod mov;
mod unary;
