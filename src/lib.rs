//! # Hack CPU
//!
//! A cycle-accurate behavioral model of the 16-bit Hack CPU.
//!
//! Each cycle takes an instruction word, the memory word at `addressM` and a
//! reset line, and produces `outM`, `writeM` and `addressM` for the same
//! cycle plus the A, D and PC values committed at the clock edge. Memory is
//! left to the caller.

pub mod bits;
pub mod cpu;
pub mod listing;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use bits::{Addr15, Word16, WidthError};
pub use cpu::{Cpu, CycleOutputs, CycleRecord, Instruction, RegisterState, decode, encode, evaluate};
pub use listing::{disassemble, disassemble_word, load_hack, parse_hack, HackFile};
