//! CPU model for the Hack computer.
//!
//! This module implements the Hack CPU:
//! - 16-bit A (address) and D (data) registers
//! - 15-bit program counter
//! - one ALU with six control bits and zr/ng flags
//! - address- and compute-instructions, eight jump conditions

pub mod alu;
pub mod jump;
pub mod decode;
pub mod registers;
pub mod counter;
pub mod execute;
pub mod trace;

pub use alu::{AluControl, AluFlags, AluOp, AluOutput};
pub use jump::JumpCode;
pub use decode::{decode, encode, ControlSignals, Dest, Instruction};
pub use registers::{Register, RegisterFile};
pub use counter::ProgramCounter;
pub use execute::{evaluate, Cpu, Cycle, CycleOutputs, RegisterState};
pub use trace::CycleRecord;
