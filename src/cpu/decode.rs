//! Instruction decoder for the Hack CPU.
//!
//! Every 16-bit word is a valid instruction. Bit 15 picks the class:
//!
//! ```text
//! address:  0vvv vvvv vvvv vvvv    v = 15-bit literal loaded into A
//! compute:  1xxa cccc ccdd djjj    a = y is M, c = ALU control,
//!                                  d = dest A/D/M, j = jump, x = unused
//! ```

use crate::bits::{Addr15, Word16};
use crate::cpu::alu::{AluControl, AluOp};
use crate::cpu::jump::JumpCode;
use serde::{Serialize, Deserialize};

/// Destination bits of a compute-instruction (bits 5..3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dest {
    pub a: bool,
    pub d: bool,
    pub m: bool,
}

impl Dest {
    pub const NONE: Dest = Dest { a: false, d: false, m: false };

    /// From the 3-bit pattern `a d m`.
    pub const fn from_bits(bits: u16) -> Self {
        Self {
            a: bits & 0b100 != 0,
            d: bits & 0b010 != 0,
            m: bits & 0b001 != 0,
        }
    }

    pub const fn bits(self) -> u16 {
        (self.a as u16) << 2 | (self.d as u16) << 1 | self.m as u16
    }

    /// Assembly mnemonic (`AMD` order), `None` when nothing is stored.
    pub const fn mnemonic(self) -> Option<&'static str> {
        match (self.a, self.d, self.m) {
            (false, false, false) => None,
            (false, false, true) => Some("M"),
            (false, true, false) => Some("D"),
            (false, true, true) => Some("MD"),
            (true, false, false) => Some("A"),
            (true, false, true) => Some("AM"),
            (true, true, false) => Some("AD"),
            (true, true, true) => Some("AMD"),
        }
    }
}

/// A decoded Hack instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    /// `@value`: load a 15-bit literal into A.
    Address(Addr15),

    /// `dest=comp;jump`.
    Compute {
        control: AluControl,
        /// Take the ALU's y operand from inM instead of A.
        use_memory: bool,
        dest: Dest,
        jump: JumpCode,
    },
}

impl Instruction {
    /// Shorthand for a compute-instruction with a canonical ALU operation.
    pub const fn compute(op: AluOp, use_memory: bool, dest: Dest, jump: JumpCode) -> Self {
        Instruction::Compute {
            control: op.control(),
            use_memory,
            dest,
            jump,
        }
    }

    pub const fn is_compute(&self) -> bool {
        matches!(self, Instruction::Compute { .. })
    }

    /// Control signals driven into the datapath.
    pub const fn signals(&self) -> ControlSignals {
        match *self {
            Instruction::Address(_) => ControlSignals {
                is_compute: false,
                control: AluControl::from_bits(0),
                use_memory: false,
                load_a: true,
                load_d: false,
                write_m: false,
                jump: JumpCode::Never,
            },
            Instruction::Compute { control, use_memory, dest, jump } => ControlSignals {
                is_compute: true,
                control,
                use_memory,
                load_a: dest.a,
                load_d: dest.d,
                write_m: dest.m,
                jump,
            },
        }
    }
}

/// Datapath control signals for one cycle.
///
/// Compute-only fields are neutral for address-instructions, so the literal
/// bits never reach the ALU controls, the load enables or the jump unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSignals {
    pub is_compute: bool,
    pub control: AluControl,
    pub use_memory: bool,
    pub load_a: bool,
    pub load_d: bool,
    pub write_m: bool,
    pub jump: JumpCode,
}

/// Decode a 16-bit instruction word. Total over all inputs.
pub fn decode(word: Word16) -> Instruction {
    if !word.bit(15) {
        return Instruction::Address(word.low15());
    }

    Instruction::Compute {
        control: AluControl::from_bits(word.field(6, 6)),
        use_memory: word.bit(12),
        dest: Dest::from_bits(word.field(3, 3)),
        jump: JumpCode::from_bits(word.field(0, 3)),
    }
}

/// Encode an instruction to its canonical word.
///
/// Compute-instructions get the conventional `111` prefix in bits 15..13.
pub fn encode(instr: &Instruction) -> Word16 {
    match *instr {
        Instruction::Address(value) => Word16::from(value),
        Instruction::Compute { control, use_memory, dest, jump } => Word16::new(
            0b111 << 13
                | (use_memory as u16) << 12
                | control.bits() << 6
                | dest.bits() << 3
                | jump.bits(),
        ),
    }
}
