//! CPU cycle for the Hack.
//!
//! A cycle runs in two phases. [`evaluate`] is the combinational phase: a
//! pure function from the stored registers and this cycle's inputs to the
//! memory outputs and the next register values. [`Cpu::step`] then commits
//! that next state in a single assignment, which is the clock edge.

use crate::bits::{Addr15, Word16, WidthError};
use crate::cpu::alu::{self, AluFlags};
use crate::cpu::counter::ProgramCounter;
use crate::cpu::decode::decode;
use crate::cpu::jump::take_jump;
use crate::cpu::registers::{Register, RegisterFile};
use crate::cpu::trace::CycleRecord;
use serde::{Serialize, Deserialize};

/// Everything the CPU stores between clock edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegisterState {
    #[serde(flatten)]
    pub regs: RegisterFile,
    pub pc: ProgramCounter,
}

impl RegisterState {
    /// A, D and PC all zero.
    pub const fn new() -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: ProgramCounter::zero(),
        }
    }

    pub const fn with_values(a: Word16, d: Word16, pc: Addr15) -> Self {
        Self {
            regs: RegisterFile {
                a: Register::with_value(a),
                d: Register::with_value(d),
            },
            pc: ProgramCounter::at(pc),
        }
    }

    #[inline]
    pub const fn a(&self) -> Word16 {
        self.regs.a.get()
    }

    #[inline]
    pub const fn d(&self) -> Word16 {
        self.regs.d.get()
    }

    #[inline]
    pub const fn pc(&self) -> Addr15 {
        self.pc.get()
    }
}

/// Signals the CPU drives towards data memory during a cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleOutputs {
    /// Value to store. Only meaningful while `write_m` is set.
    pub out_m: Word16,
    pub write_m: bool,
    /// Low 15 bits of A as stored before this cycle's edge.
    pub address_m: Addr15,
}

/// Result of the combinational phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub outputs: CycleOutputs,
    pub flags: AluFlags,
    /// Whether the jump unit selected A as the next PC.
    pub jump: bool,
    /// State to commit at the clock edge.
    pub next: RegisterState,
}

/// Combinational phase of one cycle.
///
/// Reads only `state` as it was before the edge. Every instruction word and
/// register state is a valid input.
pub fn evaluate(state: &RegisterState, instruction: Word16, in_m: Word16, reset: bool) -> Cycle {
    let instr = decode(instruction);
    let signals = instr.signals();

    let a = state.a();
    let d = state.d();

    let y = if signals.use_memory { in_m } else { a };
    let result = alu::compute(d, y, signals.control);

    let jump = take_jump(signals.is_compute, result.flags, signals.jump);

    let outputs = CycleOutputs {
        out_m: result.out,
        write_m: signals.write_m,
        address_m: a.low15(),
    };

    // A takes the raw word on an address-instruction, the ALU result otherwise.
    let a_in = if signals.is_compute { result.out } else { instruction };

    let next = RegisterState {
        regs: state.regs.latch(a_in, signals.load_a, result.out, signals.load_d),
        pc: state.pc.next(reset, jump, a.low15()),
    };

    Cycle {
        outputs,
        flags: result.flags,
        jump,
        next,
    }
}

/// The Hack CPU.
///
/// Owns its register state; memory lives with the caller, who fetches
/// `rom[cpu.pc()]`, supplies `ram[cpu.address_m()]` as `in_m`, and stores
/// `out_m` when `write_m` is set.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cpu {
    state: RegisterState,
    /// Clock edges since construction or the last [`Cpu::reset`].
    cycles: u64,
}

impl Cpu {
    /// Create a new CPU with zeroed state.
    pub const fn new() -> Self {
        Self {
            state: RegisterState::new(),
            cycles: 0,
        }
    }

    /// Start from an arbitrary register state.
    pub const fn with_state(state: RegisterState) -> Self {
        Self { state, cycles: 0 }
    }

    /// Zero A, D and PC.
    pub fn reset(&mut self) {
        self.state = RegisterState::new();
        self.cycles = 0;
    }

    /// Run one clock cycle and return this cycle's memory outputs.
    pub fn step(&mut self, instruction: Word16, in_m: Word16, reset: bool) -> CycleOutputs {
        let cycle = evaluate(&self.state, instruction, in_m, reset);
        self.commit(&cycle, reset);
        cycle.outputs
    }

    /// Like [`Cpu::step`], for callers holding wider integers.
    ///
    /// Values that do not fit 16 bits are rejected before anything changes.
    pub fn try_step(&mut self, instruction: u32, in_m: u32, reset: bool) -> Result<CycleOutputs, WidthError> {
        let instruction = Word16::try_from(instruction)?;
        let in_m = Word16::try_from(in_m)?;
        Ok(self.step(instruction, in_m, reset))
    }

    /// Run one cycle and describe it.
    pub fn step_traced(&mut self, instruction: Word16, in_m: Word16, reset: bool) -> CycleRecord {
        let pc = self.state.pc();
        let cycle = evaluate(&self.state, instruction, in_m, reset);
        let record = CycleRecord {
            cycle: self.cycles,
            pc,
            instruction,
            in_m,
            reset,
            outputs: cycle.outputs,
            flags: cycle.flags,
            jump: cycle.jump,
            next: cycle.next,
        };
        self.commit(&cycle, reset);
        record
    }

    /// Evaluate a cycle without clocking it.
    pub fn peek(&self, instruction: Word16, in_m: Word16, reset: bool) -> Cycle {
        evaluate(&self.state, instruction, in_m, reset)
    }

    fn commit(&mut self, cycle: &Cycle, reset: bool) {
        if reset {
            tracing::debug!(from = %self.state.pc(), "reset asserted");
        }

        self.state = cycle.next;
        self.cycles += 1;

        tracing::trace!(
            cycle = self.cycles,
            pc = %self.state.pc(),
            a = self.state.a().get(),
            d = self.state.d().get(),
            write_m = cycle.outputs.write_m,
            address_m = %cycle.outputs.address_m,
            "clock edge"
        );
    }

    /// Address of the next instruction to fetch.
    #[inline]
    pub const fn pc(&self) -> Addr15 {
        self.state.pc()
    }

    /// `addressM` for the coming cycle.
    #[inline]
    pub const fn address_m(&self) -> Addr15 {
        self.state.a().low15()
    }

    #[inline]
    pub const fn a(&self) -> Word16 {
        self.state.a()
    }

    #[inline]
    pub const fn d(&self) -> Word16 {
        self.state.d()
    }

    #[inline]
    pub const fn state(&self) -> &RegisterState {
        &self.state
    }

    #[inline]
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cpu")
            .field("cycles", &self.cycles)
            .field("a", &self.state.regs.a)
            .field("d", &self.state.regs.d)
            .field("pc", &self.state.pc())
            .finish()
    }
}
