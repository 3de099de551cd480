//! Per-cycle trace records.

use crate::bits::{Addr15, Word16};
use crate::cpu::alu::AluFlags;
use crate::cpu::execute::{CycleOutputs, RegisterState};
use crate::listing::disasm::disassemble_word;
use serde::{Serialize, Deserialize};

/// One clocked cycle: inputs, outputs and the state it committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRecord {
    /// Edges committed before this one.
    pub cycle: u64,
    /// PC the instruction was fetched from.
    pub pc: Addr15,
    pub instruction: Word16,
    pub in_m: Word16,
    pub reset: bool,
    pub outputs: CycleOutputs,
    pub flags: AluFlags,
    pub jump: bool,
    pub next: RegisterState,
}

impl CycleRecord {
    /// One-line summary for trace output.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{:05}: {:<14} A={:<6} D={:<6} PC'={}",
            self.pc,
            disassemble_word(self.instruction),
            self.next.a().to_i16(),
            self.next.d().to_i16(),
            self.next.pc(),
        );
        if self.outputs.write_m {
            line.push_str(&format!(
                "  RAM[{}]<-{}",
                self.outputs.address_m,
                self.outputs.out_m.to_i16()
            ));
        }
        line
    }
}
