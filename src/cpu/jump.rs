//! Jump condition unit.

use crate::cpu::alu::AluFlags;
use serde::{Serialize, Deserialize};

/// The 3-bit jump field of a compute-instruction.
///
/// Bit 2 jumps on a negative result, bit 1 on zero, bit 0 on positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JumpCode {
    #[default]
    Never,
    Jgt,
    Jeq,
    Jge,
    Jlt,
    Jne,
    Jle,
    Always,
}

impl JumpCode {
    pub const ALL: [JumpCode; 8] = [
        JumpCode::Never,
        JumpCode::Jgt,
        JumpCode::Jeq,
        JumpCode::Jge,
        JumpCode::Jlt,
        JumpCode::Jne,
        JumpCode::Jle,
        JumpCode::Always,
    ];

    /// Decode the low three bits; higher bits are ignored.
    pub const fn from_bits(bits: u16) -> Self {
        match bits & 0b111 {
            0b000 => JumpCode::Never,
            0b001 => JumpCode::Jgt,
            0b010 => JumpCode::Jeq,
            0b011 => JumpCode::Jge,
            0b100 => JumpCode::Jlt,
            0b101 => JumpCode::Jne,
            0b110 => JumpCode::Jle,
            _ => JumpCode::Always,
        }
    }

    pub const fn bits(self) -> u16 {
        match self {
            JumpCode::Never => 0b000,
            JumpCode::Jgt => 0b001,
            JumpCode::Jeq => 0b010,
            JumpCode::Jge => 0b011,
            JumpCode::Jlt => 0b100,
            JumpCode::Jne => 0b101,
            JumpCode::Jle => 0b110,
            JumpCode::Always => 0b111,
        }
    }

    /// Assembly mnemonic, `None` for the no-jump code.
    pub const fn mnemonic(self) -> Option<&'static str> {
        match self {
            JumpCode::Never => None,
            JumpCode::Jgt => Some("JGT"),
            JumpCode::Jeq => Some("JEQ"),
            JumpCode::Jge => Some("JGE"),
            JumpCode::Jlt => Some("JLT"),
            JumpCode::Jne => Some("JNE"),
            JumpCode::Jle => Some("JLE"),
            JumpCode::Always => Some("JMP"),
        }
    }

    /// Whether the condition holds for an ALU result with these flags.
    pub const fn taken(self, flags: AluFlags) -> bool {
        let AluFlags { zr, ng } = flags;
        match self {
            JumpCode::Never => false,
            JumpCode::Jgt => !zr && !ng,
            JumpCode::Jeq => zr,
            JumpCode::Jge => zr || !ng,
            JumpCode::Jlt => ng,
            JumpCode::Jne => !zr,
            JumpCode::Jle => zr || ng,
            JumpCode::Always => true,
        }
    }
}

/// The take-jump decision. Address-instructions never jump.
pub const fn take_jump(is_compute: bool, flags: AluFlags, code: JumpCode) -> bool {
    is_compute && code.taken(flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSITIVE: AluFlags = AluFlags { zr: false, ng: false };
    const ZERO: AluFlags = AluFlags { zr: true, ng: false };
    const NEGATIVE: AluFlags = AluFlags { zr: false, ng: true };

    #[test]
    fn test_jump_table() {
        // (code, positive, zero, negative)
        let table = [
            (JumpCode::Never, false, false, false),
            (JumpCode::Jgt, true, false, false),
            (JumpCode::Jeq, false, true, false),
            (JumpCode::Jge, true, true, false),
            (JumpCode::Jlt, false, false, true),
            (JumpCode::Jne, true, false, true),
            (JumpCode::Jle, false, true, true),
            (JumpCode::Always, true, true, true),
        ];

        for (code, pos, zero, neg) in table {
            assert_eq!(code.taken(POSITIVE), pos, "{:?} on positive", code);
            assert_eq!(code.taken(ZERO), zero, "{:?} on zero", code);
            assert_eq!(code.taken(NEGATIVE), neg, "{:?} on negative", code);
        }
    }

    #[test]
    fn test_bit_layout_matches_conditions() {
        // Each set bit enables one of lt/eq/gt.
        for code in JumpCode::ALL {
            let bits = code.bits();
            assert_eq!(JumpCode::from_bits(bits), code);
            assert_eq!(code.taken(NEGATIVE), bits & 0b100 != 0);
            assert_eq!(code.taken(ZERO), bits & 0b010 != 0);
            assert_eq!(code.taken(POSITIVE), bits & 0b001 != 0);
        }
    }

    #[test]
    fn test_address_instruction_never_jumps() {
        for code in JumpCode::ALL {
            for flags in [POSITIVE, ZERO, NEGATIVE] {
                assert!(!take_jump(false, flags, code));
            }
        }
        assert!(take_jump(true, ZERO, JumpCode::Jeq));
    }

    #[test]
    fn test_mnemonics() {
        assert_eq!(JumpCode::Never.mnemonic(), None);
        assert_eq!(JumpCode::Always.mnemonic(), Some("JMP"));
        assert_eq!(JumpCode::from_bits(0b1011).mnemonic(), Some("JGE"));
    }
}
