//! The Hack arithmetic logic unit.
//!
//! Six control bits select the operation. The inputs are preset in a fixed
//! order (zero, then negate, for each operand), combined with either `+` or
//! `&`, and the result is optionally negated.

use crate::bits::Word16;
use serde::{Serialize, Deserialize};

/// The six ALU control bits, in instruction order (bit 11 down to bit 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AluControl {
    /// Zero the x input.
    pub zx: bool,
    /// Negate the x input (after zx).
    pub nx: bool,
    /// Zero the y input.
    pub zy: bool,
    /// Negate the y input (after zy).
    pub ny: bool,
    /// `x + y` when set, `x & y` otherwise.
    pub f: bool,
    /// Negate the output.
    pub no: bool,
}

impl AluControl {
    /// Build from a 6-bit pattern laid out as `zx nx zy ny f no` (MSB first).
    pub const fn from_bits(bits: u16) -> Self {
        Self {
            zx: bits & 0b100000 != 0,
            nx: bits & 0b010000 != 0,
            zy: bits & 0b001000 != 0,
            ny: bits & 0b000100 != 0,
            f: bits & 0b000010 != 0,
            no: bits & 0b000001 != 0,
        }
    }

    /// The 6-bit pattern, `zx` first.
    pub const fn bits(self) -> u16 {
        (self.zx as u16) << 5
            | (self.nx as u16) << 4
            | (self.zy as u16) << 3
            | (self.ny as u16) << 2
            | (self.f as u16) << 1
            | self.no as u16
    }
}

/// Status flags derived from the ALU result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AluFlags {
    /// Result is zero.
    pub zr: bool,
    /// Result is negative (sign bit set).
    pub ng: bool,
}

impl AluFlags {
    pub const fn of(out: Word16) -> Self {
        Self {
            zr: out.is_zero(),
            ng: out.is_negative(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AluOutput {
    pub out: Word16,
    pub flags: AluFlags,
}

/// Run the ALU.
///
/// The add wraps at 16 bits; overflow is not an error.
pub fn compute(x: Word16, y: Word16, control: AluControl) -> AluOutput {
    let mut x = x;
    let mut y = y;

    if control.zx {
        x = Word16::ZERO;
    }
    if control.nx {
        x = !x;
    }
    if control.zy {
        y = Word16::ZERO;
    }
    if control.ny {
        y = !y;
    }

    let mut out = if control.f {
        x.wrapping_add(y)
    } else {
        x & y
    };

    if control.no {
        out = !out;
    }

    AluOutput {
        out,
        flags: AluFlags::of(out),
    }
}

/// The canonical Hack computations.
///
/// `x` is always D. `y` is A, or M when the instruction's `a` bit selects
/// the memory operand; the mnemonics here use `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AluOp {
    Zero,
    One,
    MinusOne,
    D,
    A,
    NotD,
    NotA,
    NegD,
    NegA,
    DPlusOne,
    APlusOne,
    DMinusOne,
    AMinusOne,
    DPlusA,
    DMinusA,
    AMinusD,
    DAndA,
    DOrA,
}

impl AluOp {
    pub const ALL: [AluOp; 18] = [
        AluOp::Zero,
        AluOp::One,
        AluOp::MinusOne,
        AluOp::D,
        AluOp::A,
        AluOp::NotD,
        AluOp::NotA,
        AluOp::NegD,
        AluOp::NegA,
        AluOp::DPlusOne,
        AluOp::APlusOne,
        AluOp::DMinusOne,
        AluOp::AMinusOne,
        AluOp::DPlusA,
        AluOp::DMinusA,
        AluOp::AMinusD,
        AluOp::DAndA,
        AluOp::DOrA,
    ];

    /// The 6-bit control pattern, `zx nx zy ny f no`.
    pub const fn bits(self) -> u16 {
        match self {
            AluOp::Zero => 0b101010,
            AluOp::One => 0b111111,
            AluOp::MinusOne => 0b111010,
            AluOp::D => 0b001100,
            AluOp::A => 0b110000,
            AluOp::NotD => 0b001101,
            AluOp::NotA => 0b110001,
            AluOp::NegD => 0b001111,
            AluOp::NegA => 0b110011,
            AluOp::DPlusOne => 0b011111,
            AluOp::APlusOne => 0b110111,
            AluOp::DMinusOne => 0b001110,
            AluOp::AMinusOne => 0b110010,
            AluOp::DPlusA => 0b000010,
            AluOp::DMinusA => 0b010011,
            AluOp::AMinusD => 0b000111,
            AluOp::DAndA => 0b000000,
            AluOp::DOrA => 0b010101,
        }
    }

    pub const fn control(self) -> AluControl {
        AluControl::from_bits(self.bits())
    }

    /// Recognize a canonical control pattern.
    pub fn from_control(control: AluControl) -> Option<Self> {
        let bits = control.bits();
        Self::ALL.into_iter().find(|op| op.bits() == bits)
    }

    /// Mnemonic with `y` written as `A`.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            AluOp::Zero => "0",
            AluOp::One => "1",
            AluOp::MinusOne => "-1",
            AluOp::D => "D",
            AluOp::A => "A",
            AluOp::NotD => "!D",
            AluOp::NotA => "!A",
            AluOp::NegD => "-D",
            AluOp::NegA => "-A",
            AluOp::DPlusOne => "D+1",
            AluOp::APlusOne => "A+1",
            AluOp::DMinusOne => "D-1",
            AluOp::AMinusOne => "A-1",
            AluOp::DPlusA => "D+A",
            AluOp::DMinusA => "D-A",
            AluOp::AMinusD => "A-D",
            AluOp::DAndA => "D&A",
            AluOp::DOrA => "D|A",
        }
    }

    /// Mnemonic with `y` written as `M`.
    pub fn memory_mnemonic(self) -> String {
        self.mnemonic().replace('A', "M")
    }

    /// Whether the result depends on `y`.
    pub const fn reads_y(self) -> bool {
        matches!(
            self,
            AluOp::A
                | AluOp::NotA
                | AluOp::NegA
                | AluOp::APlusOne
                | AluOp::AMinusOne
                | AluOp::DPlusA
                | AluOp::DMinusA
                | AluOp::AMinusD
                | AluOp::DAndA
                | AluOp::DOrA
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const OPERANDS: [i16; 7] = [0, 1, -1, 17, -3, 32767, -32768];

    /// Reference semantics for each canonical row.
    fn expected(op: AluOp, d: i16, a: i16) -> i16 {
        match op {
            AluOp::Zero => 0,
            AluOp::One => 1,
            AluOp::MinusOne => -1,
            AluOp::D => d,
            AluOp::A => a,
            AluOp::NotD => !d,
            AluOp::NotA => !a,
            AluOp::NegD => d.wrapping_neg(),
            AluOp::NegA => a.wrapping_neg(),
            AluOp::DPlusOne => d.wrapping_add(1),
            AluOp::APlusOne => a.wrapping_add(1),
            AluOp::DMinusOne => d.wrapping_sub(1),
            AluOp::AMinusOne => a.wrapping_sub(1),
            AluOp::DPlusA => d.wrapping_add(a),
            AluOp::DMinusA => d.wrapping_sub(a),
            AluOp::AMinusD => a.wrapping_sub(d),
            AluOp::DAndA => d & a,
            AluOp::DOrA => d | a,
        }
    }

    #[test]
    fn test_canonical_table() {
        for op in AluOp::ALL {
            for d in OPERANDS {
                for a in OPERANDS {
                    let result = compute(Word16::from_i16(d), Word16::from_i16(a), op.control());
                    let want = expected(op, d, a);
                    assert_eq!(result.out.to_i16(), want, "{} with D={} A={}", op.mnemonic(), d, a);
                    assert_eq!(result.flags.zr, want == 0, "zr for {}", op.mnemonic());
                    assert_eq!(result.flags.ng, want < 0, "ng for {}", op.mnemonic());
                }
            }
        }
    }

    #[test]
    fn test_constant_rows_ignore_operands() {
        let zero = compute(Word16::from_i16(1234), Word16::from_i16(-77), AluOp::Zero.control());
        assert_eq!(zero.out, Word16::ZERO);
        assert!(zero.flags.zr);
        assert!(!zero.flags.ng);

        let one = compute(Word16::ONES, Word16::ONES, AluOp::One.control());
        assert_eq!(one.out.to_i16(), 1);
        assert!(!one.flags.zr && !one.flags.ng);
    }

    #[test]
    fn test_zy_ny_add_is_decrement() {
        // y preset to all ones, so x + y is x - 1. Incrementing also needs nx and no.
        let control = AluControl { zx: false, nx: false, zy: true, ny: true, f: true, no: false };
        let out = compute(Word16::from_i16(41), Word16::from_i16(999), control).out;
        assert_eq!(out.to_i16(), 40);

        let out = compute(Word16::from_i16(41), Word16::from_i16(999), AluOp::DPlusOne.control()).out;
        assert_eq!(out.to_i16(), 42);
    }

    #[test]
    fn test_add_wraps_at_boundary() {
        let result = compute(Word16::from_i16(32767), Word16::from_i16(1), AluOp::DPlusA.control());
        assert_eq!(result.out.to_i16(), -32768);
        assert!(result.flags.ng);
    }

    #[test]
    fn test_control_bits_roundtrip() {
        for bits in 0..64u16 {
            assert_eq!(AluControl::from_bits(bits).bits(), bits);
        }
    }

    #[test]
    fn test_from_control_recognizes_only_canonical() {
        assert_eq!(AluOp::from_control(AluControl::from_bits(0b000010)), Some(AluOp::DPlusA));
        assert_eq!(AluOp::from_control(AluControl::from_bits(0b111111)), Some(AluOp::One));
        assert_eq!(AluOp::from_control(AluControl::from_bits(0b111110)), None);
    }

    #[test]
    fn test_memory_mnemonic() {
        assert_eq!(AluOp::AMinusD.memory_mnemonic(), "M-D");
        assert_eq!(AluOp::DOrA.memory_mnemonic(), "D|M");
        assert_eq!(AluOp::NegD.memory_mnemonic(), "-D");
    }

    proptest! {
        #[test]
        fn prop_add_matches_wrapping(d: i16, a: i16) {
            let out = compute(Word16::from_i16(d), Word16::from_i16(a), AluOp::DPlusA.control()).out;
            prop_assert_eq!(out.to_i16(), d.wrapping_add(a));
        }

        #[test]
        fn prop_subtract_both_ways(d: i16, a: i16) {
            let x = Word16::from_i16(d);
            let y = Word16::from_i16(a);
            prop_assert_eq!(compute(x, y, AluOp::DMinusA.control()).out.to_i16(), d.wrapping_sub(a));
            prop_assert_eq!(compute(x, y, AluOp::AMinusD.control()).out.to_i16(), a.wrapping_sub(d));
        }

        #[test]
        fn prop_flags_agree_with_output(x in any::<u16>(), y in any::<u16>(), bits in 0u16..64) {
            let result = compute(Word16::new(x), Word16::new(y), AluControl::from_bits(bits));
            prop_assert_eq!(result.flags.zr, result.out.get() == 0);
            prop_assert_eq!(result.flags.ng, result.out.to_i16() < 0);
            prop_assert!(!(result.flags.zr && result.flags.ng));
        }
    }
}
