//! Hack CPU registers.
//!
//! The Hack has two 16-bit registers:
//! - A: address register, also a general operand and the jump target
//! - D: data register, always the ALU's x operand
//!
//! Both are edge-triggered. During a cycle they show their stored value;
//! a load takes effect at the next clock edge.

use crate::bits::Word16;
use serde::{Serialize, Deserialize};

/// A single 16-bit register.
#[derive(Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Register {
    value: Word16,
}

impl Register {
    pub const fn zero() -> Self {
        Self { value: Word16::ZERO }
    }

    pub const fn with_value(value: Word16) -> Self {
        Self { value }
    }

    /// The value visible during the current cycle.
    #[inline]
    pub const fn get(&self) -> Word16 {
        self.value
    }

    /// The value after the next clock edge.
    #[inline]
    pub const fn latch(self, input: Word16, load: bool) -> Self {
        if load {
            Self { value: input }
        } else {
            self
        }
    }
}

impl std::fmt::Debug for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#06x} ({})", self.value.get(), self.value.to_i16())
    }
}

/// The A/D register file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegisterFile {
    pub a: Register,
    pub d: Register,
}

impl RegisterFile {
    pub const fn new() -> Self {
        Self {
            a: Register::zero(),
            d: Register::zero(),
        }
    }

    /// Next values of both registers. Either one may hold.
    pub const fn latch(self, a_in: Word16, load_a: bool, d_in: Word16, load_d: bool) -> Self {
        Self {
            a: self.a.latch(a_in, load_a),
            d: self.d.latch(d_in, load_d),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_holds_without_load() {
        let reg = Register::with_value(Word16::new(7));
        let next = reg.latch(Word16::new(99), false);
        assert_eq!(next.get().get(), 7);
    }

    #[test]
    fn test_register_loads() {
        let reg = Register::zero();
        let next = reg.latch(Word16::new(99), true);
        assert_eq!(next.get().get(), 99);
        // The old copy keeps its value until it is replaced.
        assert_eq!(reg.get(), Word16::ZERO);
    }

    #[test]
    fn test_register_file_independent_loads() {
        let regs = RegisterFile {
            a: Register::with_value(Word16::new(1)),
            d: Register::with_value(Word16::new(2)),
        };

        let next = regs.latch(Word16::new(10), true, Word16::new(20), false);
        assert_eq!(next.a.get().get(), 10);
        assert_eq!(next.d.get().get(), 2);

        let next = regs.latch(Word16::new(10), false, Word16::new(20), true);
        assert_eq!(next.a.get().get(), 1);
        assert_eq!(next.d.get().get(), 20);
    }
}
