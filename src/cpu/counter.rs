//! The 15-bit program counter.

use crate::bits::Addr15;
use serde::{Serialize, Deserialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramCounter(Addr15);

impl ProgramCounter {
    pub const fn zero() -> Self {
        Self(Addr15::ZERO)
    }

    pub const fn at(addr: Addr15) -> Self {
        Self(addr)
    }

    #[inline]
    pub const fn get(&self) -> Addr15 {
        self.0
    }

    /// Value after the next clock edge.
    ///
    /// Priority: reset, then jump to `target`, then increment.
    pub const fn next(self, reset: bool, jump: bool, target: Addr15) -> Self {
        if reset {
            Self(Addr15::ZERO)
        } else if jump {
            Self(target)
        } else {
            Self(self.0.wrapping_inc())
        }
    }
}
