//! Fixed-width binary signal types.
//!
//! - [`Word16`] - a 16-bit word (instructions, data, A and D registers)
//! - [`Addr15`] - a 15-bit address (`addressM` and the program counter)

mod word;

pub use word::{Word16, Addr15, WidthError, ParseError};
