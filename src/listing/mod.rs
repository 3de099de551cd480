//! Program listings for the Hack CPU.
//!
//! This module provides:
//! - A disassembler (instruction words → readable text)
//! - The `.hack` text format (one binary word per line)

pub mod disasm;
pub mod hackfile;

pub use disasm::{disassemble, disassemble_word};
pub use hackfile::{HackFile, HackFileError, load_hack, parse_hack, save_hack};
