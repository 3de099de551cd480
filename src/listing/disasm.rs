//! Disassembler for Hack programs.
//!
//! Converts instruction words back to Hack assembly text.

use crate::bits::Word16;
use crate::cpu::alu::{AluControl, AluOp};
use crate::cpu::decode::{decode, Dest, Instruction};
use crate::cpu::jump::JumpCode;

/// Disassemble a single instruction word.
pub fn disassemble_word(word: Word16) -> String {
    format_instruction(&decode(word))
}

/// Disassemble a program listing, one numbered line per word.
pub fn disassemble(words: &[Word16]) -> String {
    let mut output = String::new();
    output.push_str("// Hack Disassembly\n");
    output.push_str("// ----------------\n\n");

    for (addr, word) in words.iter().enumerate() {
        let line = disassemble_word(*word);
        output.push_str(&format!("{:05}: {:<16} // {}\n", addr, line, word));
    }

    output
}

/// Format a decoded instruction as assembly text.
pub fn format_instruction(instr: &Instruction) -> String {
    match instr {
        Instruction::Address(value) => format!("@{}", value),
        Instruction::Compute { control, use_memory, dest, jump } => {
            format_compute(*control, *use_memory, *dest, *jump)
        }
    }
}

fn format_compute(control: AluControl, use_memory: bool, dest: Dest, jump: JumpCode) -> String {
    let comp = format_comp(control, use_memory);

    let mut text = String::new();
    if let Some(dest) = dest.mnemonic() {
        text.push_str(dest);
        text.push('=');
    }
    text.push_str(&comp);
    if let Some(jump) = jump.mnemonic() {
        text.push(';');
        text.push_str(jump);
    }
    text
}

/// Canonical computations use their mnemonic; anything else prints the raw
/// control bits with the operand it reads.
fn format_comp(control: AluControl, use_memory: bool) -> String {
    match AluOp::from_control(control) {
        Some(op) if use_memory => op.memory_mnemonic(),
        Some(op) => op.mnemonic().to_string(),
        None => {
            let y = if use_memory { 'M' } else { 'A' };
            format!("?{:06b}{}", control.bits(), y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_address() {
        assert_eq!(disassemble_word(Word16::new(0x0064)), "@100");
        assert_eq!(disassemble_word(Word16::new(0x7FFF)), "@32767");
    }

    #[test]
    fn test_disassemble_compute() {
        assert_eq!(disassemble_word(Word16::new(0xE308)), "M=D");
        assert_eq!(disassemble_word(Word16::new(0xEA87)), "0;JMP");
        assert_eq!(disassemble_word(Word16::new(0xF088)), "M=D+M");
        assert_eq!(disassemble_word(Word16::new(0xFC88)), "M=M-1");
        assert_eq!(disassemble_word(Word16::new(0xE306)), "D;JLE");
        assert_eq!(disassemble_word(Word16::new(0b1110_1111_1111_1000)), "AMD=1");
    }

    #[test]
    fn test_disassemble_non_canonical() {
        // 111 1 111110 010 000: control bits outside the standard table.
        let text = disassemble_word(Word16::new(0b1111_1111_1001_0000));
        assert_eq!(text, "D=?111110M");
    }

    #[test]
    fn test_disassemble_listing() {
        let listing = disassemble(&[Word16::new(2), Word16::new(0xEA88)]);
        assert!(listing.contains("00000: @2"));
        assert!(listing.contains("00001: M=0"));
        assert!(listing.contains("1110101010001000"));
    }
}
