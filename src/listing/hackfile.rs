//! `.hack` program files.
//!
//! The format is plain text:
//! - One instruction per line, exactly 16 binary digits, MSB first
//! - Lines starting with `//` are comments, as is anything after `//`
//! - Blank lines are ignored

use crate::bits::Word16;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// A loaded program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HackFile {
    pub words: Vec<Word16>,
}

impl HackFile {
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    pub fn push(&mut self, word: Word16) {
        self.words.push(word);
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Parse `.hack` text.
pub fn parse_hack(source: &str) -> Result<HackFile, HackFileError> {
    let mut file = HackFile::new();

    for (line_num, line) in source.lines().enumerate() {
        let code = match line.find("//") {
            Some(idx) => &line[..idx],
            None => line,
        };
        let code = code.trim();

        if code.is_empty() {
            continue;
        }

        if code.len() != 16 {
            return Err(HackFileError::Parse {
                line: line_num + 1,
                message: format!("expected 16 binary digits, found {}", code.chars().count()),
            });
        }

        let word = Word16::parse_binary(code)
            .map_err(|e| HackFileError::Parse {
                line: line_num + 1,
                message: e.to_string(),
            })?;

        file.push(word);
    }

    Ok(file)
}

/// Load a `.hack` file from disk.
pub fn load_hack<P: AsRef<Path>>(path: P) -> Result<HackFile, HackFileError> {
    let source = std::fs::read_to_string(path.as_ref())?;
    let file = parse_hack(&source)?;
    tracing::debug!(path = %path.as_ref().display(), words = file.len(), "loaded program");
    Ok(file)
}

/// Save a `.hack` file to disk.
pub fn save_hack<P: AsRef<Path>>(path: P, file: &HackFile) -> Result<(), HackFileError> {
    let mut out = std::fs::File::create(path.as_ref())?;
    for word in &file.words {
        writeln!(out, "{}", word)?;
    }
    Ok(())
}

/// Errors that can occur reading or writing program files.
#[derive(Debug, Error)]
pub enum HackFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}
