//! Fixed-width binary words.
//!
//! The Hack datapath carries two widths:
//! - `Word16`: instructions, memory words and the A/D registers
//! - `Addr15`: memory addresses and the program counter

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// A 16-bit data word.
///
/// Arithmetic treats the bits as two's complement: bit 15 is the sign.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word16(u16);

/// A 15-bit address.
///
/// Used for `addressM` and the program counter. Values are always below
/// `0x8000`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Addr15(u16);

// ============================================================================
// Word16 Implementation
// ============================================================================

impl Word16 {
    /// Number of bits in a Word16.
    pub const WIDTH: u32 = 16;

    /// All bits clear.
    pub const ZERO: Self = Self(0);

    /// All bits set (-1 in two's complement).
    pub const ONES: Self = Self(0xFFFF);

    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Create from a wider unsigned value.
    ///
    /// # Panics
    /// Panics if value does not fit in 16 bits.
    pub fn from_u32(value: u32) -> Self {
        assert!(
            value <= u16::MAX as u32,
            "Value {:#x} out of range for Word16 [0, {:#x}]",
            value, u16::MAX
        );
        Self(value as u16)
    }

    /// Create from a signed value using two's complement.
    #[inline]
    pub const fn from_i16(value: i16) -> Self {
        Self(value as u16)
    }

    /// Raw bit pattern.
    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Two's complement reading of the bits.
    #[inline]
    pub const fn to_i16(self) -> i16 {
        self.0 as i16
    }

    /// Get a single bit by index (0 = LSB).
    #[inline]
    pub const fn bit(self, index: u32) -> bool {
        (self.0 >> index) & 1 == 1
    }

    /// Extract `len` bits starting at `lo`.
    #[inline]
    pub const fn field(self, lo: u32, len: u32) -> u16 {
        (self.0 >> lo) & ((1 << len) - 1)
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Sign bit set.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.bit(15)
    }

    /// The low 15 bits, as an address.
    #[inline]
    pub const fn low15(self) -> Addr15 {
        Addr15(self.0 & Addr15::MASK)
    }

    #[inline]
    pub const fn wrapping_add(self, other: Self) -> Self {
        Self(self.0.wrapping_add(other.0))
    }

    /// Parse from decimal (`-1`, `42`), hex (`0x7fff`) or binary
    /// (`0b1110...`, or exactly 16 bare binary digits).
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }

        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            let value = u32::from_str_radix(hex, 16)
                .map_err(|_| ParseError::InvalidNumber(s.to_string()))?;
            return Ok(Self::try_from(value)?);
        }

        if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
            return Self::parse_binary(bin);
        }

        if s.len() == 16 && s.chars().all(|c| c == '0' || c == '1') {
            return Self::parse_binary(s);
        }

        if let Some(digits) = s.strip_prefix('-') {
            let magnitude: u32 = digits.parse()
                .map_err(|_| ParseError::InvalidNumber(s.to_string()))?;
            if magnitude > 0x8000 {
                return Err(ParseError::Width(WidthError { value: magnitude, width: Self::WIDTH }));
            }
            return Ok(Self((magnitude as u16).wrapping_neg()));
        }

        let value: u32 = s.parse()
            .map_err(|_| ParseError::InvalidNumber(s.to_string()))?;
        Ok(Self::try_from(value)?)
    }

    /// Parse a string of up to 16 binary digits (MSB first).
    pub fn parse_binary(s: &str) -> Result<Self, ParseError> {
        if s.is_empty() || s.len() > 16 {
            return Err(ParseError::WrongLength { expected: 16, got: s.len() });
        }

        let mut value: u16 = 0;
        for c in s.chars() {
            let bit = match c {
                '0' => 0,
                '1' => 1,
                _ => return Err(ParseError::InvalidChar(c)),
            };
            value = (value << 1) | bit;
        }

        Ok(Self(value))
    }
}

impl fmt::Debug for Word16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word16({:#06x} = {})", self.0, self.to_i16())
    }
}

impl fmt::Display for Word16 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}

impl std::ops::Not for Word16 {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl std::ops::BitAnd for Word16 {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl From<u16> for Word16 {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Word16> for u16 {
    fn from(word: Word16) -> Self {
        word.0
    }
}

impl From<Addr15> for Word16 {
    fn from(addr: Addr15) -> Self {
        Self(addr.0)
    }
}

impl TryFrom<u32> for Word16 {
    type Error = WidthError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value > u16::MAX as u32 {
            return Err(WidthError { value, width: Self::WIDTH });
        }
        Ok(Self(value as u16))
    }
}

// ============================================================================
// Addr15 Implementation
// ============================================================================

impl Addr15 {
    /// Number of bits in an Addr15.
    pub const WIDTH: u32 = 15;

    /// Highest address: 0x7FFF.
    pub const MAX: u16 = 0x7FFF;

    const MASK: u16 = 0x7FFF;

    pub const ZERO: Self = Self(0);

    /// Create an address.
    ///
    /// # Panics
    /// Panics if value does not fit in 15 bits.
    pub fn new(value: u16) -> Self {
        assert!(
            value <= Self::MAX,
            "Value {:#x} out of range for Addr15 [0, {:#x}]",
            value, Self::MAX
        );
        Self(value)
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Usable as an index into a memory array.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Next address, wrapping from 0x7FFF back to 0.
    #[inline]
    pub const fn wrapping_inc(self) -> Self {
        Self(self.0.wrapping_add(1) & Self::MASK)
    }
}

impl fmt::Debug for Addr15 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Addr15({})", self.0)
    }
}

impl fmt::Display for Addr15 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Addr15> for u16 {
    fn from(addr: Addr15) -> Self {
        addr.0
    }
}

impl TryFrom<u16> for Addr15 {
    type Error = WidthError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::try_from(value as u32)
    }
}

impl TryFrom<u32> for Addr15 {
    type Error = WidthError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value > Self::MAX as u32 {
            return Err(WidthError { value, width: Self::WIDTH });
        }
        Ok(Self(value as u16))
    }
}

/// A raw value that does not fit the signal it was meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value {value:#x} does not fit in {width} bits")]
pub struct WidthError {
    pub value: u32,
    pub width: u32,
}

/// Errors from parsing word text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("wrong length: expected at most {expected} binary digits, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("invalid binary digit: '{0}'")]
    InvalidChar(char),

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error(transparent)]
    Width(#[from] WidthError),
}
