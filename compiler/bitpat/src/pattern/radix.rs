//! Symbol radixes and their digit-to-bit-group expansion.

use std::fmt;

/// Radix of a pattern's symbols, selected by its leading marker.
///
/// Each variant owns its expansion rule: a digit becomes a fully fixed group
/// of [`bits_per_symbol`](Radix::bits_per_symbol) bits, and `?` becomes a
/// fully wildcarded group of the same size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Radix {
    /// `b` prefix, or no prefix at all.
    #[default]
    Binary,
    /// `o` prefix.
    Octal,
    /// `h` or `x` prefix. Digits are case-insensitive.
    Hex,
}

/// Bit group produced by one symbol, right-aligned.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct BitGroup {
    pub mask: u128,
    pub value: u128,
}

impl Radix {
    /// Radix selected by a leading prefix character, if it is one.
    pub fn from_prefix(c: char) -> Option<Radix> {
        match c {
            'b' => Some(Radix::Binary),
            'o' => Some(Radix::Octal),
            'h' | 'x' => Some(Radix::Hex),
            _ => None,
        }
    }

    /// Bit positions covered by one symbol.
    pub const fn bits_per_symbol(self) -> u32 {
        match self {
            Radix::Binary => 1,
            Radix::Octal => 3,
            Radix::Hex => 4,
        }
    }

    const fn base(self) -> u32 {
        1 << self.bits_per_symbol()
    }

    /// Expand one symbol into its bit group, or `None` if the symbol is not
    /// in this radix's alphabet.
    pub(crate) fn expand(self, symbol: char) -> Option<BitGroup> {
        if symbol == '?' {
            return Some(BitGroup { mask: 0, value: 0 });
        }
        let digit = symbol.to_digit(self.base())?;
        Some(BitGroup {
            mask: (1u128 << self.bits_per_symbol()) - 1,
            value: u128::from(digit),
        })
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Radix::Binary => "binary",
            Radix::Octal => "octal",
            Radix::Hex => "hex",
        })
    }
}
