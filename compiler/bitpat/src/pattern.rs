//! Compiled bit patterns.
//!
//! A [`BitPattern`] is the `(mask, value)` form of a pattern string: `mask`
//! has a 1 at every fixed position and `value` holds the fixed bits. Bits of
//! `value` outside `mask` are always zero.
//!
//! | pattern   | width | mask     | value    |
//! |-----------|-------|----------|----------|
//! | `b10?1`   | 4     | `0b1101` | `0b1001` |
//! | `h?3`     | 8     | `0x0f`   | `0x03`   |
//! | `b????`   | 4     | `0b0000` | `0b0000` |

mod parse;
mod radix;

use std::fmt;
use std::str::FromStr;

use bitpat_ir::{width_mask, ExprBuilder};

use crate::{PatternError, WidthError};

pub use radix::Radix;

/// A fixed-width bit pattern with wildcards.
///
/// Immutable after construction; cheap to copy and share across any number
/// of match tests and lookup tables.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitPattern {
    width: u32,
    mask: u128,
    value: u128,
}

#[derive(Copy, Clone)]
enum Compare {
    Eq,
    Ne,
}

impl BitPattern {
    /// Compile a pattern string such as `"b10?1"`, `"b0000_0011"` or `"h?3"`.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        parse::parse(pattern)
    }

    pub(crate) fn from_raw(width: u32, mask: u128, value: u128) -> Self {
        debug_assert_eq!(value & !mask, 0, "value bits outside mask");
        debug_assert_eq!(mask & !width_mask(width), 0, "mask wider than pattern");
        BitPattern { width, mask, value }
    }

    /// Number of bit positions.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// 1 at every fixed position.
    #[inline]
    pub fn mask(&self) -> u128 {
        self.mask
    }

    /// Fixed bits; 0 at every wildcard position.
    #[inline]
    pub fn value(&self) -> u128 {
        self.value
    }

    /// True when the pattern has no wildcards.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.mask == width_mask(self.width)
    }

    pub fn wildcard_count(&self) -> u32 {
        self.width - self.mask.count_ones()
    }

    /// Host-side match against a concrete value. Bits of `subject` above
    /// `width` are ignored.
    #[inline]
    pub fn matches(&self, subject: u128) -> bool {
        subject & self.mask == self.value
    }

    /// Whether some value of this width matches both patterns.
    pub fn overlaps(&self, other: &BitPattern) -> bool {
        self.width == other.width && (self.value ^ other.value) & self.mask & other.mask == 0
    }

    /// Emit `(subject & mask) == value`.
    ///
    /// A pattern without wildcards emits `subject == value` with no AND.
    pub fn emit_eq<B: ExprBuilder>(
        &self,
        builder: &mut B,
        subject: B::Value,
    ) -> Result<B::Value, WidthError> {
        self.check_subject(builder.width(subject))?;
        Ok(self.compare(builder, subject, Compare::Eq))
    }

    /// Emit `(subject & mask) != value`, the negation of [`emit_eq`](Self::emit_eq).
    pub fn emit_ne<B: ExprBuilder>(
        &self,
        builder: &mut B,
        subject: B::Value,
    ) -> Result<B::Value, WidthError> {
        self.check_subject(builder.width(subject))?;
        Ok(self.compare(builder, subject, Compare::Ne))
    }

    /// Emit the pattern as a literal constant of its width.
    ///
    /// Only exact patterns have a single value.
    pub fn to_constant<B: ExprBuilder>(&self, builder: &mut B) -> Result<B::Value, PatternError> {
        if !self.is_exact() {
            return Err(PatternError::WildcardInConstant {
                pattern: self.to_string(),
            });
        }
        Ok(builder.constant(self.width, self.value))
    }

    pub(crate) fn check_subject(&self, found: u32) -> Result<(), WidthError> {
        if found == self.width {
            Ok(())
        } else {
            Err(WidthError::Subject {
                pattern: self.to_string(),
                expected: self.width,
                found,
            })
        }
    }

    /// Emit the test. The subject width has already been checked.
    pub(crate) fn emit_eq_unchecked<B: ExprBuilder>(
        &self,
        builder: &mut B,
        subject: B::Value,
    ) -> B::Value {
        self.compare(builder, subject, Compare::Eq)
    }

    fn compare<B: ExprBuilder>(&self, builder: &mut B, subject: B::Value, op: Compare) -> B::Value {
        let value = builder.constant(self.width, self.value);
        let lhs = if self.is_exact() {
            subject
        } else {
            let mask = builder.constant(self.width, self.mask);
            builder.and(subject, mask)
        };
        tracing::trace!(pattern = %self, exact = self.is_exact(), "emitting pattern test");
        match op {
            Compare::Eq => builder.equal(value, lhs),
            Compare::Ne => builder.not_equal(value, lhs),
        }
    }
}

impl FromStr for BitPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BitPattern::new(s)
    }
}

/// Canonical binary rendering, e.g. `b10?1`. Re-parses to an equal pattern.
impl fmt::Display for BitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("b")?;
        for bit in (0..self.width).rev() {
            let symbol = if self.mask >> bit & 1 == 0 {
                '?'
            } else if self.value >> bit & 1 == 1 {
                '1'
            } else {
                '0'
            };
            fmt::Write::write_char(f, symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
