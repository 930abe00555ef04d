//! Error types for pattern construction and expression emission.
//!
//! Every error carries a stable [`ErrorCode`]:
//! - E0xxx: pattern syntax, raised while parsing a pattern string
//! - E1xxx: width errors, raised before any expression is emitted

use std::fmt;

use bitpat_ir::MAX_WIDTH;

use crate::Radix;

/// Stable error codes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Pattern has no bit positions
    E0001,
    /// Symbol outside the radix alphabet
    E0002,
    /// Leading, trailing or doubled `_` separator
    E0003,
    /// Pattern wider than the supported maximum
    E0004,
    /// Wildcard pattern used as a constant
    E0005,
    /// Subject width differs from pattern width
    E1001,
    /// Output width differs from the default's width
    E1002,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
        }
    }

    /// Parse a code such as `"E0002"` (case-insensitive).
    pub fn parse(code: &str) -> Option<ErrorCode> {
        const ALL: [ErrorCode; 7] = [
            ErrorCode::E0001,
            ErrorCode::E0002,
            ErrorCode::E0003,
            ErrorCode::E0004,
            ErrorCode::E0005,
            ErrorCode::E1001,
            ErrorCode::E1002,
        ];
        ALL.into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(code))
    }

    /// Long-form explanation for `--explain`.
    pub fn explanation(self) -> &'static str {
        match self {
            ErrorCode::E0001 => {
                "A pattern must contain at least one symbol. `b` and the empty \
                 string describe zero bit positions."
            }
            ErrorCode::E0002 => {
                "Every symbol must be a digit of the pattern's radix or `?`. \
                 Binary (`b` or no prefix) accepts 0 and 1, octal (`o`) accepts \
                 0-7, hex (`h` or `x`) accepts 0-9 and a-f in either case."
            }
            ErrorCode::E0003 => {
                "`_` may only appear between two symbols. A pattern cannot start \
                 or end with `_`, and separators cannot be doubled."
            }
            ErrorCode::E0004 => "Patterns are limited to 128 bit positions.",
            ErrorCode::E0005 => {
                "Only a pattern without `?` has a single value. Remove the \
                 wildcards or use the pattern as a match test instead."
            }
            ErrorCode::E1001 => {
                "The subject of a match test must be exactly as wide as the \
                 pattern. Subjects are never widened or truncated implicitly."
            }
            ErrorCode::E1002 => {
                "Every output of a lookup table must be as wide as its default."
            }
        }
    }

    /// Whether this is a pattern syntax error.
    pub fn is_pattern_error(self) -> bool {
        self.as_str().starts_with("E0")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pattern string could not be compiled.
///
/// Offsets are byte offsets into the full pattern string, radix prefix
/// included.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern has no bit positions")]
    Empty,
    #[error("invalid {radix} symbol `{symbol}` at offset {offset}")]
    InvalidSymbol {
        symbol: char,
        offset: usize,
        radix: Radix,
    },
    #[error("misplaced `_` separator at offset {offset}")]
    MisplacedSeparator { offset: usize },
    #[error("pattern is {width} bits wide, at most {max} are supported", max = MAX_WIDTH)]
    TooWide { width: u32 },
    #[error("pattern `{pattern}` contains wildcards and has no constant value")]
    WildcardInConstant { pattern: String },
}

impl PatternError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PatternError::Empty => ErrorCode::E0001,
            PatternError::InvalidSymbol { .. } => ErrorCode::E0002,
            PatternError::MisplacedSeparator { .. } => ErrorCode::E0003,
            PatternError::TooWide { .. } => ErrorCode::E0004,
            PatternError::WildcardInConstant { .. } => ErrorCode::E0005,
        }
    }

    /// Byte offset of the offending character, when there is one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            PatternError::InvalidSymbol { offset, .. }
            | PatternError::MisplacedSeparator { offset } => Some(*offset),
            _ => None,
        }
    }
}

/// Operand widths disagree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WidthError {
    #[error("subject is {found} bits wide but pattern `{pattern}` is {expected} bits wide")]
    Subject {
        pattern: String,
        expected: u32,
        found: u32,
    },
    #[error("output of entry {index} is {found} bits wide, the default is {expected} bits wide")]
    Output {
        index: usize,
        expected: u32,
        found: u32,
    },
}

impl WidthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            WidthError::Subject { .. } => ErrorCode::E1001,
            WidthError::Output { .. } => ErrorCode::E1002,
        }
    }
}

/// Any error raised by this crate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Width(#[from] WidthError),
}

impl Error {
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Pattern(err) => err.code(),
            Error::Width(err) => err.code(),
        }
    }
}
