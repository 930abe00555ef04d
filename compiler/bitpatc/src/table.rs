//! Lookup table files.
//!
//! ```text
//! # RV32I loads
//! width = 32
//!
//! b?????????????????000?????0000011 => 0xBAD    # lb
//! b?????????????????100?????0000011 => 0xBEEF   # lbu
//! default => 0
//! ```
//!
//! One `<pattern> => <value>` entry per line, in priority order, plus exactly
//! one `default => <value>`. Directives: `width = <n>` sets the output width
//! (default 32), `subject = <n>` sets the subject width (default: the width of
//! the first pattern). `#` starts a comment.

use bitpat::{BitPattern, PatternError};
use bitpat_ir::{width_mask, MAX_WIDTH};

use crate::number::parse_number;

/// Output width when the file has no `width` directive.
pub const DEFAULT_OUTPUT_WIDTH: u32 = 32;

/// A parsed pattern entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableEntry {
    pub pattern: BitPattern,
    pub output: u128,
    /// 1-based source line.
    pub line: usize,
}

/// A parsed table file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableFile {
    pub output_width: u32,
    pub subject_width: Option<u32>,
    pub entries: Vec<TableEntry>,
    pub default: u128,
}

impl TableFile {
    /// Subject width: explicit, else the first pattern's, else [`MAX_WIDTH`].
    pub fn subject_width(&self) -> u32 {
        self.subject_width
            .or_else(|| self.entries.first().map(|e| e.pattern.width()))
            .unwrap_or(MAX_WIDTH)
    }
}

/// Table file errors. Lines are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("line {line}: {source}")]
    Pattern {
        line: usize,
        /// Byte column of the pattern within the line.
        column: usize,
        text: String,
        source: PatternError,
    },
    #[error("line {line}: invalid number `{text}`")]
    Number { line: usize, text: String },
    #[error("line {line}: invalid width `{text}`, expected 1..={max}", max = MAX_WIDTH)]
    Width { line: usize, text: String },
    #[error("line {line}: unknown directive `{key}`")]
    UnknownDirective { line: usize, key: String },
    #[error("line {line}: expected `<pattern> => <value>` or `<key> = <value>`")]
    Syntax { line: usize },
    #[error("line {line}: duplicate `default` entry")]
    DuplicateDefault { line: usize },
    #[error("missing `default => <value>` entry")]
    MissingDefault,
    #[error("line {line}: value {value:#x} does not fit in {width} bits")]
    ValueTooWide { line: usize, value: u128, width: u32 },
}

/// Parse a table file's contents.
pub fn parse_table(source: &str) -> Result<TableFile, TableError> {
    let mut output_width = None;
    let mut subject_width = None;
    let mut entries = Vec::new();
    let mut default: Option<(u128, usize)> = None;

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let content = raw.split_once('#').map_or(raw, |(before, _)| before);
        if content.trim().is_empty() {
            continue;
        }

        if let Some((lhs, rhs)) = content.split_once("=>") {
            let output = number(rhs, line)?;
            let key = lhs.trim();
            if key == "default" {
                if default.is_some() {
                    return Err(TableError::DuplicateDefault { line });
                }
                default = Some((output, line));
                continue;
            }
            let column = lhs.len() - lhs.trim_start().len();
            let pattern = BitPattern::new(key).map_err(|source| TableError::Pattern {
                line,
                column,
                text: raw.to_owned(),
                source,
            })?;
            entries.push(TableEntry {
                pattern,
                output,
                line,
            });
        } else if let Some((key, value)) = content.split_once('=') {
            let width = width(value, line)?;
            match key.trim() {
                "width" => output_width = Some(width),
                "subject" => subject_width = Some(width),
                other => {
                    return Err(TableError::UnknownDirective {
                        line,
                        key: other.to_owned(),
                    })
                }
            }
        } else {
            return Err(TableError::Syntax { line });
        }
    }

    let (default, default_line) = default.ok_or(TableError::MissingDefault)?;
    let output_width = output_width.unwrap_or(DEFAULT_OUTPUT_WIDTH);
    let outputs = entries
        .iter()
        .map(|e| (e.output, e.line))
        .chain(std::iter::once((default, default_line)));
    for (value, line) in outputs {
        if value & !width_mask(output_width) != 0 {
            return Err(TableError::ValueTooWide {
                line,
                value,
                width: output_width,
            });
        }
    }

    Ok(TableFile {
        output_width,
        subject_width,
        entries,
        default,
    })
}

fn number(text: &str, line: usize) -> Result<u128, TableError> {
    parse_number(text).ok_or_else(|| TableError::Number {
        line,
        text: text.trim().to_owned(),
    })
}

fn width(text: &str, line: usize) -> Result<u32, TableError> {
    parse_number(text)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| (1..=MAX_WIDTH).contains(n))
        .ok_or_else(|| TableError::Width {
            line,
            text: text.trim().to_owned(),
        })
}
