//! CLI commands.
//!
//! Each command writes its report to `out` and returns a [`CliError`] for
//! the binary to render; none of them exit the process.

use std::io::{self, Write};

use bitpat::{BitPattern, ErrorCode, ExprBuilder, LookupTable, PatternError, WidthError};
use bitpat_ir::{dump::dump, width_mask, EvalError, Evaluator, ExprArena, ExprId};

use crate::diagnostic::{Diagnostic, Snippet};
use crate::number::parse_number;
use crate::table::{parse_table, TableError, TableFile};

/// Errors reported by the CLI.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{source}")]
    Pattern {
        pattern: String,
        source: PatternError,
    },
    #[error(transparent)]
    Width(#[from] WidthError),
    #[error("{source}")]
    Table { path: String, source: TableError },
    #[error("cannot read `{path}`: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid subject `{text}`")]
    Subject { text: String },
    #[error("subject {value:#x} does not fit in {width} bits")]
    SubjectTooWide { value: u128, width: u32 },
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error("unknown error code `{0}`")]
    UnknownCode(String),
    #[error("cannot write output: {0}")]
    Write(#[from] io::Error),
}

impl CliError {
    /// Convert to a renderable diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, snippet) = match self {
            CliError::Pattern { pattern, source } => (
                Some(source.code()),
                source.offset().map(|column| Snippet {
                    origin: "<pattern>".to_owned(),
                    line: None,
                    text: pattern.clone(),
                    column,
                }),
            ),
            CliError::Width(err) => (Some(err.code()), None),
            CliError::Table {
                path,
                source:
                    TableError::Pattern {
                        line,
                        column,
                        text,
                        source,
                    },
            } => (
                Some(source.code()),
                Some(Snippet {
                    origin: format!("{path}:{line}"),
                    line: Some(*line),
                    text: text.clone(),
                    column: column + source.offset().unwrap_or(0),
                }),
            ),
            _ => (None, None),
        };
        let message = match self {
            CliError::Table { path, source } if snippet.is_none() => format!("{path}: {source}"),
            CliError::Table {
                source: TableError::Pattern { source, .. },
                ..
            } => source.to_string(),
            other => other.to_string(),
        };
        Diagnostic {
            code: code.map(ErrorCode::as_str),
            message,
            snippet,
        }
    }
}

fn compile_pattern(pattern: &str) -> Result<BitPattern, CliError> {
    BitPattern::new(pattern).map_err(|source| CliError::Pattern {
        pattern: pattern.to_owned(),
        source,
    })
}

fn parse_subject(text: &str, width: u32) -> Result<u128, CliError> {
    let value = parse_number(text).ok_or_else(|| CliError::Subject {
        text: text.to_owned(),
    })?;
    if value & !width_mask(width) != 0 {
        return Err(CliError::SubjectTooWide { value, width });
    }
    Ok(value)
}

/// `bitpat parse <pattern>`
pub fn parse_pattern(pattern: &str, out: &mut impl Write) -> Result<(), CliError> {
    let compiled = compile_pattern(pattern)?;
    writeln!(out, "pattern:   {compiled}")?;
    writeln!(out, "width:     {}", compiled.width())?;
    writeln!(out, "mask:      {:#x}", compiled.mask())?;
    writeln!(out, "value:     {:#x}", compiled.value())?;
    writeln!(out, "wildcards: {}", compiled.wildcard_count())?;
    Ok(())
}

/// `bitpat match <pattern> <subject> [--emit]`
///
/// Emits the equality test, evaluates it for `subject` and reports the
/// result. Returns whether the subject matched.
pub fn match_pattern(
    pattern: &str,
    subject: &str,
    emit: bool,
    out: &mut impl Write,
) -> Result<bool, CliError> {
    let compiled = compile_pattern(pattern)?;
    let value = parse_subject(subject, compiled.width())?;

    let mut arena = ExprArena::new();
    let input = arena.input("subject", compiled.width());
    let test = compiled.emit_eq(&mut arena, input)?;
    let matched = evaluate(&arena, input, test, value)? == 1;
    debug_assert_eq!(matched, compiled.matches(value));

    if emit {
        write!(out, "{}", dump(&arena, test))?;
    }
    writeln!(out, "{}", if matched { "match" } else { "no match" })?;
    Ok(matched)
}

/// `bitpat lookup <table-file> <subject> [--emit]`
pub fn lookup_file(
    path: &str,
    subject: &str,
    emit: bool,
    out: &mut impl Write,
) -> Result<u128, CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })?;
    lookup_source(path, &source, subject, emit, out)
}

/// Compile table file contents and evaluate the lookup for `subject`.
///
/// `path` is only used in error messages.
pub fn lookup_source(
    path: &str,
    source: &str,
    subject: &str,
    emit: bool,
    out: &mut impl Write,
) -> Result<u128, CliError> {
    let table = parse_table(source).map_err(|source| CliError::Table {
        path: path.to_owned(),
        source,
    })?;
    let value = parse_subject(subject, table.subject_width())?;

    let mut arena = ExprArena::new();
    let input = arena.input("subject", table.subject_width());
    let root = build_lookup(&mut arena, &table, input)?;
    let result = evaluate(&arena, input, root, value)?;

    if emit {
        write!(out, "{}", dump(&arena, root))?;
    }
    match table.entries.iter().find(|e| e.pattern.matches(value)) {
        Some(entry) => writeln!(out, "selected: line {} ({})", entry.line, entry.pattern)?,
        None => writeln!(out, "selected: default")?,
    }
    writeln!(out, "result:   {result:#x}")?;
    Ok(result)
}

fn build_lookup(
    arena: &mut ExprArena,
    table: &TableFile,
    subject: ExprId,
) -> Result<ExprId, WidthError> {
    let outputs: Vec<ExprId> = table
        .entries
        .iter()
        .map(|e| arena.constant(table.output_width, e.output))
        .collect();
    let default = arena.constant(table.output_width, table.default);
    let entries = table.entries.iter().map(|e| &e.pattern).zip(outputs);
    LookupTable::from_entries(entries, default).build(arena, subject)
}

fn evaluate(
    arena: &ExprArena,
    input: ExprId,
    root: ExprId,
    value: u128,
) -> Result<u128, EvalError> {
    let mut eval = Evaluator::new(arena);
    eval.bind(input, value)?;
    eval.eval(root)
}

/// `bitpat --explain <code>`
pub fn explain(code: &str, out: &mut impl Write) -> Result<(), CliError> {
    let code = ErrorCode::parse(code).ok_or_else(|| CliError::UnknownCode(code.to_owned()))?;
    writeln!(out, "{code}: {}", code.explanation())?;
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
