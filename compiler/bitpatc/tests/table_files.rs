//! Table file parsing.

#![allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]

use bitpat::{BitPattern, PatternError, Radix};
use bitpatc::table::{parse_table, TableError, DEFAULT_OUTPUT_WIDTH};
use pretty_assertions::assert_eq;

#[test]
fn minimal_table() {
    let table = parse_table("default => 7\n").unwrap();
    assert_eq!(table.default, 7);
    assert!(table.entries.is_empty());
    assert_eq!(table.output_width, DEFAULT_OUTPUT_WIDTH);
    assert_eq!(table.subject_width(), 128);
}

#[test]
fn entries_keep_priority_order_and_lines() {
    let source = "\
# comment line
width = 8

h?3 => 0x10   # trailing comment
b0000_0011 => 0x20
default => 0xFF
";
    let table = parse_table(source).unwrap();
    assert_eq!(table.output_width, 8);
    assert_eq!(table.subject_width(), 8);
    let rows: Vec<_> = table
        .entries
        .iter()
        .map(|e| (e.pattern, e.output, e.line))
        .collect();
    assert_eq!(
        rows,
        vec![
            (BitPattern::new("h?3").unwrap(), 0x10, 4),
            (BitPattern::new("b00000011").unwrap(), 0x20, 5),
        ]
    );
}

#[test]
fn explicit_subject_width() {
    let table = parse_table("subject = 16\ndefault => 0\n").unwrap();
    assert_eq!(table.subject_width(), 16);
}

#[test]
fn pattern_errors_carry_location() {
    let err = parse_table("default => 0\n b12 => 1\n").unwrap_err();
    assert_eq!(
        err,
        TableError::Pattern {
            line: 2,
            column: 1,
            text: " b12 => 1".to_owned(),
            source: PatternError::InvalidSymbol {
                symbol: '2',
                offset: 2,
                radix: Radix::Binary,
            },
        }
    );
}

#[test]
fn structural_errors() {
    assert_eq!(parse_table("b1 => 1\n"), Err(TableError::MissingDefault));
    assert_eq!(
        parse_table("default => 0\ndefault => 1\n"),
        Err(TableError::DuplicateDefault { line: 2 })
    );
    assert_eq!(
        parse_table("b1 -> 1\n"),
        Err(TableError::Syntax { line: 1 })
    );
    assert_eq!(
        parse_table("depth = 3\n"),
        Err(TableError::UnknownDirective {
            line: 1,
            key: "depth".to_owned()
        })
    );
    assert_eq!(
        parse_table("b1 => twelve\n"),
        Err(TableError::Number {
            line: 1,
            text: "twelve".to_owned()
        })
    );
    assert_eq!(
        parse_table("width = 0\n"),
        Err(TableError::Width {
            line: 1,
            text: "0".to_owned()
        })
    );
}

#[test]
fn outputs_must_fit_width() {
    let source = "width = 4\nb1 => 0x1F\ndefault => 0\n";
    assert_eq!(
        parse_table(source),
        Err(TableError::ValueTooWide {
            line: 2,
            value: 0x1F,
            width: 4
        })
    );

    let source = "width = 4\ndefault => 0x10\n";
    assert_eq!(
        parse_table(source),
        Err(TableError::ValueTooWide {
            line: 2,
            value: 0x10,
            width: 4
        })
    );
}
