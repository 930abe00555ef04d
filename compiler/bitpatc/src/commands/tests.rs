use pretty_assertions::assert_eq;

use super::*;

const LOADS: &str = "\
# RV32I loads
width = 32

b?????????????????000?????0000011 => 0xBAD    # lb
b?????????????????001?????0000011 => 0xFACE   # lh
b?????????????????010?????0000011 => 0xBEE    # lw
b?????????????????100?????0000011 => 0xBEEF   # lbu
b?????????????????101?????0000011 => 0xCAD    # lhu
default => 0
";

fn run<T>(f: impl FnOnce(&mut Vec<u8>) -> Result<T, CliError>) -> (T, String) {
    let mut out = Vec::new();
    let value = f(&mut out).unwrap();
    (value, String::from_utf8(out).unwrap())
}

#[test]
fn parse_reports_mask_and_value() {
    let ((), out) = run(|out| parse_pattern("b10_?1", out));
    assert_eq!(
        out,
        "pattern:   b10?1\nwidth:     4\nmask:      0xd\nvalue:     0x9\nwildcards: 1\n"
    );
}

#[test]
fn match_and_no_match() {
    let (matched, out) = run(|out| match_pattern("b10?1", "0b1011", false, out));
    assert!(matched);
    assert_eq!(out, "match\n");

    let (matched, out) = run(|out| match_pattern("b10?1", "0b1111", false, out));
    assert!(!matched);
    assert_eq!(out, "no match\n");
}

#[test]
fn match_with_emit_dumps_expression() {
    let (_, out) = run(|out| match_pattern("h3", "3", true, out));
    assert_eq!(
        out,
        "%0 = input subject : i4\n%1 = const 0x3 : i4\n%2 = eq %1, %0 : i1\nreturn %2\nmatch\n"
    );
}

#[test]
fn subject_must_fit_pattern() {
    let mut out = Vec::new();
    let err = match_pattern("b10?1", "0x10", false, &mut out).unwrap_err();
    assert!(matches!(err, CliError::SubjectTooWide { value: 0x10, width: 4 }));
}

#[test]
fn lookup_selects_lbu() {
    let (result, out) = run(|out| lookup_source("loads.tbl", LOADS, "0x00414503", false, out));
    assert_eq!(result, 0xBEEF);
    assert_eq!(
        out,
        "selected: line 7 (b?????????????????100?????0000011)\nresult:   0xbeef\n"
    );
}

#[test]
fn lookup_default() {
    let (result, out) = run(|out| lookup_source("loads.tbl", LOADS, "0x4013", false, out));
    assert_eq!(result, 0);
    assert_eq!(out, "selected: default\nresult:   0x0\n");
}

#[test]
fn pattern_error_diagnostic_points_at_symbol() {
    let mut out = Vec::new();
    let err = parse_pattern("b1021", &mut out).unwrap_err();
    let diagnostic = err.to_diagnostic();
    assert_eq!(diagnostic.code, Some("E0002"));
    assert_eq!(diagnostic.message, "invalid binary symbol `2` at offset 3");
    let snippet = diagnostic.snippet.unwrap();
    assert_eq!(snippet.column, 3);
    assert_eq!(snippet.text, "b1021");
}

#[test]
fn table_pattern_error_diagnostic() {
    let source = "default => 0\n  b10x1 => 1\n";
    let mut out = Vec::new();
    let err = lookup_source("t.tbl", source, "0", false, &mut out).unwrap_err();
    let diagnostic = err.to_diagnostic();
    assert_eq!(diagnostic.code, Some("E0002"));
    let snippet = diagnostic.snippet.unwrap();
    assert_eq!(snippet.origin, "t.tbl:2");
    assert_eq!(snippet.line, Some(2));
    // Two spaces of indentation plus offset 3 within the pattern.
    assert_eq!(snippet.column, 5);
}

#[test]
fn table_error_without_snippet() {
    let mut out = Vec::new();
    let err = lookup_source("t.tbl", "b1 => 1\n", "1", false, &mut out).unwrap_err();
    let diagnostic = err.to_diagnostic();
    assert_eq!(diagnostic.code, None);
    assert_eq!(diagnostic.message, "t.tbl: missing `default => <value>` entry");
}

#[test]
fn mixed_pattern_widths_are_rejected() {
    let source = "b1? => 1\nb1 => 2\ndefault => 0\n";
    let mut out = Vec::new();
    let err = lookup_source("t.tbl", source, "1", false, &mut out).unwrap_err();
    assert!(matches!(
        err,
        CliError::Width(WidthError::Subject {
            expected: 1,
            found: 2,
            ..
        })
    ));
    assert_eq!(err.to_diagnostic().code, Some("E1001"));
}

#[test]
fn explain_known_and_unknown_codes() {
    let ((), out) = run(|out| explain("E0005", out));
    assert!(out.starts_with("E0005: "));

    let mut out = Vec::new();
    assert!(matches!(
        explain("E4242", &mut out),
        Err(CliError::UnknownCode(code)) if code == "E4242"
    ));
}
