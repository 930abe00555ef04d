use bitpat_ir::{dump::dump, ExprArena, ExprKind, Evaluator};
use pretty_assertions::assert_eq;

use super::*;

fn pat(s: &str) -> BitPattern {
    BitPattern::new(s).unwrap()
}

/// Evaluate `pattern == x` and `pattern != x` for a concrete subject.
fn eval_tests(pattern: &BitPattern, subject: u128) -> (u128, u128) {
    let mut arena = ExprArena::new();
    let x = arena.input("x", pattern.width());
    let eq = pattern.emit_eq(&mut arena, x).unwrap();
    let ne = pattern.emit_ne(&mut arena, x).unwrap();
    let mut eval = Evaluator::new(&arena);
    eval.bind(x, subject).unwrap();
    (eval.eval(eq).unwrap(), eval.eval(ne).unwrap())
}

fn count_ands(arena: &ExprArena, root: bitpat_ir::ExprId) -> usize {
    arena.count_reachable(root, |k| matches!(k, ExprKind::And(..)))
}

// Parsing

#[test]
fn binary_with_wildcard() {
    let p = pat("b10?1");
    assert_eq!(p.width(), 4);
    assert_eq!(p.mask(), 0b1101);
    assert_eq!(p.value(), 0b1001);
    assert!(!p.is_exact());
    assert_eq!(p.wildcard_count(), 1);
}

#[test]
fn prefix_is_optional_for_binary() {
    assert_eq!(pat("10?1"), pat("b10?1"));
}

#[test]
fn separators_contribute_no_bits() {
    let p = pat("b0000_0011");
    assert_eq!(p.width(), 8);
    assert_eq!(p.value(), 3);
    assert!(p.is_exact());
}

#[test]
fn hex_groups() {
    let p = pat("h?3");
    assert_eq!(p.width(), 8);
    assert_eq!(p.mask(), 0x0F);
    assert_eq!(p.value(), 0x03);
    assert_eq!(pat("xBeEf"), pat("hbeef"));
    assert_eq!(pat("hbeef").value(), 0xBEEF);
}

#[test]
fn octal_groups() {
    let p = pat("o7?1");
    assert_eq!(p.width(), 9);
    assert_eq!(p.mask(), 0b111_000_111);
    assert_eq!(p.value(), 0b111_000_001);
}

#[test]
fn full_width_pattern() {
    let p = pat(&format!("h{}", "f".repeat(32)));
    assert_eq!(p.width(), 128);
    assert_eq!(p.value(), u128::MAX);
    assert!(p.is_exact());
}

// Parse errors

#[test]
fn invalid_binary_symbol() {
    assert_eq!(
        BitPattern::new("b1021"),
        Err(PatternError::InvalidSymbol {
            symbol: '2',
            offset: 3,
            radix: Radix::Binary,
        })
    );
}

#[test]
fn invalid_hex_symbol() {
    assert_eq!(
        BitPattern::new("h1g"),
        Err(PatternError::InvalidSymbol {
            symbol: 'g',
            offset: 2,
            radix: Radix::Hex,
        })
    );
}

#[test]
fn digit_outside_octal_alphabet() {
    assert!(matches!(
        BitPattern::new("o8"),
        Err(PatternError::InvalidSymbol { symbol: '8', .. })
    ));
}

#[test]
fn empty_patterns() {
    assert_eq!(BitPattern::new(""), Err(PatternError::Empty));
    assert_eq!(BitPattern::new("b"), Err(PatternError::Empty));
    assert_eq!(BitPattern::new("h"), Err(PatternError::Empty));
}

#[test]
fn misplaced_separators() {
    assert_eq!(
        BitPattern::new("b_01"),
        Err(PatternError::MisplacedSeparator { offset: 1 })
    );
    assert_eq!(
        BitPattern::new("b0__1"),
        Err(PatternError::MisplacedSeparator { offset: 3 })
    );
    assert_eq!(
        BitPattern::new("b01_"),
        Err(PatternError::MisplacedSeparator { offset: 3 })
    );
}

#[test]
fn too_wide() {
    let s = format!("b{}", "1".repeat(129));
    assert_eq!(BitPattern::new(&s), Err(PatternError::TooWide { width: 129 }));
}

#[test]
fn from_str_matches_new() {
    let parsed: BitPattern = "b1?".parse().unwrap();
    assert_eq!(parsed, pat("b1?"));
}

// Host-side queries

#[test]
fn host_matching() {
    let p = pat("b10?1");
    assert!(p.matches(0b1011));
    assert!(p.matches(0b1001));
    assert!(!p.matches(0b1111));
}

#[test]
fn overlap() {
    assert!(pat("b1??").overlaps(&pat("b?0?")));
    assert!(!pat("b1??").overlaps(&pat("b0??")));
    assert!(!pat("b1??").overlaps(&pat("b1???")));
}

#[test]
fn display_is_canonical_binary() {
    assert_eq!(pat("h?3").to_string(), "b????0011");
    assert_eq!(pat("b10_?1").to_string(), "b10?1");
}

// Expression emission

#[test]
fn exact_pattern_emits_no_and() {
    let p = pat("b00000000000000000000000000010011");
    let mut arena = ExprArena::new();
    let x = arena.input("x", 32);
    let eq = p.emit_eq(&mut arena, x).unwrap();
    let ne = p.emit_ne(&mut arena, x).unwrap();
    assert_eq!(count_ands(&arena, eq), 0);
    assert_eq!(count_ands(&arena, ne), 0);
    assert_eq!(
        dump(&arena, eq),
        "%0 = input x : i32\n%1 = const 0x13 : i32\n%2 = eq %1, %0 : i1\nreturn %2\n"
    );
}

#[test]
fn wildcard_pattern_masks_subject() {
    let p = pat("b10?1");
    let mut arena = ExprArena::new();
    let x = arena.input("x", 4);
    let eq = p.emit_eq(&mut arena, x).unwrap();
    assert_eq!(count_ands(&arena, eq), 1);
    assert_eq!(
        dump(&arena, eq),
        "\
%0 = input x : i4
%1 = const 0x9 : i4
%2 = const 0xd : i4
%3 = and %0, %2 : i4
%4 = eq %1, %3 : i1
return %4
"
    );
}

#[test]
fn round_trip_scenario() {
    let p = pat("b10?1");
    assert_eq!(eval_tests(&p, 0b1011), (1, 0));
    assert_eq!(eval_tests(&p, 0b1111), (0, 1));
}

#[test]
fn all_wildcards_always_match() {
    let p = pat("b????");
    for subject in 0..16 {
        assert_eq!(eval_tests(&p, subject), (1, 0), "subject {subject:#06b}");
    }
}

#[test]
fn subject_width_mismatch() {
    let p = pat("b10?1");
    let mut arena = ExprArena::new();
    let x = arena.input("x", 26);
    let before = arena.len();
    assert_eq!(
        p.emit_eq(&mut arena, x),
        Err(WidthError::Subject {
            pattern: "b10?1".to_owned(),
            expected: 4,
            found: 26,
        })
    );
    assert!(p.emit_ne(&mut arena, x).is_err());
    assert_eq!(arena.len(), before);
}

#[test]
fn constant_from_exact_pattern() {
    let p = pat("b00000000000000000000000000010011");
    let mut arena = ExprArena::new();
    let k = p.to_constant(&mut arena).unwrap();
    assert_eq!(arena.kind(k), ExprKind::Const(19));
    assert_eq!(arena.get(k).width, 32);
}

#[test]
fn constant_from_wildcard_pattern_fails() {
    let mut arena = ExprArena::new();
    assert_eq!(
        pat("b1?").to_constant(&mut arena),
        Err(PatternError::WildcardInConstant {
            pattern: "b1?".to_owned()
        })
    );
}

mod proptests {
    use proptest::prelude::*;

    use super::*;

    fn pattern_string() -> impl Strategy<Value = String> {
        proptest::collection::vec(prop_oneof![Just('0'), Just('1'), Just('?')], 1..=64)
            .prop_map(|symbols| std::iter::once('b').chain(symbols).collect())
    }

    proptest! {
        #[test]
        fn value_never_escapes_mask(s in pattern_string()) {
            let p = BitPattern::new(&s).unwrap();
            prop_assert_eq!(p.value() & !p.mask(), 0);
            prop_assert_eq!(p.width() as usize, s.len() - 1);
        }

        #[test]
        fn display_reparses_to_same_pattern(s in pattern_string()) {
            let p = BitPattern::new(&s).unwrap();
            prop_assert_eq!(p.to_string(), s.clone());
            prop_assert_eq!(BitPattern::new(&p.to_string()).unwrap(), p);
        }

        #[test]
        fn emitted_test_agrees_with_host_match(s in pattern_string(), subject in any::<u64>()) {
            let p = BitPattern::new(&s).unwrap();
            let subject = u128::from(subject) & bitpat_ir::width_mask(p.width());
            let (eq, ne) = eval_tests(&p, subject);
            prop_assert_eq!(eq == 1, p.matches(subject));
            prop_assert_eq!(ne == 1, !p.matches(subject));
        }

        #[test]
        fn hex_is_four_binary_symbols(digits in proptest::collection::vec(0u32..16, 1..=8)) {
            let hex: String = std::iter::once('h')
                .chain(digits.iter().filter_map(|&d| char::from_digit(d, 16)))
                .collect();
            let bin: String = std::iter::once('b')
                .chain(digits.iter().flat_map(|&d| (0..4).rev().map(move |i| if d >> i & 1 == 1 { '1' } else { '0' })))
                .collect();
            prop_assert_eq!(BitPattern::new(&hex).unwrap(), BitPattern::new(&bin).unwrap());
        }
    }
}
