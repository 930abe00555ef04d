//! Integer literals on the command line and in table files.
//!
//! Accepts decimal, `0x`, `0b` and `0o` forms with optional `_` separators:
//! `42`, `0xBEEF`, `0b1010_0011`, `0o17`.

/// Parse an unsigned literal, or `None` if it is malformed or exceeds `u128`.
pub fn parse_number(text: &str) -> Option<u128> {
    let text = text.trim();
    let (digits, radix) = match text.get(..2) {
        Some("0x" | "0X") => (&text[2..], 16),
        Some("0b" | "0B") => (&text[2..], 2),
        Some("0o" | "0O") => (&text[2..], 8),
        _ => (text, 10),
    };
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return None;
    }
    let cleaned: String = digits.chars().filter(|&c| c != '_').collect();
    u128::from_str_radix(&cleaned, radix).ok()
}

/// Minimum number of bits needed to represent `value` (at least 1).
pub fn bit_length(value: u128) -> u32 {
    (u128::BITS - value.leading_zeros()).max(1)
}
