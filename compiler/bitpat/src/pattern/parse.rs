//! Pattern string parser.
//!
//! Grammar:
//!
//! ```text
//! pattern := prefix? group ('_'? group)*
//! prefix  := 'b' | 'o' | 'h' | 'x'
//! group   := digit | '?'
//! ```
//!
//! Symbols are read most-significant first. Each symbol shifts its bit
//! group in at the low end of `(mask, value)`.

use bitpat_ir::MAX_WIDTH;

use super::{BitPattern, Radix};
use crate::PatternError;

pub(super) fn parse(pattern: &str) -> Result<BitPattern, PatternError> {
    let (radix, body_offset) = match pattern.chars().next().and_then(Radix::from_prefix) {
        Some(radix) => (radix, 1),
        None => (Radix::Binary, 0),
    };
    let body = &pattern[body_offset..];
    let group_width = radix.bits_per_symbol();

    let mut width: u32 = 0;
    let mut mask: u128 = 0;
    let mut value: u128 = 0;
    // Start as if a separator was just seen so a leading `_` is rejected.
    let mut last_separator: Option<usize> = Some(body_offset);

    for (index, symbol) in body.char_indices() {
        let offset = body_offset + index;
        if symbol == '_' {
            if last_separator.is_some() {
                return Err(PatternError::MisplacedSeparator { offset });
            }
            last_separator = Some(offset);
            continue;
        }
        last_separator = None;

        let group = radix
            .expand(symbol)
            .ok_or(PatternError::InvalidSymbol {
                symbol,
                offset,
                radix,
            })?;
        // Bits shifted out past MAX_WIDTH are irrelevant: the width check
        // below rejects the pattern.
        mask = (mask << group_width) | group.mask;
        value = (value << group_width) | group.value;
        width = width.saturating_add(group_width);
    }

    if width == 0 {
        return Err(PatternError::Empty);
    }
    if let Some(offset) = last_separator {
        return Err(PatternError::MisplacedSeparator { offset });
    }
    if width > MAX_WIDTH {
        return Err(PatternError::TooWide { width });
    }

    tracing::debug!(
        pattern,
        %radix,
        width,
        mask = %format!("{mask:#x}"),
        value = %format!("{value:#x}"),
        "compiled bit pattern"
    );
    Ok(BitPattern::from_raw(width, mask, value))
}
