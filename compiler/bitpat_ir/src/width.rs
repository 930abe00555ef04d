//! Bit-width helpers.

/// Widest bit vector representable by the IR (constants are `u128`).
pub const MAX_WIDTH: u32 = 128;

/// Width of comparison results.
pub const BOOL_WIDTH: u32 = 1;

/// All-ones mask covering the low `width` bits.
///
/// Widths at or above [`MAX_WIDTH`] saturate to `u128::MAX`.
#[inline]
pub const fn width_mask(width: u32) -> u128 {
    if width >= MAX_WIDTH {
        u128::MAX
    } else {
        (1u128 << width) - 1
    }
}
