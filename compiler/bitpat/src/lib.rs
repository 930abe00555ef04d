//! Bit-pattern matching and priority-lookup compilation.
//!
//! A [`BitPattern`] is parsed once from a string such as `"b10?1"` or
//! `"h?3"` into a fixed-width `(mask, value)` pair and can then emit
//! mask-and-compare tests against any bit-vector expression of the same
//! width. A [`LookupTable`] folds an ordered list of `(pattern, output)`
//! entries into a single cascade of selects in which the earliest matching
//! entry wins.
//!
//! Expressions are emitted through the [`ExprBuilder`] interface from
//! `bitpat_ir`; nothing here knows how they are lowered afterwards.
//!
//! ```text
//! LB  = b?????????????????000?????0000011  => 0xBAD
//! LBU = b?????????????????100?????0000011  => 0xBEEF
//! default                                  => 0
//!
//! select(LB == x, 0xBAD, select(LBU == x, 0xBEEF, 0))
//! ```

mod errors;
mod lookup;
mod pattern;

pub use bitpat_ir::ExprBuilder;
pub use errors::{Error, ErrorCode, PatternError, WidthError};
pub use lookup::{priority_lookup, LookupEntry, LookupTable};
pub use pattern::{BitPattern, Radix};
