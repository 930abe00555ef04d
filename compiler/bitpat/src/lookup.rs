//! Priority-encoded lookup compilation.
//!
//! A [`LookupTable`] maps patterns to outputs in priority order. Building it
//! folds the entries right-to-left, starting from the default:
//!
//! ```text
//! entries: [(A, a), (B, b), (C, c)], default d
//!
//! acc = d
//! acc = select(C == x, c, acc)
//! acc = select(B == x, b, acc)
//! acc = select(A == x, a, acc)   // outermost, tested first
//! ```
//!
//! The earliest entry ends up outermost, so when patterns overlap the first
//! listed one wins. Overlap is allowed and never diagnosed.

use smallvec::SmallVec;

use bitpat_ir::ExprBuilder;

use crate::{BitPattern, WidthError};

/// One `(pattern, output)` row of a lookup table.
#[derive(Copy, Clone, Debug)]
pub struct LookupEntry<'p, V> {
    pub pattern: &'p BitPattern,
    pub output: V,
}

/// Ordered lookup entries plus a default output.
///
/// Consumed by [`build`](LookupTable::build); patterns are borrowed, not
/// owned, so one pattern can appear in many tables.
#[derive(Clone, Debug)]
pub struct LookupTable<'p, V> {
    entries: SmallVec<[LookupEntry<'p, V>; 8]>,
    default: V,
}

impl<'p, V: Copy> LookupTable<'p, V> {
    /// Empty table that always yields `default`.
    pub fn new(default: V) -> Self {
        LookupTable {
            entries: SmallVec::new(),
            default,
        }
    }

    /// Table from `(pattern, output)` pairs in priority order.
    pub fn from_entries(entries: impl IntoIterator<Item = (&'p BitPattern, V)>, default: V) -> Self {
        let mut table = Self::new(default);
        table.extend(entries);
        table
    }

    /// Append an entry with lower priority than every existing one.
    pub fn push(&mut self, pattern: &'p BitPattern, output: V) -> &mut Self {
        self.entries.push(LookupEntry { pattern, output });
        self
    }

    #[inline]
    pub fn entries(&self) -> &[LookupEntry<'p, V>] {
        &self.entries
    }

    #[inline]
    pub fn default_output(&self) -> V {
        self.default
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compile the table into a select cascade over `subject`.
    ///
    /// All widths are checked before anything is emitted: every pattern must
    /// be as wide as `subject`, and every output as wide as the default.
    /// An empty table returns the default handle itself.
    #[tracing::instrument(level = "debug", skip_all, fields(entries = self.entries.len()))]
    pub fn build<B>(self, builder: &mut B, subject: V) -> Result<V, WidthError>
    where
        B: ExprBuilder<Value = V>,
    {
        self.validate(builder, subject)?;

        let result = self
            .entries
            .iter()
            .rev()
            .fold(self.default, |acc, entry| {
                let cond = entry.pattern.emit_eq_unchecked(builder, subject);
                builder.select(cond, entry.output, acc)
            });
        tracing::debug!("lookup compiled");
        Ok(result)
    }

    fn validate<B>(&self, builder: &B, subject: V) -> Result<(), WidthError>
    where
        B: ExprBuilder<Value = V>,
    {
        let subject_width = builder.width(subject);
        let output_width = builder.width(self.default);
        for (index, entry) in self.entries.iter().enumerate() {
            entry.pattern.check_subject(subject_width)?;
            let found = builder.width(entry.output);
            if found != output_width {
                return Err(WidthError::Output {
                    index,
                    expected: output_width,
                    found,
                });
            }
        }
        Ok(())
    }
}

impl<'p, V: Copy> Extend<(&'p BitPattern, V)> for LookupTable<'p, V> {
    fn extend<I: IntoIterator<Item = (&'p BitPattern, V)>>(&mut self, iter: I) {
        self.entries.extend(
            iter.into_iter()
                .map(|(pattern, output)| LookupEntry { pattern, output }),
        );
    }
}

/// Compile `(pattern, output)` pairs, in priority order, into a select
/// cascade over `subject` that falls back to `default`.
pub fn priority_lookup<'p, B: ExprBuilder>(
    builder: &mut B,
    entries: impl IntoIterator<Item = (&'p BitPattern, B::Value)>,
    subject: B::Value,
    default: B::Value,
) -> Result<B::Value, WidthError> {
    LookupTable::from_entries(entries, default).build(builder, subject)
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
