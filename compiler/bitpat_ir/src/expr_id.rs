//! Index newtypes for the expression arena.

use std::fmt;

/// Index into an [`ExprArena`](crate::ExprArena).
///
/// Operands are always allocated before their users, so an expression's
/// operands have strictly smaller ids than the expression itself.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    /// Create a new `ExprId`.
    #[inline]
    pub const fn new(index: u32) -> Self {
        ExprId(index)
    }

    /// Get the index into the arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Index of a declared input port in an [`ExprArena`](crate::ExprArena).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct InputId(u32);

impl InputId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        InputId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
