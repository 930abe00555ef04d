//! The expression construction interface.

/// Primitive operations the pattern compiler emits.
///
/// Implementations decide what a value handle is: a recorded node
/// ([`ExprArena`](crate::ExprArena)), a netlist wire, a host-side integer.
/// The compiler only ever asks a handle for its width and passes it back.
///
/// Callers guarantee operand widths line up (`and`, `equal` and `not_equal`
/// take equal-width operands, `select` takes a 1-bit condition and
/// equal-width arms). Implementations may assert this but never widen or
/// truncate on their own.
pub trait ExprBuilder {
    /// Handle to a bit-vector expression.
    type Value: Copy;

    /// Width in bits of an existing handle.
    fn width(&self, value: Self::Value) -> u32;

    /// Literal `value` of `width` bits.
    fn constant(&mut self, width: u32, value: u128) -> Self::Value;

    /// Bitwise AND.
    fn and(&mut self, lhs: Self::Value, rhs: Self::Value) -> Self::Value;

    /// 1-bit equality comparison.
    fn equal(&mut self, lhs: Self::Value, rhs: Self::Value) -> Self::Value;

    /// 1-bit inequality comparison.
    fn not_equal(&mut self, lhs: Self::Value, rhs: Self::Value) -> Self::Value;

    /// Two-way conditional select.
    fn select(
        &mut self,
        cond: Self::Value,
        then_val: Self::Value,
        else_val: Self::Value,
    ) -> Self::Value;
}
