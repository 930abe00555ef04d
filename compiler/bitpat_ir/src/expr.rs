//! Expression nodes.

use crate::{ExprId, InputId};

/// The operation performed by an expression node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ExprKind {
    /// Literal constant, already truncated to the node width.
    Const(u128),
    /// Reference to a declared input.
    Input(InputId),
    /// Bitwise AND of two equal-width operands.
    And(ExprId, ExprId),
    /// Width-matched equality; 1 bit wide.
    Eq(ExprId, ExprId),
    /// Width-matched inequality; 1 bit wide.
    Ne(ExprId, ExprId),
    /// `cond ? then_val : else_val`.
    Select {
        cond: ExprId,
        then_val: ExprId,
        else_val: ExprId,
    },
}

impl ExprKind {
    /// Mnemonic used by the text dump.
    pub fn mnemonic(self) -> &'static str {
        match self {
            ExprKind::Const(_) => "const",
            ExprKind::Input(_) => "input",
            ExprKind::And(..) => "and",
            ExprKind::Eq(..) => "eq",
            ExprKind::Ne(..) => "ne",
            ExprKind::Select { .. } => "select",
        }
    }

    /// Visit operands in source order.
    pub fn for_each_operand(self, mut f: impl FnMut(ExprId)) {
        match self {
            ExprKind::Const(_) | ExprKind::Input(_) => {}
            ExprKind::And(a, b) | ExprKind::Eq(a, b) | ExprKind::Ne(a, b) => {
                f(a);
                f(b);
            }
            ExprKind::Select {
                cond,
                then_val,
                else_val,
            } => {
                f(cond);
                f(then_val);
                f(else_val);
            }
        }
    }
}

/// An expression node: operation plus result width in bits.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub width: u32,
}

impl Expr {
    #[inline]
    pub const fn new(kind: ExprKind, width: u32) -> Self {
        Expr { kind, width }
    }
}
