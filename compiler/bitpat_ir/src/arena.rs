//! Hash-consed expression arena.
//!
//! `ExprArena` records every node the compiler emits as plain data. Nodes are
//! interned: asking for the same operation on the same operands twice returns
//! the same [`ExprId`]. Operands always precede their users in allocation
//! order, which [`ExprArena::post_order`] and the evaluator rely on.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{width_mask, Expr, ExprBuilder, ExprId, ExprKind, InputId, BOOL_WIDTH};

/// A declared input port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputDecl {
    pub name: String,
    pub width: u32,
}

/// Flat storage for expression nodes.
#[derive(Default, Debug)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    interned: FxHashMap<Expr, ExprId>,
    inputs: Vec<InputDecl>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new input of `width` bits.
    ///
    /// Every call declares a distinct input, even when the name repeats.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "input count is bounded far below u32::MAX"
    )]
    pub fn input(&mut self, name: impl Into<String>, width: u32) -> ExprId {
        let input = InputId::new(self.inputs.len() as u32);
        self.inputs.push(InputDecl {
            name: name.into(),
            width,
        });
        self.intern(Expr::new(ExprKind::Input(input), width))
    }

    /// Declarations of all inputs, indexed by [`InputId`].
    pub fn inputs(&self) -> &[InputDecl] {
        &self.inputs
    }

    #[inline]
    pub fn input_decl(&self, input: InputId) -> &InputDecl {
        &self.inputs[input.index()]
    }

    /// Most recently declared input with this name.
    pub fn find_input(&self, name: &str) -> Option<InputId> {
        self.inputs
            .iter()
            .rposition(|decl| decl.name == name)
            .and_then(|index| u32::try_from(index).ok())
            .map(InputId::new)
    }

    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: ExprId) -> ExprKind {
        self.exprs[id.index()].kind
    }

    /// Number of distinct nodes recorded.
    #[inline]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Nodes reachable from `root`, operands before users, `root` last.
    pub fn post_order(&self, root: ExprId) -> Vec<ExprId> {
        // Operands always have smaller ids than their users, so sorting the
        // reachable set by id is a valid topological order.
        let mut seen = FxHashSet::default();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if seen.insert(id) {
                self.kind(id).for_each_operand(|operand| stack.push(operand));
            }
        }
        let mut order: Vec<ExprId> = seen.into_iter().collect();
        order.sort_unstable();
        order
    }

    /// Count reachable nodes satisfying `pred`.
    pub fn count_reachable(&self, root: ExprId, pred: impl Fn(ExprKind) -> bool) -> usize {
        self.post_order(root)
            .into_iter()
            .filter(|&id| pred(self.kind(id)))
            .count()
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "expression count is bounded far below u32::MAX"
    )]
    fn intern(&mut self, expr: Expr) -> ExprId {
        if let Some(&id) = self.interned.get(&expr) {
            return id;
        }
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        self.interned.insert(expr, id);
        id
    }

    fn assert_same_width(&self, op: &str, lhs: ExprId, rhs: ExprId) {
        debug_assert_eq!(
            self.get(lhs).width,
            self.get(rhs).width,
            "{op}: operand width mismatch ({lhs:?} vs {rhs:?})"
        );
    }
}

impl ExprBuilder for ExprArena {
    type Value = ExprId;

    #[inline]
    fn width(&self, value: ExprId) -> u32 {
        self.get(value).width
    }

    fn constant(&mut self, width: u32, value: u128) -> ExprId {
        self.intern(Expr::new(ExprKind::Const(value & width_mask(width)), width))
    }

    fn and(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.assert_same_width("and", lhs, rhs);
        let width = self.width(lhs);
        self.intern(Expr::new(ExprKind::And(lhs, rhs), width))
    }

    fn equal(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.assert_same_width("eq", lhs, rhs);
        self.intern(Expr::new(ExprKind::Eq(lhs, rhs), BOOL_WIDTH))
    }

    fn not_equal(&mut self, lhs: ExprId, rhs: ExprId) -> ExprId {
        self.assert_same_width("ne", lhs, rhs);
        self.intern(Expr::new(ExprKind::Ne(lhs, rhs), BOOL_WIDTH))
    }

    fn select(&mut self, cond: ExprId, then_val: ExprId, else_val: ExprId) -> ExprId {
        debug_assert_eq!(self.width(cond), BOOL_WIDTH, "select: condition is not 1 bit");
        self.assert_same_width("select", then_val, else_val);
        let width = self.width(then_val);
        self.intern(Expr::new(
            ExprKind::Select {
                cond,
                then_val,
                else_val,
            },
            width,
        ))
    }
}
