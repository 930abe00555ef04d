//! Reference semantics for recorded expressions.
//!
//! The evaluator gives every [`ExprKind`] its standard bit-vector meaning so
//! tests and the CLI can check what an emitted expression computes for a
//! concrete subject. Results are always truncated to the node width.

use rustc_hash::FxHashMap;

use crate::{width_mask, ExprArena, ExprId, ExprKind, InputId};

/// Errors raised while binding inputs or evaluating.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("no value bound for input `{name}`")]
    UnboundInput { name: String },
    #[error("unknown input `{name}`")]
    UnknownInput { name: String },
    #[error("{id:?} is not an input")]
    NotAnInput { id: ExprId },
}

/// Evaluates expressions recorded in an [`ExprArena`].
pub struct Evaluator<'a> {
    arena: &'a ExprArena,
    bindings: FxHashMap<InputId, u128>,
}

impl<'a> Evaluator<'a> {
    pub fn new(arena: &'a ExprArena) -> Self {
        Evaluator {
            arena,
            bindings: FxHashMap::default(),
        }
    }

    /// Bind a value to the input node `input` (as returned by
    /// [`ExprArena::input`]). The value is truncated to the input width.
    pub fn bind(&mut self, input: ExprId, value: u128) -> Result<(), EvalError> {
        let expr = self.arena.get(input);
        let ExprKind::Input(id) = expr.kind else {
            return Err(EvalError::NotAnInput { id: input });
        };
        self.bindings.insert(id, value & width_mask(expr.width));
        Ok(())
    }

    /// Bind a value to the most recently declared input called `name`.
    pub fn bind_name(&mut self, name: &str, value: u128) -> Result<(), EvalError> {
        let id = self
            .arena
            .find_input(name)
            .ok_or_else(|| EvalError::UnknownInput {
                name: name.to_owned(),
            })?;
        let width = self.arena.input_decl(id).width;
        self.bindings.insert(id, value & width_mask(width));
        Ok(())
    }

    /// Evaluate `root` under the current bindings.
    pub fn eval(&self, root: ExprId) -> Result<u128, EvalError> {
        let mut values: FxHashMap<ExprId, u128> = FxHashMap::default();
        for id in self.arena.post_order(root) {
            let expr = self.arena.get(id);
            let operand = |e: ExprId| values.get(&e).copied().unwrap_or_default();
            let raw = match expr.kind {
                ExprKind::Const(value) => value,
                ExprKind::Input(input) => {
                    self.bindings.get(&input).copied().ok_or_else(|| {
                        EvalError::UnboundInput {
                            name: self.arena.input_decl(input).name.clone(),
                        }
                    })?
                }
                ExprKind::And(a, b) => operand(a) & operand(b),
                ExprKind::Eq(a, b) => u128::from(operand(a) == operand(b)),
                ExprKind::Ne(a, b) => u128::from(operand(a) != operand(b)),
                ExprKind::Select {
                    cond,
                    then_val,
                    else_val,
                } => {
                    if operand(cond) & 1 == 1 {
                        operand(then_val)
                    } else {
                        operand(else_val)
                    }
                }
            };
            values.insert(id, raw & width_mask(expr.width));
        }
        Ok(values.get(&root).copied().unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
