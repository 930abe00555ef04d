//! Bitpat IR - expression trees over fixed-width bit vectors.
//!
//! This crate contains the expression layer that the pattern compiler in
//! `bitpat` emits into:
//!
//! - [`ExprBuilder`]: the construction interface (constant, and, equal,
//!   not-equal, select) the compiler is written against
//! - [`ExprArena`]: a hash-consed recording implementation of that interface
//! - [`Evaluator`]: reference semantics for recorded expressions
//! - [`dump`]: SSA-style text listing of an expression
//!
//! # Design
//!
//! - **Flatten Everything**: no `Box<Expr>`, operands are [`ExprId`] indices
//! - **Hash-cons Everything**: structurally identical nodes share one id
//! - Every node carries its bit width; comparisons are 1 bit wide

mod arena;
mod builder;
pub mod dump;
mod eval;
mod expr;
mod expr_id;
mod width;

pub use arena::{ExprArena, InputDecl};
pub use builder::ExprBuilder;
pub use eval::{EvalError, Evaluator};
pub use expr::{Expr, ExprKind};
pub use expr_id::{ExprId, InputId};
pub use width::{width_mask, BOOL_WIDTH, MAX_WIDTH};
