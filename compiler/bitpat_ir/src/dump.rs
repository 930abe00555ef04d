//! SSA-style text listing of an expression.
//!
//! ```text
//! %0 = input inst : i32
//! %1 = const 0x707f : i32
//! %2 = and %0, %1 : i32
//! %3 = const 0x4003 : i32
//! %4 = eq %3, %2 : i1
//! ...
//! return %9
//! ```
//!
//! Value numbers are local to the listing (dense, in post-order), not arena
//! ids, so dumps of equivalent expressions compare equal across arenas.

use std::fmt::Write;

use rustc_hash::FxHashMap;

use crate::{ExprArena, ExprId, ExprKind};

/// Render every node reachable from `root`.
pub fn dump(arena: &ExprArena, root: ExprId) -> String {
    let order = arena.post_order(root);
    let local: FxHashMap<ExprId, usize> = order
        .iter()
        .enumerate()
        .map(|(slot, &id)| (id, slot))
        .collect();
    let name = |id: ExprId| format!("%{}", local[&id]);

    let mut out = String::new();
    for &id in &order {
        let expr = arena.get(id);
        let _ = write!(out, "{} = {} ", name(id), expr.kind.mnemonic());
        match expr.kind {
            ExprKind::Const(value) => {
                let _ = write!(out, "{value:#x}");
            }
            ExprKind::Input(input) => {
                out.push_str(&arena.input_decl(input).name);
            }
            kind => {
                let mut operands = Vec::with_capacity(3);
                kind.for_each_operand(|op| operands.push(name(op)));
                out.push_str(&operands.join(", "));
            }
        }
        let _ = writeln!(out, " : i{}", expr.width);
    }
    let _ = writeln!(out, "return {}", name(root));
    out
}
