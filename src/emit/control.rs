//! # The "LOOP trick" (spec glossary: LOOP trick)
//!
//! The target machine only has `while-nonzero`, never `if`. Every
//! conditional in this compiler is built from the same idiom: copy
//! the tested cell into a scratch flag (preserving the original), then
//! collapse the flag to a single-shot guard by draining it to zero as
//! the very first thing inside the loop body, so the loop runs its
//! body at most once regardless of the original cell's magnitude.

use crate::emit::copy;
use crate::layout::Layout;

/// Run `body` at most once, iff `cell` is currently non-zero. `cell`
/// is left unchanged. `flag` is scratch, used to stage the test, and
/// is zero on return. Cursor ends at `flag`.
pub fn if_nonzero(layout: &mut Layout, cell: usize, flag: usize, body: impl FnOnce(&mut Layout)) {
    copy::copy(layout, cell, flag);
    layout.move_to(flag);
    layout.raw("[");
    layout.raw("[-]");
    body(layout);
    layout.move_to(flag);
    layout.raw("]");
}

/// `out := (cond == 0) ? 1 : 0`. `out` must start at zero; `flag` is
/// scratch, as in [`if_nonzero`].
pub fn not_into(layout: &mut Layout, cond: usize, flag: usize, out: usize) {
    layout.add_const(1, out);
    if_nonzero(layout, cond, flag, |layout| layout.sub_const(1, out));
}
