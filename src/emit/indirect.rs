//! # Indirect Access (spec §4.4)
//!
//! Reads from or writes to the cell whose index is only known at run
//! time: the roster slot stored in `ACTIVE` or `SEC`. The target
//! machine has no indirect addressing, so the generator unrolls a
//! cascade, one nested level per declared character, walked in
//! reverse so the level built last (character 1) becomes the
//! outermost. `RETRIEVE` holds a copy of the runtime index and is
//! decremented once per level; the level whose decrement brings
//! `RETRIEVE` to zero is the one whose body the `LOOP` guard lets
//! fire, and firing clears `LOOP` so no other level's body runs.
//!
//! `source_index_cell` can legitimately be `0` at run time (no second
//! on-stage character, per spec.md §4.5's `activate` post-condition),
//! in which case no level should fire at all. The whole cascade is
//! therefore wrapped in its own `if_nonzero` guard — without it,
//! `LOOP` would be primed to 1 and never drained back to 0, since
//! none of the nested brackets that would normally consume it ever
//! run.
//!
//! This mirrors the teacher's closest analogue — `BrFlags::parse`'s
//! small enumerable dispatch — generalised to the unrolled nested-loop
//! idiom this spec's target machine requires.

use crate::emit::control;
use crate::emit::copy;
use crate::layout::{Layout, LOOP, RETRIEVE, TEMP2};

/// Walk the declared-character cascade, invoking `body(layout, slot)`
/// exactly once, for the slot equal to the runtime value currently
/// held in `source_index_cell` (`ACTIVE` or `SEC`), or zero times if
/// that value is `0`. `source_index_cell` is left unchanged.
///
/// `body` may leave the cursor wherever it likes; the cascade restores
/// it before continuing. Precondition/postcondition: cursor 0, `LOOP`
/// and `RETRIEVE` zero.
pub fn dispatch<F>(layout: &mut Layout, source_index_cell: usize, mut body: F)
where
    F: FnMut(&mut Layout, usize),
{
    let total = layout.declared_character_count();
    if total == 0 {
        return;
    }

    control::if_nonzero(layout, source_index_cell, TEMP2, |layout| {
        copy::copy(layout, source_index_cell, RETRIEVE);
        layout.add_const(1, LOOP);

        layout.move_to(RETRIEVE);
        build_level(layout, 1, total, &mut body);
        layout.reset();
    });
    layout.reset();
}

/// Recursively emit the nested bracket structure for roster slots
/// `level..=total`. Precondition: cursor at `RETRIEVE`. Postcondition:
/// cursor at `RETRIEVE`.
fn build_level(layout: &mut Layout, level: usize, total: usize, body: &mut dyn FnMut(&mut Layout, usize)) {
    layout.raw("["); // while RETRIEVE != 0
    layout.raw("-"); // RETRIEVE -= 1

    if level < total {
        build_level(layout, level + 1, total, body);
    }

    layout.move_to(LOOP);
    layout.raw("["); // guard: fires at most once across the whole cascade
    layout.raw("-");
    body(layout, level);
    layout.move_to(LOOP);
    layout.raw("]");

    layout.move_to(RETRIEVE);
    layout.raw("]");
}

/// `copy_from_active(dst)`: read `CHAR[ACTIVE]` into `dst`.
pub fn copy_from_active(layout: &mut Layout, dst: usize) {
    dispatch(layout, crate::layout::ACTIVE, |layout, slot| {
        let src = layout.char_offset_for_slot(slot);
        copy::copy_from(layout, src, dst);
    });
}

/// `copy_from_second(dst)`: read `CHAR[SEC]` into `dst`.
pub fn copy_from_second(layout: &mut Layout, dst: usize) {
    dispatch(layout, crate::layout::SEC, |layout, slot| {
        let src = layout.char_offset_for_slot(slot);
        copy::copy_from(layout, src, dst);
    });
}

/// `copy_into_second(src)`: write `src`'s value into `CHAR[SEC]`.
pub fn copy_into_second(layout: &mut Layout, src: usize) {
    dispatch(layout, crate::layout::SEC, |layout, slot| {
        let dst = layout.char_offset_for_slot(slot);
        copy::copy_into(layout, src, dst);
    });
}

/// `print_second`: emit `.` at `CHAR[SEC]`.
pub fn print_second(layout: &mut Layout) {
    dispatch(layout, crate::layout::SEC, |layout, slot| {
        let offset = layout.char_offset_for_slot(slot);
        layout.move_to(offset);
        layout.raw(".");
    });
}

/// `reset_second`: clear `CHAR[SEC]`.
pub fn reset_second(layout: &mut Layout) {
    dispatch(layout, crate::layout::SEC, |layout, slot| {
        let offset = layout.char_offset_for_slot(slot);
        layout.move_to(offset);
        layout.raw("[-]");
    });
}
