//! # Copy Routines (spec §4.3)
//!
//! Non-destructive copy between two known cells, using `COPY` as the
//! shuttle register.

use crate::layout::{Layout, COPY};

/// `copy(src, dst)`: preserves `src`, adds its value into `dst`.
///
/// Precondition: `COPY` is zero. Effect: `src` unchanged, `dst +=
/// original(src)`, `COPY` zero, cursor 0.
pub fn copy(layout: &mut Layout, src: usize, dst: usize) {
    layout.zero(COPY); // defensive: COPY should already be zero

    // Drain src into both dst and COPY.
    layout.move_to(src);
    layout.raw("[");
    layout.raw("-");
    layout.move_to(dst);
    layout.raw("+");
    layout.move_to(COPY);
    layout.raw("+");
    layout.move_to(src);
    layout.raw("]");
    layout.reset();

    // Drain COPY back into src, restoring it.
    layout.move_to(COPY);
    layout.raw("[");
    layout.raw("-");
    layout.move_to(src);
    layout.raw("+");
    layout.move_to(COPY);
    layout.raw("]");
    layout.reset();
}

/// Alias used when the caller's intent is "read `src` into `dst`".
pub fn copy_into(layout: &mut Layout, src: usize, dst: usize) {
    copy(layout, src, dst);
}

/// Alias used when the caller's intent is "write `src`'s value out to
/// `dst`" — same routine, named for the direction the indirect
/// wrappers thread through it.
pub fn copy_from(layout: &mut Layout, src: usize, dst: usize) {
    copy(layout, src, dst);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;

    #[test]
    fn copy_leaves_cursor_at_zero() {
        let roster = Roster::new(&["A".to_string()]).unwrap();
        let mut layout = Layout::new(&roster, 8);
        copy(&mut layout, crate::layout::RESULT, crate::layout::RIGHT);
        assert_eq!(layout.cursor(), 0);
    }
}
