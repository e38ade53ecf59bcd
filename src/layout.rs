//! # Tape-Layout Model
//!
//! Owns the fixed cell assignment described in spec §3 and the
//! accumulated TAPE output. Every public emitter starts and ends with
//! the logical cursor at offset 0; internal helpers (`raw`, `move_to`)
//! may leave the cursor wherever a caller needs it mid-sequence, as
//! long as the caller restores it before returning control.
//!
//! Grounded on `original_source/nspl2bf.py`'s `MemoryLayout` (pointer
//! tracking, `move_pointer_to_character`, `reset_pointer`), rebuilt as
//! an owned-string-builder in the teacher's `encoder`-module style (a
//! struct accumulating output with `&mut self` emitter methods).

use crate::error::CompileError;
use crate::roster::Roster;

/// Scratch for non-destructive copy.
pub const COPY: usize = 0;
/// Expression/decision result.
pub const RESULT: usize = 1;
/// Loop-counter scratch.
pub const LOOP: usize = 2;
/// Indirect-address walker.
pub const RETRIEVE: usize = 3;
/// Scratch for unary ops.
pub const TEMP: usize = 4;
/// Reserved scratch.
pub const TEMP2: usize = 5;
/// Right-hand operand of binary ops.
pub const RIGHT: usize = 6;
/// On-stage slot 1.
pub const OS1: usize = 7;
/// On-stage slot 2.
pub const OS2: usize = 8;
/// Current active character's 1-based index.
pub const ACTIVE: usize = 9;
/// Second-person character's 1-based index.
pub const SEC: usize = 10;
/// First per-character cell. `CHAR[i]` lives at `CHAR_BASE + i`.
pub const CHAR_BASE: usize = 11;

/// Accumulates emitted TAPE instructions and tracks the logical data
/// pointer so every offset computation stays relative to a known
/// cursor position.
pub struct Layout<'a> {
    roster: &'a Roster,
    max_depth: usize,
    cursor: usize,
    code: String,
}

impl<'a> Layout<'a> {
    #[must_use]
    pub fn new(roster: &'a Roster, max_depth: usize) -> Self {
        Self {
            roster,
            max_depth,
            cursor: 0,
            code: String::new(),
        }
    }

    /// Consume the layout, returning the accumulated (untidied) TAPE
    /// program. Panics if called with a non-zero cursor, which would
    /// indicate a bug in an emitter's contract, not a user error.
    #[must_use]
    pub fn finish(self) -> String {
        assert_eq!(self.cursor, 0, "layout cursor must be 0 between statements");
        self.code
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Append raw TAPE instructions that do not move the pointer
    /// (`+`, `-`, `.`, `[`, `]`, `#`).
    pub fn raw(&mut self, s: &str) {
        self.code.push_str(s);
    }

    /// Move the logical cursor to `offset`, emitting `>`/`<` runs as
    /// needed from the *current* cursor (not necessarily 0).
    pub fn move_to(&mut self, offset: usize) {
        if offset > self.cursor {
            self.code.push_str(&">".repeat(offset - self.cursor));
        } else if offset < self.cursor {
            self.code.push_str(&"<".repeat(self.cursor - offset));
        }
        self.cursor = offset;
    }

    /// Move the cursor back to 0.
    pub fn reset(&mut self) {
        self.move_to(0);
    }

    /// `zero(o)`: clear cell `o` and return the cursor to 0.
    pub fn zero(&mut self, offset: usize) {
        self.move_to(offset);
        self.raw("[-]");
        self.reset();
    }

    /// `add_const(n, o)`: add `n` (non-negative) to cell `o`.
    pub fn add_const(&mut self, n: u32, offset: usize) {
        self.move_to(offset);
        for _ in 0..n {
            self.raw("+");
        }
        self.reset();
    }

    /// `sub_const(n, o)`: subtract `n` (non-negative) from cell `o`.
    pub fn sub_const(&mut self, n: u32, offset: usize) {
        self.move_to(offset);
        for _ in 0..n {
            self.raw("-");
        }
        self.reset();
    }

    /// Offset of the per-character value cell for a declared name.
    pub fn resolve_char(&self, name: &str) -> Result<usize, CompileError> {
        let slot = self.roster.index_of(name)?;
        Ok(CHAR_BASE + slot)
    }

    /// Offset of `CHAR[slot]` for an already-resolved roster slot
    /// (used by the indirect-dispatch cascade, which walks slots
    /// rather than names).
    #[must_use]
    pub fn char_offset_for_slot(&self, slot: usize) -> usize {
        CHAR_BASE + slot
    }

    /// Number of *declared* characters (excludes the synthetic `left`
    /// slot 0), i.e. the range the indirect cascade must dispatch over.
    #[must_use]
    pub fn declared_character_count(&self) -> usize {
        self.roster.len() - 1
    }

    /// The 1-based roster index of a declared character — the value
    /// stored *in* `OS1`/`OS2`/`ACTIVE`/`SEC`, as opposed to
    /// `resolve_char`'s cell offset.
    pub fn character_index(&self, name: &str) -> Result<usize, CompileError> {
        self.roster.index_of(name)
    }

    /// Offset of the depth-th left-hand scratch cell (spec §3): a
    /// `roster.len()`-stride arena rooted at `CHAR_BASE`, bounded by
    /// the configured maximum nesting depth.
    pub fn stack_left(&self, depth: usize) -> Result<usize, CompileError> {
        if depth > self.max_depth {
            return Err(CompileError::NestingTooDeep(self.max_depth));
        }
        let stride = self.roster.len() + 1;
        Ok(CHAR_BASE + depth * stride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(&["A".to_string(), "B".to_string()]).unwrap()
    }

    #[test]
    fn move_to_tracks_cursor_both_directions() {
        let r = roster();
        let mut layout = Layout::new(&r, 8);
        layout.move_to(5);
        layout.move_to(2);
        layout.reset();
        assert_eq!(layout.finish(), ">>>>><<<<<");
    }

    #[test]
    fn zero_emits_move_clear_reset() {
        let r = roster();
        let mut layout = Layout::new(&r, 8);
        layout.zero(COPY);
        assert_eq!(layout.finish(), "[-]");
    }

    #[test]
    fn add_const_emits_plus_run() {
        let r = roster();
        let mut layout = Layout::new(&r, 8);
        layout.add_const(3, RESULT);
        assert_eq!(layout.finish(), ">+++<");
    }

    #[test]
    fn resolve_char_offsets_after_left_sentinel() {
        let r = roster();
        let layout = Layout::new(&r, 8);
        assert_eq!(layout.resolve_char("A").unwrap(), CHAR_BASE + 1);
        assert_eq!(layout.resolve_char("B").unwrap(), CHAR_BASE + 2);
    }

    #[test]
    fn stack_left_depth_zero_is_char_zero() {
        let r = roster();
        let layout = Layout::new(&r, 8);
        assert_eq!(layout.stack_left(0).unwrap(), CHAR_BASE);
    }

    #[test]
    fn stack_left_beyond_max_depth_errors() {
        let r = roster();
        let layout = Layout::new(&r, 1);
        assert_eq!(
            layout.stack_left(2),
            Err(CompileError::NestingTooDeep(1))
        );
    }
}
