//! # Character Roster
//!
//! The ordered list of declared character names, established once by
//! the `chars` block and frozen thereafter. The synthetic name `left`
//! occupies slot 0 and seeds the per-nesting left-hand stack used by
//! binary expressions (spec §3).
//!
//! Insertion-ordered, linear-scan lookups — the teacher's
//! `first_pass::symbol_table::SymbolTable` makes the same tradeoff,
//! and rosters here are smaller still (a handful of characters).

use crate::bracket;
use crate::error::CompileError;

/// The synthetic name occupying roster slot 0.
pub const LEFT_SENTINEL: &str = "left";

/// Locate the program's `chars ... endchars` block and build the
/// roster from it. Runs as its own pass ahead of code generation, the
/// way the teacher's `first_pass` resolves symbols before the
/// `encoder` emits against them — every later handler can then borrow
/// a fully-resolved [`Roster`] for the whole compilation.
pub fn extract_roster(tokens: &[String]) -> Result<Roster, CompileError> {
    let chars_at = tokens
        .iter()
        .position(|t| t == "chars")
        .ok_or(CompileError::RosterMissing)?;
    let (declared, _) = bracket::extract(tokens, "endchars", chars_at)
        .ok_or(CompileError::RosterMissing)?;
    Roster::new(&declared)
}

/// Ordered character names, with `left` always at slot 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Build a roster from the names declared between `chars` and
    /// `endchars`. Fails if the declared list (excluding the synthetic
    /// `left` slot) is empty.
    pub fn new(declared: &[String]) -> Result<Self, CompileError> {
        if declared.is_empty() {
            return Err(CompileError::RosterMissing);
        }
        let mut names = Vec::with_capacity(declared.len() + 1);
        names.push(LEFT_SENTINEL.to_string());
        names.extend(declared.iter().cloned());
        Ok(Self { names })
    }

    /// Number of roster slots, including the synthetic `left` slot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve a declared character name to its roster slot index.
    /// `left` itself is not resolvable through this path — it is only
    /// ever addressed internally via [`Roster::left_slot`].
    pub fn index_of(&self, name: &str) -> Result<usize, CompileError> {
        if name == LEFT_SENTINEL {
            return Err(CompileError::UnknownCharacter(name.to_string()));
        }
        self.names
            .iter()
            .position(|n| n == name)
            .filter(|&i| i != 0)
            .ok_or_else(|| CompileError::UnknownCharacter(name.to_string()))
    }

    /// Slot index of the synthetic `left` entry (always 0).
    #[must_use]
    pub fn left_slot(&self) -> usize {
        0
    }
}
