//! # Compile Errors
//!
//! Fatal error kinds the compiler can raise. There is no recovery path:
//! the first malformed construct aborts compilation.

use thiserror::Error;

/// Everything that can make compilation fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The `chars`/`endchars` block was empty or absent.
    #[error("no characters declared: the `chars` block is empty or missing")]
    RosterMissing,

    /// A handler referenced a character name not in the roster.
    #[error("unknown character: {0:?}")]
    UnknownCharacter(String),

    /// `enter_scene_multiple`/`exit_scene_multiple` saw the wrong number
    /// of names.
    #[error("{construct} expects {expected} name(s), found {found}")]
    BadArity {
        construct: &'static str,
        expected: &'static str,
        found: usize,
    },

    /// A token in expression position has no handler.
    #[error("unknown expression token: {0:?}")]
    UnknownExpression(String),

    /// `div` with a syntactically-literal zero right operand.
    #[error("division by a literal zero operand")]
    DivisionByZero,

    /// Left-hand arena nesting exceeded the configured bound.
    #[error("binary expression nesting exceeds the configured maximum depth ({0})")]
    NestingTooDeep(usize),

    /// A `START,...,END` bracket pair was missing or malformed.
    #[error("malformed bracket: expected {opener:?} ... {closer:?} starting at token {at}")]
    MalformedBracket {
        opener: &'static str,
        closer: &'static str,
        at: usize,
    },

    /// Token stream ended before a construct was fully consumed.
    #[error("unexpected end of token stream while parsing {0}")]
    UnexpectedEof(&'static str),
}
