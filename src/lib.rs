//! # nspl2tape
//!
//! A compiler from a tokenised stage-play language ("NSPL") to an
//! 8-instruction tape-machine language ("TAPE"). No intermediate AST:
//! the token stream is consumed directly by a recursive-descent
//! dispatcher that emits tape instructions as it goes.
//!
//! ## Pipeline
//!
//! 1. **Tokens** - split raw source into its comma-separated atoms
//! 2. **Roster** - resolve the `chars` block into a character table
//! 3. **Statements** - dispatch each statement token to its handler,
//!    which may recurse into the expression evaluator
//! 4. **Tidy** - collapse redundant pointer moves in the emitted code
//!
//! ## Example
//!
//! ```rust,no_run
//! use nspl2tape::compiler::compile;
//! use nspl2tape::config::Config;
//!
//! let source = std::fs::read_to_string("scene.nspl").unwrap();
//! let tape = compile(&source, &Config::default()).unwrap();
//! println!("{tape}");
//! ```

pub mod bracket;
pub mod compiler;
pub mod config;
pub mod emit;
pub mod error;
pub mod expr;
pub mod layout;
pub mod roster;
pub mod statements;
pub mod tidy;
pub mod tokens;
