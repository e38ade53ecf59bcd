//! # Top-Level Orchestration
//!
//! Wires the token stream through roster resolution, statement
//! dispatch, and the peephole tidier, the same two-phase shape as the
//! teacher's `lib.rs` (`first_pass` resolves symbols, `encoder` emits
//! against them) — here, `roster::extract_roster` stands in for the
//! first pass and `statements::run` for the encoder.

use crate::config::Config;
use crate::error::CompileError;
use crate::layout::Layout;
use crate::{roster, statements, tidy, tokens};

/// Compile NSPL source text into a TAPE program.
pub fn compile(source: &str, config: &Config) -> Result<String, CompileError> {
    let atoms = tokens::tokenize(source);
    compile_tokens(&atoms, config)
}

/// Compile an already-tokenised NSPL stream. Exposed separately so
/// callers that already hold a token vector (tests, tooling) don't pay
/// for a round trip through source text.
pub fn compile_tokens(atoms: &[String], config: &Config) -> Result<String, CompileError> {
    let roster = {
        let _span = tracing::debug_span!(target: "compiler.roster", "extract_roster", atoms = atoms.len()).entered();
        let roster = roster::extract_roster(atoms)?;
        tracing::debug!(target: "compiler.roster", characters = roster.len(), "roster resolved");
        roster
    };
    let mut layout = Layout::new(&roster, config.max_depth);

    {
        let _span = tracing::debug_span!(target: "compiler.statements", "dispatch_statements").entered();
        statements::run(atoms, &mut layout, config)?;
    }

    let code = layout.finish();
    tracing::debug!(target: "compiler.statements", emitted_bytes = code.len(), "statement dispatch complete");

    Ok(if config.tidy {
        let _span = tracing::debug_span!(target: "compiler.tidy", "tidy", input_bytes = code.len()).entered();
        let tidied = tidy::tidy(&code);
        tracing::debug!(target: "compiler.tidy", output_bytes = tidied.len(), "tidy pass complete");
        tidied
    } else {
        code
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_a_constant() {
        // chars A endchars activate A assign const 72 end_assign output
        let source = "chars,A,endchars,activate,A,assign,const,72,end_assign,output";
        let code = compile(source, &Config::default()).unwrap();
        assert_eq!(code.matches('.').count(), 1);
        assert_eq!(
            code.chars().filter(|&c| c == '[').count(),
            code.chars().filter(|&c| c == ']').count()
        );
    }

    #[test]
    fn sum_of_two_constants() {
        let source =
            "chars,A,endchars,activate,A,assign,add,const,12,const,20,end_add,end_assign,output";
        let code = compile(source, &Config::default()).unwrap();
        assert!(code.contains('.'));
    }

    #[test]
    fn missing_roster_is_fatal() {
        let source = "activate,A,output";
        assert_eq!(
            compile(source, &Config::default()),
            Err(CompileError::RosterMissing)
        );
    }

    #[test]
    fn compile_tidy_flag_changes_output_length() {
        let source = "chars,A,endchars,activate,A,assign,const,5,end_assign,output";
        let tidied = compile(
            source,
            &Config {
                tidy: true,
                ..Config::default()
            },
        )
        .unwrap();
        let raw = compile(
            source,
            &Config {
                tidy: false,
                ..Config::default()
            },
        )
        .unwrap();
        assert!(tidied.len() <= raw.len());
    }

    #[test]
    fn division_by_literal_zero_is_rejected_end_to_end() {
        let source = "chars,A,endchars,activate,A,assign,div,const,9,const,0,end_div,end_assign";
        assert_eq!(
            compile(source, &Config::default()),
            Err(CompileError::DivisionByZero)
        );
    }
}
