//! # Statement Handlers & Token Dispatcher (spec §4.5, §4.7)
//!
//! One function per NSPL statement shape, plus [`run`], the linear
//! scan that looks each token up, delegates to its handler, and
//! advances by however many tokens the handler consumed. Unrecognised
//! atoms (scene directions, stray punctuation tokens) are not an
//! error — the reference transpiler ignores anything it doesn't
//! recognise, so an unrecognised token simply advances the scan by
//! one.
//!
//! Grounded on the teacher's `parser::parse_lines`/`process_line`
//! dispatch-by-leading-keyword shape: a flat match over the current
//! token drives a per-construct handler, each returning where the scan
//! should resume.

use crate::config::Config;
use crate::emit::control::{if_nonzero, not_into};
use crate::emit::{copy, indirect};
use crate::error::CompileError;
use crate::expr;
use crate::bracket;
use crate::layout::{Layout, ACTIVE, OS1, OS2, RESULT, SEC, TEMP, TEMP2};

/// Walk `tokens` from the start, emitting code for every recognised
/// statement into `layout`.
pub fn run(tokens: &[String], layout: &mut Layout, config: &Config) -> Result<(), CompileError> {
    let mut idx = 0;
    while idx < tokens.len() {
        tracing::trace!(target: "compiler.statements", idx, atom = %tokens[idx], "dispatch");
        idx = match tokens[idx].as_str() {
            "chars" => skip_chars_block(tokens, idx)?,
            "enter_scene_multiple" => enter_scene_multiple(tokens, idx, layout)?,
            "exit_scene_multiple" => exit_scene_multiple(tokens, idx, layout)?,
            "enter_scene" => enter_scene(tokens, idx, layout)?,
            "exit_scene" => exit_scene(tokens, idx, layout)?,
            "activate" => activate(tokens, idx, layout)?,
            "output" => {
                indirect::print_second(layout);
                idx + 1
            }
            "break" => {
                if config.emit_debug_markers {
                    layout.raw("#");
                }
                idx + 1
            }
            "assign" => assign(tokens, idx, layout)?,
            _ => idx + 1,
        };
    }
    Ok(())
}

/// The roster is already resolved by [`roster::extract_roster`] before
/// `run` starts; encountering `chars` again here just skips past its
/// (already-consumed) declaration without emitting anything.
fn skip_chars_block(tokens: &[String], idx: usize) -> Result<usize, CompileError> {
    let (_, next) = bracket::extract(tokens, "endchars", idx)
        .ok_or(CompileError::RosterMissing)?;
    Ok(next)
}

/// `enter_scene_multiple N1,N2,end_enter_scene_multiple`: seat both
/// on-stage slots at once.
fn enter_scene_multiple(tokens: &[String], idx: usize, layout: &mut Layout) -> Result<usize, CompileError> {
    let (names, next) = bracket::extract(tokens, "end_enter_scene_multiple", idx).ok_or(
        CompileError::MalformedBracket {
            opener: "enter_scene_multiple",
            closer: "end_enter_scene_multiple",
            at: idx,
        },
    )?;
    if names.len() != 2 {
        return Err(CompileError::BadArity {
            construct: "enter_scene_multiple",
            expected: "2",
            found: names.len(),
        });
    }
    let first = layout.character_index(&names[0])?;
    let second = layout.character_index(&names[1])?;
    layout.zero(OS1);
    layout.add_const(first as u32, OS1);
    layout.zero(OS2);
    layout.add_const(second as u32, OS2);
    Ok(next)
}

/// `exit_scene_multiple [N1,N2] end_exit_scene_multiple`: clear both
/// on-stage slots. The payload (if any) names who is leaving but isn't
/// needed to clear the slots, so it's only checked for arity.
fn exit_scene_multiple(tokens: &[String], idx: usize, layout: &mut Layout) -> Result<usize, CompileError> {
    let (names, next) = bracket::extract(tokens, "end_exit_scene_multiple", idx).ok_or(
        CompileError::MalformedBracket {
            opener: "exit_scene_multiple",
            closer: "end_exit_scene_multiple",
            at: idx,
        },
    )?;
    if !names.is_empty() && names.len() != 2 {
        return Err(CompileError::BadArity {
            construct: "exit_scene_multiple",
            expected: "0 or 2",
            found: names.len(),
        });
    }
    layout.zero(OS1);
    layout.zero(OS2);
    Ok(next)
}

/// `enter_scene N`: seat `N` in whichever on-stage slot is currently
/// empty, preferring `OS1`. Uses the same test-and-complement idiom as
/// [`activate`]: compute `free1 = (OS1 == 0)` into `RESULT`, its
/// complement into `TEMP`, then fire exactly one of the two writes.
fn enter_scene(tokens: &[String], idx: usize, layout: &mut Layout) -> Result<usize, CompileError> {
    let name = tokens
        .get(idx + 1)
        .ok_or(CompileError::UnexpectedEof("enter_scene operand"))?;
    let n = layout.character_index(name)? as u32;

    layout.zero(RESULT);
    not_into(layout, OS1, TEMP2, RESULT); // RESULT = 1 iff OS1 is free
    layout.zero(TEMP);
    not_into(layout, RESULT, TEMP2, TEMP); // TEMP = 1 iff OS1 is occupied

    if_nonzero(layout, RESULT, TEMP2, |layout| {
        layout.zero(OS1);
        layout.add_const(n, OS1);
    });
    if_nonzero(layout, TEMP, TEMP2, |layout| {
        layout.zero(OS2);
        layout.add_const(n, OS2);
    });

    layout.zero(RESULT);
    layout.zero(TEMP);
    Ok(idx + 2)
}

/// `exit_scene N`: remove `N` from whichever on-stage slot holds it.
fn exit_scene(tokens: &[String], idx: usize, layout: &mut Layout) -> Result<usize, CompileError> {
    let name = tokens
        .get(idx + 1)
        .ok_or(CompileError::UnexpectedEof("exit_scene operand"))?;
    let n = layout.character_index(name)? as u32;

    layout.sub_const(n, OS1);
    if_nonzero(layout, OS1, TEMP2, |layout| {
        layout.add_const(n, OS1); // wasn't N after all, restore
        layout.sub_const(n, OS2); // N must be on the other slot
    });
    Ok(idx + 2)
}

/// `activate N`: `ACTIVE := N`; `SEC` becomes whichever on-stage slot
/// does *not* hold `N` (the scene partner being addressed by
/// `second_person`).
fn activate(tokens: &[String], idx: usize, layout: &mut Layout) -> Result<usize, CompileError> {
    let name = tokens
        .get(idx + 1)
        .ok_or(CompileError::UnexpectedEof("activate operand"))?;
    let n = layout.character_index(name)? as u32;

    layout.zero(ACTIVE);
    layout.add_const(n, ACTIVE);

    layout.zero(RESULT);
    copy::copy(layout, OS2, RESULT);
    layout.sub_const(n, RESULT); // RESULT == 0 iff OS2 == N

    layout.zero(TEMP);
    not_into(layout, RESULT, TEMP2, TEMP); // TEMP = 1 iff OS2 == N

    layout.zero(SEC);
    if_nonzero(layout, TEMP, TEMP2, |layout| {
        copy::copy(layout, OS1, SEC); // OS2 is N, so SEC is the OS1 occupant
    });

    layout.zero(RESULT);
    not_into(layout, TEMP, TEMP2, RESULT); // RESULT = 1 iff OS2 != N
    if_nonzero(layout, RESULT, TEMP2, |layout| {
        copy::copy(layout, OS2, SEC); // OS2 isn't N, so SEC is the OS2 occupant
    });

    layout.zero(RESULT);
    layout.zero(TEMP);
    Ok(idx + 2)
}

/// `assign EXPR end_assign`: evaluate `EXPR` into `RESULT`, then write
/// it into `CHAR[SEC]` (whoever `activate` most recently addressed as
/// the second person).
fn assign(tokens: &[String], idx: usize, layout: &mut Layout) -> Result<usize, CompileError> {
    layout.zero(RESULT);
    let after_expr = expr::evaluate(tokens, idx + 1, layout, RESULT, 0)?;
    if tokens.get(after_expr).map(String::as_str) != Some("end_assign") {
        return Err(CompileError::MalformedBracket {
            opener: "assign",
            closer: "end_assign",
            at: idx,
        });
    }
    indirect::reset_second(layout);
    indirect::copy_into_second(layout, RESULT);
    layout.zero(RESULT);
    Ok(after_expr + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn roster() -> Roster {
        Roster::new(&["A".to_string(), "B".to_string(), "C".to_string()]).unwrap()
    }

    fn balanced(code: &str) -> bool {
        code.chars().filter(|&c| c == '[').count() == code.chars().filter(|&c| c == ']').count()
    }

    #[test]
    fn skips_chars_block_without_emitting() {
        let t = tokens(&["chars", "A", "B", "endchars"]);
        let next = skip_chars_block(&t, 0).unwrap();
        assert_eq!(next, 4);
    }

    #[test]
    fn enter_scene_multiple_requires_exactly_two_names() {
        let r = roster();
        let mut layout = Layout::new(&r, 8);
        let t = tokens(&["enter_scene_multiple", "A", "end_enter_scene_multiple"]);
        assert_eq!(
            enter_scene_multiple(&t, 0, &mut layout),
            Err(CompileError::BadArity {
                construct: "enter_scene_multiple",
                expected: "2",
                found: 1,
            })
        );
    }

    #[test]
    fn enter_scene_multiple_seats_both_slots() {
        let r = roster();
        let mut layout = Layout::new(&r, 8);
        let t = tokens(&["enter_scene_multiple", "A", "B", "end_enter_scene_multiple"]);
        let next = enter_scene_multiple(&t, 0, &mut layout).unwrap();
        assert_eq!(next, t.len());
        assert!(balanced(&layout.finish()));
    }

    #[test]
    fn exit_scene_multiple_accepts_empty_payload() {
        let r = roster();
        let mut layout = Layout::new(&r, 8);
        let t = tokens(&["exit_scene_multiple", "end_exit_scene_multiple"]);
        let next = exit_scene_multiple(&t, 0, &mut layout).unwrap();
        assert_eq!(next, t.len());
    }

    #[test]
    fn enter_scene_balances_and_consumes_two_tokens() {
        let r = roster();
        let mut layout = Layout::new(&r, 8);
        let t = tokens(&["enter_scene", "A"]);
        let next = enter_scene(&t, 0, &mut layout).unwrap();
        assert_eq!(next, 2);
        assert!(balanced(&layout.finish()));
    }

    #[test]
    fn exit_scene_balances_and_consumes_two_tokens() {
        let r = roster();
        let mut layout = Layout::new(&r, 8);
        let t = tokens(&["exit_scene", "A"]);
        let next = exit_scene(&t, 0, &mut layout).unwrap();
        assert_eq!(next, 2);
        assert!(balanced(&layout.finish()));
    }

    #[test]
    fn activate_balances_and_consumes_two_tokens() {
        let r = roster();
        let mut layout = Layout::new(&r, 8);
        let t = tokens(&["activate", "A"]);
        let next = activate(&t, 0, &mut layout).unwrap();
        assert_eq!(next, 2);
        assert!(balanced(&layout.finish()));
    }

    #[test]
    fn assign_consumes_through_end_assign() {
        let r = roster();
        let mut layout = Layout::new(&r, 8);
        let t = tokens(&["assign", "const", "65", "end_assign"]);
        let next = assign(&t, 0, &mut layout).unwrap();
        assert_eq!(next, t.len());
        assert!(balanced(&layout.finish()));
    }

    #[test]
    fn assign_without_closing_token_is_malformed() {
        let r = roster();
        let mut layout = Layout::new(&r, 8);
        let t = tokens(&["assign", "const", "65"]);
        assert_eq!(
            assign(&t, 0, &mut layout),
            Err(CompileError::MalformedBracket {
                opener: "assign",
                closer: "end_assign",
                at: 0,
            })
        );
    }

    #[test]
    fn run_ignores_unrecognised_atoms_and_advances() {
        let r = roster();
        let mut layout = Layout::new(&r, 8);
        let t = tokens(&["chars", "A", "endchars", "a_stray_scene_direction", "break"]);
        let config = Config::default();
        run(&t, &mut layout, &config).unwrap();
        assert!(layout.finish().ends_with('#'));
    }

    #[test]
    fn run_suppresses_break_marker_when_configured() {
        let r = roster();
        let mut layout = Layout::new(&r, 8);
        let t = tokens(&["break"]);
        let config = Config {
            emit_debug_markers: false,
            ..Config::default()
        };
        run(&t, &mut layout, &config).unwrap();
        assert_eq!(layout.finish(), "");
    }
}
