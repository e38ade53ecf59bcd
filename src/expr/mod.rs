//! # Expression Evaluator (spec §4.6)
//!
//! Recursive descent over the binary/unary/terminal operator tokens,
//! managing the left-hand-stack depth counter so inner evaluations
//! never clobber outer ones. Grounded on the teacher's `parser::ast`
//! one-variant-per-shape discrimination (here: binary vs. unary vs.
//! terminal) and its `encoder`'s per-opcode emit functions (here:
//! [`ops`]'s per-operator micro-routines).

pub mod ops;

use crate::emit::indirect;
use crate::error::CompileError;
use crate::layout::{Layout, RIGHT};

/// Evaluate the expression starting at `tokens[idx]`, emitting code
/// that writes the result into `target` (which must already be zero).
/// Returns the index just past the construct's matching close token.
pub fn evaluate(
    tokens: &[String],
    idx: usize,
    layout: &mut Layout,
    target: usize,
    depth: usize,
) -> Result<usize, CompileError> {
    let tok = tokens
        .get(idx)
        .ok_or(CompileError::UnexpectedEof("expression"))?
        .as_str();

    match tok {
        "mod" | "sqrt" | "factorial" => Err(CompileError::UnknownExpression(tok.to_string())),

        "add" | "sub" | "mul" | "div" => evaluate_binary(tokens, idx, layout, target, depth, tok),

        "cube" | "square" | "twice" => evaluate_unary(tokens, idx, layout, target, depth, tok),

        "const" => evaluate_const(tokens, idx, layout, target),

        "value_of" => evaluate_value_of(tokens, idx, layout, target),

        other => Err(CompileError::UnknownExpression(other.to_string())),
    }
}

fn evaluate_binary(
    tokens: &[String],
    idx: usize,
    layout: &mut Layout,
    target: usize,
    depth: usize,
    op: &str,
) -> Result<usize, CompileError> {
    let left_offset = layout.stack_left(depth)?;
    layout.zero(left_offset);
    layout.zero(RIGHT);

    let next_depth = depth + 1;
    let after_left = evaluate(tokens, idx + 1, layout, left_offset, next_depth)?;

    if op == "div" && is_literal_zero(tokens, after_left) {
        return Err(CompileError::DivisionByZero);
    }

    let after_right = evaluate(tokens, after_left, layout, RIGHT, next_depth)?;

    let end_token = format!("end_{op}");
    if tokens.get(after_right).map(String::as_str) != Some(end_token.as_str()) {
        return Err(CompileError::MalformedBracket {
            opener: "add|sub|mul|div",
            closer: "end_add|end_sub|end_mul|end_div",
            at: idx,
        });
    }

    match op {
        "add" => ops::add(layout, left_offset, target),
        "sub" => ops::sub(layout, left_offset, target),
        "mul" => ops::mul(layout, left_offset, target),
        "div" => ops::div(layout, left_offset, target),
        _ => unreachable!("only add/sub/mul/div reach this arm"),
    }

    Ok(after_right + 1)
}

fn evaluate_unary(
    tokens: &[String],
    idx: usize,
    layout: &mut Layout,
    target: usize,
    depth: usize,
    op: &str,
) -> Result<usize, CompileError> {
    layout.zero(RIGHT);
    let after_child = evaluate(tokens, idx + 1, layout, RIGHT, depth)?;

    let end_token = format!("end_{op}");
    if tokens.get(after_child).map(String::as_str) != Some(end_token.as_str()) {
        return Err(CompileError::MalformedBracket {
            opener: "cube|square|twice",
            closer: "end_cube|end_square|end_twice",
            at: idx,
        });
    }

    match op {
        "cube" => ops::cube(layout, target),
        "square" => ops::square(layout, target),
        "twice" => ops::twice(layout, target),
        _ => unreachable!("only cube/square/twice reach this arm"),
    }

    Ok(after_child + 1)
}

fn evaluate_const(
    tokens: &[String],
    idx: usize,
    layout: &mut Layout,
    target: usize,
) -> Result<usize, CompileError> {
    let literal = tokens
        .get(idx + 1)
        .ok_or(CompileError::UnexpectedEof("const literal"))?;
    let value: i32 = literal
        .parse()
        .map_err(|_| CompileError::UnknownExpression(format!("const,{literal}")))?;
    if value < 0 {
        layout.sub_const((-value) as u32, target);
    } else {
        layout.add_const(value as u32, target);
    }
    Ok(idx + 2)
}

fn evaluate_value_of(
    tokens: &[String],
    idx: usize,
    layout: &mut Layout,
    target: usize,
) -> Result<usize, CompileError> {
    let name = tokens
        .get(idx + 1)
        .ok_or(CompileError::UnexpectedEof("value_of operand"))?;
    match name.as_str() {
        "first_person" => indirect::copy_from_active(layout, target),
        "second_person" => indirect::copy_from_second(layout, target),
        _ => {
            let src = layout.resolve_char(name)?;
            crate::emit::copy::copy(layout, src, target);
        }
    }
    Ok(idx + 2)
}

/// Peek (without evaluating) whether the construct at `idx` is the
/// literal terminal `const 0` / `const -0` — used to reject
/// compile-time-obvious division by zero before emitting a
/// non-terminating program.
fn is_literal_zero(tokens: &[String], idx: usize) -> bool {
    tokens.get(idx).map(String::as_str) == Some("const")
        && tokens
            .get(idx + 1)
            .and_then(|t| t.parse::<i32>().ok())
            .map(|v| v == 0)
            .unwrap_or(false)
}
