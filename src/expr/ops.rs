//! # Operator Micro-Routines (spec §4.6)
//!
//! Every routine here assumes `target` starts at zero (the evaluator
//! zeroes each target cell before recursing into it) and writes the
//! operator's result into `target` by the time it returns. `RIGHT`
//! always ends at zero; routine-local scratch (`LOOP`, `TEMP`,
//! `TEMP2`, `RETRIEVE`, `COPY`) is restored to zero before returning,
//! preserving the between-statement invariants of spec §3.

use crate::emit::{control, copy};
use crate::layout::{Layout, COPY, LOOP, RETRIEVE, RIGHT, TEMP, TEMP2};

/// `add`: drain `RIGHT` into `left`, then copy `left` into `target`.
pub fn add(layout: &mut Layout, left: usize, target: usize) {
    drain(layout, RIGHT, left, '+');
    copy::copy(layout, left, target);
}

/// `sub`: drain `RIGHT` out of `left` (decrementing), then copy `left`
/// into `target`.
pub fn sub(layout: &mut Layout, left: usize, target: usize) {
    drain(layout, RIGHT, left, '-');
    copy::copy(layout, left, target);
}

/// `mul`: while `RIGHT` > 0, decrement and copy `left` into `target` —
/// accumulates `left · RIGHT`.
pub fn mul(layout: &mut Layout, left: usize, target: usize) {
    layout.move_to(RIGHT);
    layout.raw("[");
    layout.raw("-");
    copy::copy(layout, left, target);
    layout.move_to(RIGHT);
    layout.raw("]");
    layout.reset();
}

/// `square`: computes `RIGHT²` into `target`, consuming `RIGHT`.
pub fn square(layout: &mut Layout, target: usize) {
    // Move R into LOOP (the constant multiplicand for this routine).
    drain(layout, RIGHT, LOOP, '+');
    // Reload a fresh iteration counter from LOOP into RIGHT.
    copy::copy(layout, LOOP, RIGHT);
    layout.move_to(RIGHT);
    layout.raw("[");
    layout.raw("-");
    copy::copy(layout, LOOP, TEMP);
    layout.move_to(RIGHT);
    layout.raw("]");
    layout.reset();
    copy::copy(layout, TEMP, target);
    layout.zero(TEMP);
    layout.zero(LOOP);
}

/// `cube`: square-then-multiply composition through `LOOP`,
/// `RETRIEVE`, `TEMP`, consuming `RIGHT`.
pub fn cube(layout: &mut Layout, target: usize) {
    // Preserve the original value in RETRIEVE across both passes.
    drain(layout, RIGHT, RETRIEVE, '+');

    // Pass 1: TEMP := RETRIEVE² (same shuttle-through-LOOP shape as `square`).
    copy::copy(layout, RETRIEVE, LOOP);
    copy::copy(layout, RETRIEVE, RIGHT);
    layout.move_to(RIGHT);
    layout.raw("[");
    layout.raw("-");
    copy::copy(layout, LOOP, TEMP);
    layout.move_to(RIGHT);
    layout.raw("]");
    layout.reset();
    layout.zero(LOOP);

    // Pass 2: TEMP := TEMP * RETRIEVE == RETRIEVE³.
    copy::copy(layout, TEMP, LOOP);
    layout.zero(TEMP);
    copy::copy(layout, RETRIEVE, RIGHT);
    layout.move_to(RIGHT);
    layout.raw("[");
    layout.raw("-");
    copy::copy(layout, LOOP, TEMP);
    layout.move_to(RIGHT);
    layout.raw("]");
    layout.reset();
    layout.zero(LOOP);

    copy::copy(layout, TEMP, target);
    layout.zero(TEMP);
    layout.zero(RETRIEVE);
}

/// `twice`: drain `RIGHT` into `TEMP` at rate 2, then copy `TEMP` into
/// `target`.
pub fn twice(layout: &mut Layout, target: usize) {
    layout.move_to(RIGHT);
    layout.raw("[");
    layout.raw("-");
    layout.move_to(TEMP);
    layout.raw("++");
    layout.move_to(RIGHT);
    layout.raw("]");
    layout.reset();
    copy::copy(layout, TEMP, target);
    layout.zero(TEMP);
}

/// `div`: integer division `left / RIGHT`, counter in `TEMP`.
///
/// Repeatedly tries to subtract the full divisor from `left`; a round
/// that fully subtracts it increments the quotient and continues,
/// a round that runs out of `left` partway through ends the division
/// (the remainder is discarded, matching floor division). Diverges
/// (loops forever) if `RIGHT` is zero at run time — the reference
/// transpiler has the same unguarded behaviour; compile-time-literal
/// zero divisors are rejected earlier, in the evaluator.
pub fn div(layout: &mut Layout, left: usize, target: usize) {
    layout.zero(TEMP); // quotient accumulator

    layout.move_to(left);
    layout.raw("[");
    {
        copy::copy(layout, RIGHT, LOOP); // LOOP := divisor, RIGHT preserved
        layout.zero(RETRIEVE); // counts this round's successful decrements

        layout.move_to(LOOP);
        layout.raw("[");
        layout.raw("-");
        control::if_nonzero(layout, left, TEMP2, |layout| {
            layout.sub_const(1, left);
            layout.add_const(1, RETRIEVE);
        });
        layout.move_to(LOOP);
        layout.raw("]");

        // diff := divisor - RETRIEVE; diff == 0 iff this round fully
        // subtracted the divisor.
        copy::copy(layout, RIGHT, COPY);
        layout.move_to(RETRIEVE);
        layout.raw("[");
        layout.raw("-");
        layout.move_to(COPY);
        layout.raw("-");
        layout.move_to(RETRIEVE);
        layout.raw("]");
        layout.reset();

        layout.add_const(1, RETRIEVE); // reuse RETRIEVE as a "full round" flag
        control::if_nonzero(layout, COPY, TEMP2, |layout| {
            layout.zero(RETRIEVE); // diff != 0: not a full round
        });
        control::if_nonzero(layout, RETRIEVE, TEMP2, |layout| {
            layout.add_const(1, TEMP);
        });
        layout.zero(RETRIEVE);
        layout.zero(COPY);
    }
    layout.move_to(left);
    layout.raw("]");
    layout.reset();

    copy::copy(layout, TEMP, target);
    layout.zero(TEMP);
}

/// `while src != 0 { src -= 1; dst op= 1 }`, destructive on `src`.
fn drain(layout: &mut Layout, src: usize, dst: usize, op: char) {
    layout.move_to(src);
    layout.raw("[");
    layout.raw("-");
    layout.move_to(dst);
    layout.raw(&op.to_string());
    layout.move_to(src);
    layout.raw("]");
    layout.reset();
}
