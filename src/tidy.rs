//! # Peephole Tidier (spec §4.9)
//!
//! Collapses any maximal run of `<`/`>` characters to the net
//! displacement of the longer side. Purely textual: a maximal
//! pointer-move run is, by construction, bounded by any other
//! character (including `[` and `]`), so this never reaches across a
//! loop-bracket boundary.

/// Tidy a TAPE program, collapsing adjacent inverse pointer moves.
#[must_use]
pub fn tidy(code: &str) -> String {
    let bytes = code.as_bytes();
    let mut out = String::with_capacity(code.len());
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        if c == '<' || c == '>' {
            let start = i;
            while i < bytes.len() && (bytes[i] == b'<' || bytes[i] == b'>') {
                i += 1;
            }
            let run = &code[start..i];
            let net = run.matches('>').count() as i64 - run.matches('<').count() as i64;
            if net > 0 {
                out.push_str(&">".repeat(net as usize));
            } else if net < 0 {
                out.push_str(&"<".repeat((-net) as usize));
            }
        } else {
            out.push(c);
            i += 1;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_runs_to_net_direction() {
        assert_eq!(tidy(">>><<"), ">");
        assert_eq!(tidy("<<<>>>>>"), ">>");
        assert_eq!(tidy("><"), "");
    }

    #[test]
    fn does_not_cross_bracket_boundaries() {
        assert_eq!(tidy(">[>]<"), ">[>]<");
    }

    #[test]
    fn is_a_fixpoint_after_one_pass() {
        let code = ">>>[-]<<+>><<<.>>";
        let once = tidy(code);
        let twice = tidy(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn leaves_non_move_instructions_untouched() {
        assert_eq!(tidy("+-.,#"), "+-.,#");
    }
}
