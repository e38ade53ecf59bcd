//! # Token Ingestion
//!
//! Turns the bit-exact external input format into the flat atom
//! sequence the rest of the compiler consumes: strip newlines, strip
//! one trailing comma, split on bare commas. No escaping or quoting is
//! recognised (spec §6).
//!
//! This mirrors `nspl2bf.py`'s preprocessing in `parse_file` and its
//! `__main__` block: `re.sub('\n', '', text)`, `re.sub(', *$', '', text)`,
//! `text.split(',')`.

/// Split raw NSPL source into its comma-separated atoms.
#[must_use]
pub fn tokenize(source: &str) -> Vec<String> {
    let without_newlines: String = source.chars().filter(|&c| c != '\n' && c != '\r').collect();
    let trimmed = strip_trailing_comma(&without_newlines);
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split(',').map(str::to_string).collect()
}

/// Strip a single trailing comma, along with any spaces *after* it,
/// matching the reference's `re.sub(', *$', '', text)`: the pattern
/// requires a literal comma immediately before the trailing spaces, so
/// a string ending in spaces with no comma behind them is left
/// completely untouched (trailing spaces included).
fn strip_trailing_comma(s: &str) -> &str {
    let candidate = s.trim_end_matches(' ');
    match candidate.strip_suffix(',') {
        Some(stripped) => stripped,
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_newlines_and_trailing_comma() {
        let src = "chars,A,\nendchars,\n";
        assert_eq!(tokenize(src), vec!["chars", "A", "endchars"]);
    }

    #[test]
    fn no_trailing_comma_is_untouched() {
        let src = "chars,A,endchars";
        assert_eq!(tokenize(src), vec!["chars", "A", "endchars"]);
    }

    #[test]
    fn trailing_spaces_without_a_comma_are_not_stripped() {
        // The reference regex `', *$'` requires a literal comma right
        // before the trailing spaces; spaces with no comma behind them
        // don't match, so they end up as part of the last atom.
        let src = "chars,A,endchars   ";
        assert_eq!(tokenize(src), vec!["chars", "A", "endchars   "]);
    }

    #[test]
    fn trailing_comma_followed_by_spaces_is_stripped() {
        let src = "chars,A,endchars,   ";
        assert_eq!(tokenize(src), vec!["chars", "A", "endchars"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert_eq!(tokenize(""), Vec::<String>::new());
        assert_eq!(tokenize(",\n"), Vec::<String>::new());
    }

    #[test]
    fn bare_commas_split_without_escaping() {
        let src = "a,,b";
        assert_eq!(tokenize(src), vec!["a", "", "b"]);
    }
}
