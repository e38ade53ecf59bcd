//! # Bracket Extractor (spec §4.8)
//!
//! Pulls the element list between a `START`/`END` token pair. Grounded
//! on `original_source/nspl2bf.py`'s `extract_elements_between_tokens`
//! (a regex match over the comma-joined remainder of the stream),
//! reimplemented as an explicit linear scan over the already-tokenised
//! stream — a fixed two-token delimiter search doesn't need a regex
//! engine.

/// Extract the payload between `tokens[offset]` (expected to be
/// `opener`) and the first following `closer`.
///
/// Returns `None` if `closer` is never found (a missing or mismatched
/// close) — callers surface that the same way the reference does: as
/// an empty payload, which their own arity/roster checks turn into a
/// fatal error.
pub fn extract(tokens: &[String], closer: &str, offset: usize) -> Option<(Vec<String>, usize)> {
    let start = offset + 1;
    let close_idx = tokens[start..].iter().position(|t| t == closer)? + start;
    let payload = tokens[start..close_idx].to_vec();
    Some((payload, close_idx + 1))
}
