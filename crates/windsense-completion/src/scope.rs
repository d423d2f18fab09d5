//! Class attribute scope detection
//!
//! Decides whether the caret sits inside an open `class="..."` attribute value
//! by looking only at the text that precedes it. Only the last `class="`
//! marker counts.

use crate::types::ScopeMatch;

const CLASS_MARKER: &str = "class=\"";

/// Detect whether the caret (at the end of `preceding_text`) is inside an open
/// class attribute, and return what has been typed in it so far.
pub fn detect_scope(preceding_text: &str) -> ScopeMatch {
    let Some(marker) = rfind_ignore_ascii_case(preceding_text, CLASS_MARKER) else {
        return ScopeMatch::out_of_scope();
    };

    let Some(first_quote) = preceding_text[marker..].find('"').map(|i| marker + i) else {
        return ScopeMatch::out_of_scope();
    };
    let Some(last_quote) = preceding_text.rfind('"') else {
        return ScopeMatch::out_of_scope();
    };

    if first_quote == last_quote {
        ScopeMatch::in_scope(&preceding_text[last_quote + 1..])
    } else {
        ScopeMatch::out_of_scope()
    }
}

/// The class name currently being typed: the last space-delimited token
pub fn current_token(partial_text: &str) -> &str {
    partial_text.rsplit(' ').next().unwrap_or("")
}

// Byte index of the last ASCII-case-insensitive occurrence of `needle`.
fn rfind_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let pat = needle.as_bytes();
    if pat.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - pat.len())
        .rev()
        .find(|&i| hay[i..i + pat.len()].eq_ignore_ascii_case(pat))
}
