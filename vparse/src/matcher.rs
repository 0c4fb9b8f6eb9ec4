//! Textual invocation conventions recognized in model output.
//!
//! Two grammars cover the three conventions the segmenter applies in
//! priority order: [`match_standalone`] checks that a fragment is nothing
//! but a call (used for the whole response first, then per line), and
//! [`find_marked`] finds every `TOOL_CALL:`-marked call embedded in a
//! larger block of narration.

use std::sync::LazyLock;

use regex::Regex;

static STANDALONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*\(\s*([^)]*?)\s*\)$")
        .expect("standalone pattern compiles")
});

static MARKED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"TOOL_CALL:\s*([A-Za-z_][A-Za-z0-9_]*)\s*\(\s*([^)]*?)\s*\)")
        .expect("marked pattern compiles")
});

/// A recognized call candidate. `text` is the exact matched call text,
/// marker included for the marked convention. The argument grammar stops
/// at the first closing parenthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationMatch<'a> {
    pub name: &'a str,
    pub raw_args: &'a str,
    pub text: &'a str,
}

/// Matches a fragment that consists of a single call and nothing else,
/// modulo surrounding whitespace.
pub fn match_standalone(fragment: &str) -> Option<InvocationMatch<'_>> {
    let trimmed = fragment.trim();
    let caps = STANDALONE_RE.captures(trimmed)?;

    Some(InvocationMatch {
        name: caps.get(1).map(|m| m.as_str())?,
        raw_args: caps.get(2).map(|m| m.as_str())?,
        text: trimmed,
    })
}

/// Finds every marked call in a block, left to right. Arguments may span
/// line breaks, which is why the segmenter scans the original text rather
/// than any line-joined rendering of it.
pub fn find_marked(text: &str) -> Vec<InvocationMatch<'_>> {
    MARKED_RE
        .captures_iter(text)
        .filter_map(|caps| {
            Some(InvocationMatch {
                name: caps.get(1).map(|m| m.as_str())?,
                raw_args: caps.get(2).map(|m| m.as_str())?,
                text: caps.get(0).map(|m| m.as_str())?,
            })
        })
        .collect()
}
