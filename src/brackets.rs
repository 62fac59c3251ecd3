//! Bracket-region rewriting - turns `List(...)` into `[...]`.
//!
//! The scan only looks at round brackets. Square brackets written by earlier
//! rewrites are invisible to it, so a region that was already converted does
//! not disturb the matching of the ones that enclose it.

use crate::types::{SOURCE_CLOSE, SOURCE_OPEN, TARGET_LIST_CLOSE, TARGET_LIST_OPEN};

/// Currently open brackets of one matching scan, with their byte positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketStack {
    entries: Vec<(char, usize)>,
}

impl BracketStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the stack and seed it with a constructor's own opening bracket.
    pub fn reset(&mut self, open_at: usize) {
        self.entries.clear();
        self.entries.push((SOURCE_OPEN, open_at));
    }

    pub fn push(&mut self, bracket: char, at: usize) {
        self.entries.push((bracket, at));
    }

    pub fn pop(&mut self) -> Option<(char, usize)> {
        self.entries.pop()
    }

    pub fn top(&self) -> Option<(char, usize)> {
        self.entries.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Find the bracket closing the region whose opening bracket seeds `stack`.
///
/// Scans `text` from byte offset `from`. Inner `(` are pushed and their `)`
/// popped; the first `)` met with a single entry left is the match and its
/// position is returned. When the text runs out first, the position the
/// scan had reached is returned unchanged.
pub fn find_matching_close(text: &str, from: usize, stack: &mut BracketStack) -> usize {
    let is_bracket = |c: char| c == SOURCE_OPEN || c == SOURCE_CLOSE;
    let mut pos = from;

    loop {
        let Some(offset) = text[pos..].find(is_bracket) else {
            return pos;
        };
        let at = pos + offset;

        if text[at..].starts_with(SOURCE_OPEN) {
            stack.push(SOURCE_OPEN, at);
        } else if stack.depth() > 1 {
            stack.pop();
        } else {
            return at;
        }
        pos = at + SOURCE_OPEN.len_utf8();
    }
}

/// Rewrite every `token(...)` region of `text` into `[...]`.
///
/// Each round rewrites the leftmost remaining occurrence and then searches
/// the partially rewritten text again from the start, so nested
/// constructors are matched against their own brackets. Unbalanced input
/// is rewritten best-effort and never panics.
pub fn rewrite_containers(text: &str, token: &str) -> String {
    let anchor = format!("{}{}", token, SOURCE_OPEN);
    let mut current = text.to_string();
    let mut stack = BracketStack::new();

    while let Some(start) = current.find(&anchor) {
        let body = start + anchor.len();
        stack.reset(body - SOURCE_OPEN.len_utf8());

        let close = find_matching_close(&current, body, &mut stack);
        let matched = current[close..].starts_with(SOURCE_CLOSE);
        if !matched {
            log::warn!(
                "no closing bracket for {} at byte {}; rewriting best-effort",
                anchor,
                start
            );
        }

        // Closing side first: it sits after the anchor, so its offset stays
        // valid until the anchor itself is replaced.
        let close_len = current[close..].chars().next().map_or(0, char::len_utf8);
        current.replace_range(close..close + close_len, TARGET_LIST_CLOSE);
        current.replace_range(start..body, TARGET_LIST_OPEN);

        log::debug!("rewrote {} region at bytes {}..={}", anchor, start, close);
    }

    current
}
