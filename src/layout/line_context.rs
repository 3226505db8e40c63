//! Immutable per-line context for heading classification.
//!
//! Every heading rule is a pure function of this context, which makes each
//! rule independently testable: build a context, evaluate one rule, assert.

use crate::services::PageLayout;

/// Everything the heading rules may look at for one candidate line.
#[derive(Debug, Clone)]
pub struct LineContext<'a> {
    /// The cleaned candidate line
    pub text: &'a str,
    /// Full text of the page the line came from
    pub page_text: &'a str,
    /// Previous cleaned line on the page (empty at page start)
    pub prev_line: &'a str,
    /// Next cleaned line on the page (empty at page end)
    pub next_line: &'a str,
    /// Index of the line on its page
    pub line_index: usize,
    /// Whether the page layout resembles a poster/flyer rather than prose
    pub is_poster: bool,
    /// Number of verbs in the line, as reported by the tagging service
    pub verb_count: usize,
}

impl<'a> LineContext<'a> {
    /// Word count of the candidate line.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Collapse internal whitespace to single spaces and trim.
pub fn clean_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// At least one cased character, none of them lower-case.
pub fn is_upper(text: &str) -> bool {
    let mut has_cased = false;
    for ch in text.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// At least one cased character, none of them upper-case.
pub fn is_lower(text: &str) -> bool {
    let mut has_cased = false;
    for ch in text.chars() {
        if ch.is_uppercase() {
            return false;
        }
        if ch.is_lowercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Title-case test: every cased run starts upper-case and continues
/// lower-case, with at least one cased character.
pub fn is_title(text: &str) -> bool {
    let mut has_cased = false;
    let mut prev_cased = false;
    for ch in text.chars() {
        if ch.is_uppercase() {
            if prev_cased {
                return false;
            }
            prev_cased = true;
            has_cased = true;
        } else if ch.is_lowercase() {
            if !prev_cased {
                return false;
            }
            prev_cased = true;
            has_cased = true;
        } else {
            prev_cased = false;
        }
    }
    has_cased
}

/// Decide whether a document reads as a poster/flyer rather than prose.
///
/// Only short documents qualify (at most 2 pages). The first page is judged
/// by line shape: mostly short lines, or a large share of all-caps lines.
pub fn is_poster_layout(pages: &[PageLayout]) -> bool {
    if pages.len() > 2 {
        return false;
    }
    let Some(first) = pages.first() else {
        return false;
    };
    if first.text.is_empty() {
        return false;
    }
    let lines: Vec<&str> = first.text.split('\n').collect();
    let total = lines.len() as f32;
    let short = lines
        .iter()
        .filter(|l| l.trim().chars().count() < 30)
        .count() as f32;
    let caps = lines.iter().filter(|l| is_upper(l)).count() as f32;
    short / total > 0.6 || caps / total > 0.3
}
