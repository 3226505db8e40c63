//! Font-size clustering pass for heading detection.
//!
//! The most frequent (rounded size, font name) pair across a document is
//! taken as body text. Lines whose first span is set strictly more than one
//! point larger than the body size become heading candidates, subject to
//! shape checks. Short all-lower-case candidates are folded into the
//! preceding candidate as continuation labels.

use indexmap::IndexMap;
use std::collections::HashSet;

use crate::layout::line_context::is_lower;
use crate::services::PageLayout;

/// A heading candidate found by the font-size pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FontCandidate {
    /// Candidate line text
    pub text: String,
    /// Page the line appears on (1-based)
    pub page: u32,
}

/// Rounded point size used for histogram bucketing.
fn rounded_size(size: f32) -> i32 {
    size.round() as i32
}

/// The body-text size: rounded size of the most frequent (size, font) pair.
/// First-seen wins ties, matching histogram insertion order.
fn body_font_size(pages: &[PageLayout]) -> Option<i32> {
    let mut counts: IndexMap<(i32, &str), usize> = IndexMap::new();
    for page in pages {
        for line in &page.span_lines {
            for span in line {
                *counts
                    .entry((rounded_size(span.font_size), span.font_name.as_str()))
                    .or_insert(0) += 1;
            }
        }
    }
    let mut best: Option<((i32, &str), usize)> = None;
    for (key, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((key, count)),
        }
    }
    best.map(|((size, _), _)| size)
}

/// Scan every line for heading candidates by font size.
pub fn font_size_candidates(pages: &[PageLayout]) -> Vec<FontCandidate> {
    let Some(body_size) = body_font_size(pages) else {
        return Vec::new();
    };

    let heading_sizes: HashSet<i32> = pages
        .iter()
        .flat_map(|p| &p.span_lines)
        .flatten()
        .map(|s| rounded_size(s.font_size))
        .filter(|&s| s > body_size + 1)
        .collect();

    let mut raw: Vec<FontCandidate> = Vec::new();
    for (idx, page) in pages.iter().enumerate() {
        let page_no = idx as u32 + 1;
        for line in &page.span_lines {
            let Some(first) = line.first() else { continue };
            if !heading_sizes.contains(&rounded_size(first.font_size)) {
                continue;
            }
            let line_text: String = line.iter().map(|s| s.text.as_str()).collect();
            let line_text = line_text.trim().to_string();
            if line_text.split_whitespace().count() < 15
                && !line_text.ends_with('.')
                && !line_text.ends_with(':')
                && line_text.chars().any(|c| c.is_ascii_alphabetic())
                && line_text.chars().count() > 3
                && raw.last().map(|c| c.text != line_text).unwrap_or(true)
            {
                raw.push(FontCandidate {
                    text: line_text,
                    page: page_no,
                });
            }
        }
    }

    merge_continuations(raw)
}

/// Fold a short, all-lower-case candidate into its predecessor.
fn merge_continuations(raw: Vec<FontCandidate>) -> Vec<FontCandidate> {
    let mut merged = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let mut candidate = raw[i].clone();
        if i + 1 < raw.len()
            && raw[i + 1].text.split_whitespace().count() < 4
            && is_lower(&raw[i + 1].text)
        {
            candidate.text.push(' ');
            candidate.text.push_str(&raw[i + 1].text);
            i += 1;
        }
        merged.push(candidate);
        i += 1;
    }
    merged
}
