//! Per-document outline construction.
//!
//! Runs the textual heading pass and the font-size pass over an opened
//! document, prunes poster noise, merges both candidate sequences, and
//! extracts a best-effort title from the first page.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use crate::document::{HeadingEntry, Outline};
use crate::error::Result;
use crate::layout::font_clusters::font_size_candidates;
use crate::layout::heading_rules::{accept_threshold, heading_level, heading_score, rejection};
use crate::layout::line_context::{clean_line, is_poster_layout, LineContext};
use crate::services::{ParsedPdf, PosTag, PosTagger};

lazy_static! {
    static ref PAGE_TOKEN: Regex = Regex::new(r"^(page|\d+)$").unwrap();
}

/// Generic section names that carry no information about a specific document.
const GENERIC_HEADINGS: &[&str] = &["introduction", "overview", "summary", "preface", "background"];

/// Builds one [`Outline`] per document.
///
/// Holds the tagging service used by the verb-scarcity score rule; construct
/// once and reuse across documents.
pub struct OutlineBuilder<'a> {
    tagger: &'a dyn PosTagger,
}

impl<'a> OutlineBuilder<'a> {
    /// Create a builder backed by the given tagging service.
    pub fn new(tagger: &'a dyn PosTagger) -> Self {
        Self { tagger }
    }

    /// Infer the outline of one opened document.
    pub fn build(&self, parsed: &ParsedPdf) -> Result<Outline> {
        let title = extract_title(parsed);
        let is_poster = is_poster_layout(&parsed.pages);

        let mut primary = self.textual_pass(parsed, is_poster)?;

        // Posters carry at most one true heading; keep the best candidate
        // by level, then shortest text.
        if is_poster && primary.len() > 3 {
            primary.sort_by(|a, b| {
                a.level
                    .rank()
                    .cmp(&b.level.rank())
                    .then(a.text.chars().count().cmp(&b.text.chars().count()))
            });
            primary.truncate(1);
        }

        let secondary: Vec<HeadingEntry> = font_size_candidates(&parsed.pages)
            .into_iter()
            .map(|c| HeadingEntry {
                level: heading_level(&c.text),
                text: c.text,
                page: c.page,
            })
            .collect();

        let headings = merge_outlines(primary, secondary);
        log::debug!("outline: {} headings (poster: {})", headings.len(), is_poster);

        Ok(Outline { title, headings })
    }

    /// Line-by-line heading classification over every page.
    fn textual_pass(&self, parsed: &ParsedPdf, is_poster: bool) -> Result<Vec<HeadingEntry>> {
        let mut headings = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (idx, page) in parsed.pages.iter().enumerate() {
            let page_no = idx as u32 + 1;
            if page.text.is_empty() {
                continue;
            }

            let cleaned: Vec<String> = page.text.split('\n').map(clean_line).collect();
            let table_cells: HashSet<String> = parsed
                .table_cells_on_page(page_no)
                .into_iter()
                .map(clean_line)
                .collect();

            let mut prev_line = String::new();
            for i in 0..cleaned.len() {
                let line = &cleaned[i];
                if line.is_empty() || table_cells.contains(line) {
                    continue;
                }
                let next_line = cleaned.get(i + 1).map(String::as_str).unwrap_or("");

                let mut ctx = LineContext {
                    text: line,
                    page_text: &page.text,
                    prev_line: &prev_line,
                    next_line,
                    line_index: i,
                    is_poster,
                    verb_count: 0,
                };

                if rejection(&ctx).is_none() {
                    // The tagger only runs for lines that survive rejection.
                    ctx.verb_count = self.count_verbs(line)?;
                    if heading_score(&ctx) >= accept_threshold(is_poster)
                        && !GENERIC_HEADINGS.contains(&line.to_lowercase().as_str())
                        && !seen.contains(line)
                    {
                        headings.push(HeadingEntry {
                            text: line.clone(),
                            level: heading_level(line),
                            page: page_no,
                        });
                        seen.insert(line.clone());
                    }
                }
                prev_line = line.clone();
            }
        }

        Ok(headings)
    }

    fn count_verbs(&self, text: &str) -> Result<usize> {
        let tags = self.tagger.tag(text)?;
        Ok(tags.iter().filter(|(_, tag)| *tag == PosTag::Verb).count())
    }
}

/// Merge the textual and font-size candidate sequences into one outline.
///
/// The textual detector wins exact-text collisions (first detector wins);
/// generic section names are dropped from both; the result is stable-sorted
/// by page so downstream consumers see document order.
pub fn merge_outlines(
    primary: Vec<HeadingEntry>,
    secondary: Vec<HeadingEntry>,
) -> Vec<HeadingEntry> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<HeadingEntry> = Vec::new();
    for entry in primary.into_iter().chain(secondary) {
        if GENERIC_HEADINGS.contains(&entry.text.to_lowercase().as_str()) {
            continue;
        }
        if !seen.insert(entry.text.clone()) {
            continue;
        }
        merged.push(entry);
    }
    merged.sort_by_key(|e| e.page);
    merged
}

/// Best-effort title from the first page.
///
/// Scans the first three lines for a reasonable single line (under 100
/// characters, longer than 3, not a bare page token); falls back to the
/// first non-empty line anywhere on the page, then to the empty string.
pub fn extract_title(parsed: &ParsedPdf) -> String {
    let Some(first) = parsed.pages.first() else {
        return String::new();
    };
    let lines: Vec<&str> = first.text.split('\n').collect();

    for line in lines.iter().take(3) {
        let clean = clean_line(line);
        if clean.is_empty() || clean.chars().count() > 100 {
            continue;
        }
        if clean.chars().count() > 3 && !PAGE_TOKEN.is_match(&clean.to_lowercase()) {
            return clean;
        }
    }
    for line in &lines {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    String::new()
}
