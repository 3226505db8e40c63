//! Section condensation for final output.
//!
//! Section texts are cleaned (bullet glyphs normalized, decorative symbols
//! stripped, whitespace collapsed) and then either passed through verbatim
//! (short sections) or condensed by the external summarization service in
//! one batch. The service fails per batch, never per item; on failure every
//! batched section falls back to its cleaned text. Condensation failure
//! never drops a section from the output.

use lazy_static::lazy_static;
use regex::Regex;

use crate::config::AnalysisConfig;
use crate::ranking::RankedSection;
use crate::services::Summarizer;

lazy_static! {
    static ref BULLET_GLYPHS: Regex = Regex::new(r"[\u{F0B7}\u{2022}]").unwrap();
    static ref LOWER_O_BULLET: Regex = Regex::new(r"(?m)^\s*o\s+").unwrap();
    static ref DECORATIVE: Regex = Regex::new(r#"[^\w\s.,!?"'()-]"#).unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Normalize a section text for output.
///
/// Bullet glyphs and "o " list markers are rewritten to a single marker
/// before the decorative-symbol strip, which also removes that marker; list
/// items end up separated by plain spaces.
pub fn clean_section_text(text: &str) -> String {
    let text = BULLET_GLYPHS.replace_all(text, "*");
    let text = LOWER_O_BULLET.replace_all(&text, "* ");
    let text = DECORATIVE.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

/// A section's condensed output text plus its source coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CondensedSection {
    /// Filename of the owning document
    pub document: String,
    /// Refined (cleaned or summarized) text
    pub refined_text: String,
    /// Page the section starts on (1-based)
    pub page_number: u32,
}

/// Batches long sections through the summarization service.
pub struct SectionCondenser<'a> {
    summarizer: &'a dyn Summarizer,
    config: &'a AnalysisConfig,
}

impl<'a> SectionCondenser<'a> {
    /// Create a condenser backed by the given summarization service.
    pub fn new(summarizer: &'a dyn Summarizer, config: &'a AnalysisConfig) -> Self {
        Self { summarizer, config }
    }

    /// Condense the final ranked sections, preserving input order.
    pub fn condense(&self, sections: &[RankedSection]) -> Vec<CondensedSection> {
        let cleaned: Vec<String> = sections
            .iter()
            .map(|s| clean_section_text(&s.text))
            .collect();

        let threshold = self.config.condense_word_threshold;
        let to_summarize: Vec<String> = cleaned
            .iter()
            .filter(|text| text.split_whitespace().count() >= threshold)
            .cloned()
            .collect();

        let summaries = if to_summarize.is_empty() {
            Vec::new()
        } else {
            match self.summarizer.summarize(
                &to_summarize,
                self.config.summary_max_len,
                self.config.summary_min_len,
            ) {
                Ok(summaries) if summaries.len() == to_summarize.len() => summaries,
                Ok(summaries) => {
                    log::warn!(
                        "summarizer returned {} results for {} inputs; using cleaned text",
                        summaries.len(),
                        to_summarize.len()
                    );
                    to_summarize.clone()
                }
                Err(err) => {
                    log::warn!("batch summarization failed: {}; using cleaned text", err);
                    to_summarize.clone()
                }
            }
        };

        let mut summary_iter = summaries.into_iter();
        sections
            .iter()
            .zip(cleaned)
            .map(|(section, cleaned_text)| {
                let refined_text = if cleaned_text.split_whitespace().count() < threshold {
                    cleaned_text
                } else {
                    summary_iter
                        .next()
                        .map(|s| s.trim().to_string())
                        .unwrap_or(cleaned_text)
                };
                CondensedSection {
                    document: section.document.clone(),
                    refined_text,
                    page_number: section.page_number,
                }
            })
            .collect()
    }
}
