//! External collaborator interfaces.
//!
//! The pipeline treats five capabilities as black-box services behind traits:
//! page-layout extraction, text embedding, keyphrase extraction,
//! part-of-speech tagging, and summarization. Implementations are injected
//! into [`crate::pipeline::DocumentAnalyzer`] at construction; the library
//! ships none of them.
//!
//! All calls are synchronous and single-attempt. A failed call returns the
//! matching [`crate::error::Error`] variant and the caller decides whether
//! the run aborts (embedding, keyphrases, tagging) or degrades
//! (summarization).

use std::path::Path;

use crate::error::Result;

/// One contiguous run of text sharing a font, as reported by the extractor.
#[derive(Debug, Clone)]
pub struct TextSpan {
    /// Text content of the span
    pub text: String,
    /// Font size in points (unrounded)
    pub font_size: f32,
    /// Font name as embedded in the document
    pub font_name: String,
}

/// One page of an opened document.
///
/// `text` is the page's plain text with `\n` line breaks; `span_lines`
/// preserves the extractor's visual line grouping, one `Vec<TextSpan>` per
/// rendered line, so layout passes can inspect the first span of each line.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    /// Plain text of the page
    pub text: String,
    /// Font spans grouped by visual line
    pub span_lines: Vec<Vec<TextSpan>>,
}

/// A detected table and the page it sits on.
#[derive(Debug, Clone)]
pub struct TableRegion {
    /// Page number (1-based)
    pub page: u32,
    /// Cleaned cell texts, row-major
    pub cells: Vec<String>,
}

/// Everything the pipeline needs from one opened PDF.
#[derive(Debug, Clone, Default)]
pub struct ParsedPdf {
    /// Pages in document order
    pub pages: Vec<PageLayout>,
    /// Detected tables across all pages
    pub tables: Vec<TableRegion>,
}

impl ParsedPdf {
    /// Cell texts of every table on the given page (1-based).
    pub fn table_cells_on_page(&self, page: u32) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|t| t.page == page)
            .flat_map(|t| t.cells.iter().map(String::as_str))
            .collect()
    }
}

/// Page-layout extractor: opens a PDF and returns per-page text plus font
/// spans and table regions.
pub trait PageSource {
    /// Open and fully extract one document.
    fn open(&self, path: &Path) -> Result<ParsedPdf>;
}

/// A dense text embedding produced by the similarity oracle.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding(pub Vec<f32>);

impl Embedding {
    /// Cosine similarity between two embeddings, in [-1, 1].
    ///
    /// Zero vectors and dimension mismatches yield 0.0 rather than NaN so
    /// downstream score sorting never sees a poisoned value.
    pub fn cosine_similarity(&self, other: &Embedding) -> f32 {
        if self.0.len() != other.0.len() {
            return 0.0;
        }
        let mut dot = 0.0f32;
        let mut norm_a = 0.0f32;
        let mut norm_b = 0.0f32;
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            dot += a * b;
            norm_a += a * a;
            norm_b += b * b;
        }
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}

/// Semantic similarity oracle over text embeddings.
///
/// `encode_batch` is the primary entry point: the pipeline accumulates every
/// section text across all documents and embeds them in one call to amortize
/// the oracle's fixed invocation cost.
pub trait Embedder {
    /// Embed many texts in one call, preserving order.
    fn encode_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Embed a single text.
    fn encode(&self, text: &str) -> Result<Embedding> {
        let mut batch = self.encode_batch(&[text.to_string()])?;
        batch.pop().ok_or_else(|| {
            crate::error::Error::Embedding("empty batch result for single text".to_string())
        })
    }

    /// Similarity between two embeddings. Cosine by default.
    fn similarity(&self, a: &Embedding, b: &Embedding) -> f32 {
        a.cosine_similarity(b)
    }
}

/// Keyphrase extraction service.
pub trait KeyphraseExtractor {
    /// Extract up to `top_n` candidate phrases of `ngram_range.0..=ngram_range.1`
    /// words (stopwords removed), best first, each with the service's own score.
    fn extract(
        &self,
        text: &str,
        ngram_range: (usize, usize),
        top_n: usize,
    ) -> Result<Vec<(String, f32)>>;
}

/// Coarse part-of-speech classes the pipeline distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTag {
    /// Common noun
    Noun,
    /// Proper noun
    ProperNoun,
    /// Adjective
    Adjective,
    /// Verb
    Verb,
    /// Anything else (punctuation, determiners, ...)
    Other,
}

impl PosTag {
    /// Whether this class carries content-word weight for keyword extraction.
    pub fn is_content_word(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::ProperNoun | PosTag::Adjective | PosTag::Verb
        )
    }
}

/// Part-of-speech tagging service.
pub trait PosTagger {
    /// Tag a text, returning `(token, tag)` pairs in token order.
    fn tag(&self, text: &str) -> Result<Vec<(String, PosTag)>>;
}

/// Text condensation (summarization) service.
///
/// A batch either succeeds as a whole or fails as a whole; there is no
/// partial success. Callers must not drop sections on failure.
pub trait Summarizer {
    /// Summarize each text, bounded to `min_len..=max_len` output length,
    /// same order as input.
    fn summarize(&self, texts: &[String], max_len: usize, min_len: usize) -> Result<Vec<String>>;
}
