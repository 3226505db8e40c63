//! # docsieve
//!
//! Persona-driven PDF section analysis: given a batch of documents and a
//! "persona + job-to-be-done" query, produce a ranked list of the most
//! relevant document sections with condensed summaries.
//!
//! ## Pipeline
//!
//! 1. **Outline inference** — two independent layout signals (textual
//!    heuristics and font-size clustering) are merged into one deduplicated
//!    outline per document.
//! 2. **Section reconstruction** — the full text belonging to each heading
//!    is recovered from raw page text, across page boundaries, stopping
//!    exactly at the next heading.
//! 3. **Query features** — keyphrases and single-word keywords plus hard
//!    dietary constraint flags, derived once per query.
//! 4. **Scoring & ranking** — semantic similarity, keyword bonuses, and
//!    title/filename boosts combined per section; two capped ranking passes
//!    enforce per-document diversity.
//! 5. **Condensation** — long sections are summarized in one batch; failure
//!    degrades to cleaned text, never drops a section.
//!
//! Embedding, keyphrase extraction, POS tagging, summarization, and PDF
//! page-layout extraction are external collaborators behind the traits in
//! [`services`]; implementations are injected into
//! [`pipeline::DocumentAnalyzer`] at construction.
//!
//! ## Quick Start
//!
//! ```ignore
//! use docsieve::io;
//! use docsieve::pipeline::DocumentAnalyzer;
//!
//! # fn main() -> docsieve::Result<()> {
//! let input = io::load_input("collection/input.json".as_ref())?;
//! let analyzer = DocumentAnalyzer::new(&pages, &embedder, &keyphrases, &tagger, &summarizer);
//! let output = analyzer.run(&input, "collection/PDFs".as_ref())?;
//! io::write_output("collection/output.json".as_ref(), &output)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// External collaborator interfaces
pub mod services;

// Data model
pub mod document;

// Layout analysis and outline inference
pub mod layout;

// Section reconstruction
pub mod sections;

// Query feature extraction
pub mod query;

// Scoring and ranking
pub mod ranking;
pub mod scoring;

// Output condensation
pub mod condense;

// Orchestration
pub mod pipeline;

// Input/output JSON contracts
pub mod io;

// Re-exports
pub use config::AnalysisConfig;
pub use document::{Document, HeadingEntry, HeadingLevel, Outline, ScoredSection, Section};
pub use error::{Error, Result};
pub use pipeline::DocumentAnalyzer;

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Safely compare two floating point numbers, handling NaN cases.
    ///
    /// NaN values are treated as equal to each other and greater than all
    /// other values, so sorting operations never panic on NaN comparisons.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater, // NaN > all numbers
            (false, true) => Ordering::Less,    // all numbers < NaN
            (false, false) => {
                // Both are normal numbers, safe to unwrap
                a.partial_cmp(&b).unwrap()
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_safe_float_cmp_normal() {
            assert_eq!(safe_float_cmp(1.0, 2.0), Ordering::Less);
            assert_eq!(safe_float_cmp(2.0, 1.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(1.5, 1.5), Ordering::Equal);
        }

        #[test]
        fn test_safe_float_cmp_nan() {
            assert_eq!(safe_float_cmp(f32::NAN, f32::NAN), Ordering::Equal);
            assert_eq!(safe_float_cmp(f32::NAN, 0.0), Ordering::Greater);
            assert_eq!(safe_float_cmp(0.0, f32::NAN), Ordering::Less);
        }
    }
}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
