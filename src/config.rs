//! Configuration for a document analysis run.

/// Tunable thresholds and caps for the analysis pipeline.
///
/// Defaults match the production configuration; individual values can be
/// overridden with the `with_*` builders.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Maximum candidate sections kept after the first ranking pass.
    pub max_candidates: usize,

    /// Per-document cap during the first ranking pass.
    pub candidate_doc_cap: usize,

    /// Maximum sections in the final output.
    pub max_results: usize,

    /// Per-document cap during the final ranking pass.
    pub result_doc_cap: usize,

    /// Reconstructed sections with fewer words than this are dropped as noise.
    pub min_section_words: usize,

    /// Sections scoring at or below this are not considered candidates.
    pub min_candidate_score: f32,

    /// Cleaned sections with fewer words than this bypass condensation.
    pub condense_word_threshold: usize,

    /// Upper length bound passed to the summarization service.
    pub summary_max_len: usize,

    /// Lower length bound passed to the summarization service.
    pub summary_min_len: usize,

    /// Initial candidate count requested from the keyphrase service.
    pub keyphrase_top_n: usize,

    /// Keyphrases kept after similarity re-ranking.
    pub keyphrase_keep: usize,

    /// Minimum similarity to the full query for a keyphrase to survive.
    pub keyphrase_min_similarity: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisConfig {
    /// Create a configuration with production defaults.
    pub fn new() -> Self {
        Self {
            max_candidates: 10,
            candidate_doc_cap: 3,
            max_results: 6,
            result_doc_cap: 2,
            min_section_words: 10,
            min_candidate_score: 0.2,
            condense_word_threshold: 40,
            summary_max_len: 300,
            summary_min_len: 70,
            keyphrase_top_n: 30,
            keyphrase_keep: 10,
            keyphrase_min_similarity: 0.2,
        }
    }

    /// Set the candidate count kept by the first ranking pass.
    pub fn with_max_candidates(mut self, n: usize) -> Self {
        self.max_candidates = n;
        self
    }

    /// Set the per-document cap for the first ranking pass.
    pub fn with_candidate_doc_cap(mut self, n: usize) -> Self {
        self.candidate_doc_cap = n;
        self
    }

    /// Set the final output size.
    pub fn with_max_results(mut self, n: usize) -> Self {
        self.max_results = n;
        self
    }

    /// Set the per-document cap for the final ranking pass.
    pub fn with_result_doc_cap(mut self, n: usize) -> Self {
        self.result_doc_cap = n;
        self
    }

    /// Set the minimum word count for a reconstructed section.
    pub fn with_min_section_words(mut self, n: usize) -> Self {
        self.min_section_words = n;
        self
    }

    /// Set the minimum score for candidacy.
    pub fn with_min_candidate_score(mut self, score: f32) -> Self {
        self.min_candidate_score = score;
        self
    }

    /// Set the word count above which sections are condensed.
    pub fn with_condense_word_threshold(mut self, n: usize) -> Self {
        self.condense_word_threshold = n;
        self
    }
}
