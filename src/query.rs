//! Query feature extraction.
//!
//! Turns the persona/job pair into two keyword tiers plus binary dietary
//! constraint flags:
//! - `phrase_keywords`: keyphrases from the combined query, re-ranked by
//!   embedding similarity against the full query (broad, contextual);
//! - `simple_keywords`: single content words tagged straight out of the task
//!   description (narrow, high precision).
//!
//! The two tiers are deliberately not deduplicated against each other; the
//! scorer weights them differently.

use std::collections::BTreeSet;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::services::{Embedder, KeyphraseExtractor, PosTagger};
use crate::utils::safe_float_cmp;

/// The persona/job query, broken out into the fields the pipeline combines.
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Persona role ("Travel Planner")
    pub role: String,
    /// Job-to-be-done task description
    pub task: String,
    /// Challenge description, if provided
    pub description: String,
    /// Test case name, if provided
    pub test_case_name: String,
}

impl Query {
    /// The long form used for keyphrase extraction and re-ranking.
    pub fn combined_text(&self) -> String {
        format!(
            "{} needs to: {}. Challenge description: {}. Test case: {}.",
            self.role, self.task, self.description, self.test_case_name
        )
    }

    /// The short form embedded for section similarity scoring.
    pub fn scoring_text(&self) -> String {
        format!("{} needs to: {}", self.role, self.task)
    }
}

/// Keyword sets and constraint flags derived once per query.
#[derive(Debug, Clone, Default)]
pub struct QueryFeatures {
    /// Multi-word keyphrases (lower-cased), similarity-ranked
    pub phrase_keywords: BTreeSet<String>,
    /// Single content words from the task description (lower-cased)
    pub simple_keywords: BTreeSet<String>,
    /// The task asks for vegetarian-only content
    pub is_vegetarian_request: bool,
    /// The task asks for gluten-free-only content
    pub is_gluten_free_request: bool,
}

impl QueryFeatures {
    /// Individual words of every phrase keyword, for whole-word matching.
    pub fn phrase_words(&self) -> BTreeSet<String> {
        self.phrase_keywords
            .iter()
            .flat_map(|p| p.split_whitespace())
            .map(|w| w.to_lowercase())
            .collect()
    }
}

/// Derive [`QueryFeatures`] from a query using the external services.
///
/// Keyphrase candidates are fetched once (`keyphrase_top_n`), embedded in a
/// single batch alongside nothing else, ranked by similarity to the combined
/// query embedding, and cut at `keyphrase_keep` / `keyphrase_min_similarity`.
pub fn extract_query_features(
    query: &Query,
    keyphrases: &dyn KeyphraseExtractor,
    embedder: &dyn Embedder,
    tagger: &dyn PosTagger,
    config: &AnalysisConfig,
) -> Result<QueryFeatures> {
    let combined = query.combined_text();

    let candidates = keyphrases.extract(&combined, (1, 3), config.keyphrase_top_n)?;
    let unique: BTreeSet<String> = candidates
        .into_iter()
        .map(|(phrase, _)| phrase.to_lowercase())
        .collect();

    let mut phrase_keywords = BTreeSet::new();
    if !unique.is_empty() {
        let query_embedding = embedder.encode(&combined)?;
        let texts: Vec<String> = unique.into_iter().collect();
        let embeddings = embedder.encode_batch(&texts)?;

        let mut ranked: Vec<(String, f32)> = texts
            .into_iter()
            .zip(embeddings.iter())
            .map(|(text, emb)| {
                let sim = embedder.similarity(&query_embedding, emb);
                (text, sim)
            })
            .collect();
        ranked.sort_by(|a, b| safe_float_cmp(b.1, a.1));

        for (phrase, sim) in ranked {
            if sim >= config.keyphrase_min_similarity {
                phrase_keywords.insert(phrase);
                if phrase_keywords.len() >= config.keyphrase_keep {
                    break;
                }
            }
        }
    }

    let simple_keywords: BTreeSet<String> = tagger
        .tag(&query.task.to_lowercase())?
        .into_iter()
        .filter(|(_, tag)| tag.is_content_word())
        .map(|(token, _)| token)
        .collect();

    let is_vegetarian_request = simple_keywords.contains("vegetarian");
    let is_gluten_free_request =
        simple_keywords.contains("gluten-free") || simple_keywords.contains("gluten");

    log::info!(
        "query features: {} phrase keywords, {} simple keywords (vegetarian: {}, gluten-free: {})",
        phrase_keywords.len(),
        simple_keywords.len(),
        is_vegetarian_request,
        is_gluten_free_request
    );

    Ok(QueryFeatures {
        phrase_keywords,
        simple_keywords,
        is_vegetarian_request,
        is_gluten_free_request,
    })
}
