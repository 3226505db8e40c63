//! Section relevance scoring.
//!
//! One scalar score per section: semantic similarity plus keyword bonuses
//! plus title/filename boosts, gated by hard dietary disqualification. The
//! score is a pure function of its inputs; scoring the same section twice
//! yields the same value.
//!
//! "Whole word" throughout means membership in the whitespace-split word
//! set of the lower-cased text.

use std::collections::HashSet;
use std::path::Path;

use crate::query::QueryFeatures;

/// Ingredients that disqualify a section under a vegetarian request.
pub const NON_VEG_LEXICON: &[&str] = &[
    "chicken", "pork", "beef", "lamb", "fish", "shrimp", "meat", "prosciutto", "sausage", "tuna",
    "egg", "bacon", "ham", "salami", "turkey", "duck", "goat", "veal", "crab", "lobster",
    "scallops", "octopus", "squid", "calamari", "shellfish", "oysters", "mussels", "clams",
    "caviar", "anchovies", "sardines", "mackerel", "trout", "salmon", "cod", "haddock", "halibut",
    "swordfish", "catfish", "tilapia", "bass", "snapper", "grouper", "prawns", "crayfish",
    "langoustine", "crustaceans", "meats",
];

/// Ingredients that disqualify a section under a gluten-free request,
/// unless the occurrence is prefixed "gluten-free"/"gluten free".
pub const GLUTEN_LEXICON: &[&str] = &[
    "wheat", "flour", "barley", "rye", "bread", "pasta", "semolina", "couscous", "farina",
    "baguette", "croissant",
];

/// Score weights. Phrase keywords are contextual (low weight); simple
/// keywords come straight from the task (high weight).
const PHRASE_WORD_BONUS: f32 = 0.05;
const SIMPLE_KEYWORD_BONUS: f32 = 0.10;
const TITLE_SIMPLE_BOOST: f32 = 0.10;
const TITLE_PHRASE_BOOST: f32 = 0.05;
const TITLE_BOOST_CAP: f32 = 0.15;
const FILENAME_SIMPLE_BOOST: f32 = 0.15;
const FILENAME_PHRASE_BOOST: f32 = 0.05;
const FILENAME_BOOST_CAP: f32 = 0.2;

fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|w| w.to_string()).collect()
}

fn intersects(keywords: &std::collections::BTreeSet<String>, words: &HashSet<String>) -> bool {
    keywords.iter().any(|k| words.contains(k))
}

/// Boost when query keywords appear in the section's heading text.
/// Capped so a title match never outweighs content similarity.
pub fn title_boost(heading_text: &str, features: &QueryFeatures) -> f32 {
    let title_words = word_set(&heading_text.to_lowercase());
    let mut boost = 0.0;
    if intersects(&features.simple_keywords, &title_words) {
        boost += TITLE_SIMPLE_BOOST;
    }
    if intersects(&features.phrase_words(), &title_words) {
        boost += TITLE_PHRASE_BOOST;
    }
    boost.min(TITLE_BOOST_CAP)
}

/// Boost when query keywords appear in the filename or extracted document
/// title. Computed once per document and reused for all its sections.
pub fn filename_boost(filename: &str, doc_title: &str, features: &QueryFeatures) -> f32 {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .replace('_', " ");
    let searchable = format!("{} {}", stem, doc_title).to_lowercase();
    let words = word_set(&searchable);

    let mut boost = 0.0;
    if intersects(&features.simple_keywords, &words) {
        boost += FILENAME_SIMPLE_BOOST;
    }
    if intersects(&features.phrase_words(), &words) {
        boost += FILENAME_PHRASE_BOOST;
    }
    boost.min(FILENAME_BOOST_CAP)
}

/// True when the section text violates an active dietary constraint.
fn disqualified(text_lower: &str, words: &HashSet<String>, features: &QueryFeatures) -> bool {
    if features.is_vegetarian_request
        && NON_VEG_LEXICON.iter().any(|term| words.contains(*term))
    {
        return true;
    }
    if features.is_gluten_free_request {
        for term in GLUTEN_LEXICON {
            if words.contains(*term) {
                // "gluten-free flour" is fine; bare "flour" is not. The
                // exception is checked per offending word.
                let hyphenated = format!("gluten-free {}", term);
                let spaced = format!("gluten free {}", term);
                if !text_lower.contains(&hyphenated) && !text_lower.contains(&spaced) {
                    return true;
                }
            }
        }
    }
    false
}

/// Compute the weighted relevance score for one section.
///
/// `similarity` is the precomputed cosine similarity between the scoring
/// query embedding and this section's embedding (embeddings are batched
/// upstream). Returns exactly 0.0 for disqualified sections.
pub fn score_section(
    section_text: &str,
    similarity: f32,
    features: &QueryFeatures,
    title_boost: f32,
    filename_boost: f32,
) -> f32 {
    let text_lower = section_text.to_lowercase();
    let words = word_set(&text_lower);

    if disqualified(&text_lower, &words, features) {
        return 0.0;
    }

    let phrase_bonus = features
        .phrase_words()
        .iter()
        .filter(|w| words.contains(*w))
        .count() as f32
        * PHRASE_WORD_BONUS;

    let simple_bonus = features
        .simple_keywords
        .iter()
        .filter(|k| words.contains(*k))
        .count() as f32
        * SIMPLE_KEYWORD_BONUS;

    similarity + phrase_bonus + simple_bonus + title_boost + filename_boost
}
