//! Two-stage ranked selection with per-document diversity caps.
//!
//! Both stages share one walk: sort by score descending, accept greedily
//! while a per-document counter stays under the cap, stop at the size limit.
//! The first pass casts a wide net (more per document, more total); the
//! second produces the tighter final answer and assigns dense ranks in
//! acceptance order.

use std::collections::HashMap;

use crate::document::ScoredSection;
use crate::utils::safe_float_cmp;

/// One section accepted by the final ranking pass.
#[derive(Debug, Clone)]
pub struct RankedSection {
    /// Filename of the owning document
    pub document: String,
    /// Heading text used as the section title
    pub section_title: String,
    /// Dense 1-based rank in acceptance order
    pub importance_rank: u32,
    /// Page the section starts on (1-based)
    pub page_number: u32,
    /// Reconstructed section text, for condensation
    pub text: String,
}

/// Stage 1: keep the best `max_total` sections, at most `per_doc_cap` from
/// any one document.
pub fn shortlist(
    mut scored: Vec<ScoredSection>,
    per_doc_cap: usize,
    max_total: usize,
) -> Vec<ScoredSection> {
    scored.sort_by(|a, b| safe_float_cmp(b.score, a.score));

    let mut doc_counts: HashMap<String, usize> = HashMap::new();
    let mut kept = Vec::new();
    for section in scored {
        let count = doc_counts.entry(section.section.document.clone()).or_insert(0);
        if *count >= per_doc_cap {
            continue;
        }
        *count += 1;
        kept.push(section);
        if kept.len() >= max_total {
            break;
        }
    }
    kept
}

/// Stage 2: final selection over the shortlist with a stricter cap, dense
/// rank assignment, and a defensive skip of empty-text sections.
pub fn rank_final(
    candidates: &[ScoredSection],
    per_doc_cap: usize,
    max_total: usize,
) -> Vec<RankedSection> {
    let mut sorted: Vec<&ScoredSection> = candidates.iter().collect();
    sorted.sort_by(|a, b| safe_float_cmp(b.score, a.score));

    let mut doc_counts: HashMap<&str, usize> = HashMap::new();
    let mut output = Vec::new();
    let mut rank = 1u32;

    for scored in sorted {
        let section = &scored.section;

        if section.text.trim().is_empty() {
            log::info!(
                "skipping section '{}' in {}: empty associated text",
                section.heading.text,
                section.document
            );
            continue;
        }

        let count = doc_counts.entry(section.document.as_str()).or_insert(0);
        if *count >= per_doc_cap {
            continue;
        }
        *count += 1;

        output.push(RankedSection {
            document: section.document.clone(),
            section_title: section.heading.text.clone(),
            importance_rank: rank,
            page_number: section.start_page,
            text: section.text.clone(),
        });
        rank += 1;

        if output.len() >= max_total {
            break;
        }
    }
    output
}
