//! Structural outline inference from page-layout signals.
//!
//! Two independent detectors feed one merged outline per document:
//! - a textual pass ([`heading_rules`]) scoring each cleaned line against
//!   named typographic heuristics, and
//! - a font-size pass ([`font_clusters`]) treating lines set noticeably
//!   larger than the document's body font as heading candidates.
//!
//! [`outline_builder`] runs both, prunes poster/flyer noise, and merges the
//! results (first detector wins on exact text collisions).

pub mod font_clusters;
pub mod heading_rules;
pub mod line_context;
pub mod outline_builder;

// Re-export main types
pub use font_clusters::{font_size_candidates, FontCandidate};
pub use heading_rules::{accept_threshold, heading_level, heading_score, is_heading, rejection};
pub use line_context::{clean_line, is_poster_layout, LineContext};
pub use outline_builder::{extract_title, merge_outlines, OutlineBuilder};
