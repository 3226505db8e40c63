//! Heading classification rules.
//!
//! Classification runs in two phases over a [`LineContext`]:
//! 1. ordered rejection rules — the first match disqualifies the line;
//! 2. additive score rules — the line is a heading iff the summed score
//!    reaches the acceptance threshold (posters use a lower bar).
//!
//! Each rule is a named pure function so it can be exercised on its own.
//! Level assignment ([`heading_level`]) is a pure function of the heading
//! text alone; it deliberately ignores previously assigned levels, so level
//! sequences are not guaranteed monotonic.

use lazy_static::lazy_static;
use regex::{Regex, RegexSet, RegexSetBuilder};

use crate::document::HeadingLevel;
use crate::layout::line_context::{is_title, is_upper, LineContext};

lazy_static! {
    static ref DATE_PREFIX: Regex = Regex::new(r"^\d{1,2}[/-]\d{1,2}[/-]\d{2,4}").unwrap();
    static ref BULLET_PREFIX: Regex = Regex::new(r"^[•\-–*]").unwrap();
    static ref BARE_PAGE_NUMBER: Regex = Regex::new(r"^(page|p\.?)\s*\d+$").unwrap();
    static ref NUMBERED_OUTLINE: Regex = Regex::new(r"^\d+(\.\d+){0,2}\s+[A-Z]").unwrap();
    static ref OUTLINE_PREFIX: Regex = Regex::new(r"^(\d+(\.\d+){0,2})\s+").unwrap();

    // Field labels and numbering shapes that show up in fillable forms.
    static ref FORM_FIELD_PATTERNS: RegexSet = RegexSetBuilder::new([
        r"^\d+\.\s*[A-Za-z]+",
        r"^\(?\d+\)?\s*[A-Za-z]+",
        r"^[A-Za-z]+\s*:\s*$",
        r"^(Name|Date|Address|Phone|Email|Signature|Relationship)\s*:?$",
        r"^(S\.No|Sl\.No)",
        r"PAY|NPA|SI",
    ])
    .case_insensitive(true)
    .build()
    .unwrap();

    // Column-header shapes: known labels or several words in a row.
    static ref TABLE_HEADER_PATTERNS: RegexSet = RegexSetBuilder::new([
        r"S\.No",
        r"Name\s+Age\s+Relationship",
        r"\w+\s+\w+\s+\w+\s+\w+",
    ])
    .case_insensitive(true)
    .build()
    .unwrap();
}

/// A named disqualification rule. The first rule that matches rejects the
/// line before any scoring happens.
pub struct RejectRule {
    /// Rule identifier, for diagnostics and tests
    pub name: &'static str,
    /// Returns true when the line must not be treated as a heading
    pub test: fn(&LineContext) -> bool,
}

fn reject_empty_or_overlong(ctx: &LineContext) -> bool {
    ctx.text.is_empty() || ctx.text.chars().count() > 150
}

fn reject_continuation_marker(ctx: &LineContext) -> bool {
    ctx.text.trim().to_lowercase().starts_with("o ")
}

fn reject_date_prefix(ctx: &LineContext) -> bool {
    DATE_PREFIX.is_match(ctx.text)
}

fn reject_bullet_prefix(ctx: &LineContext) -> bool {
    BULLET_PREFIX.is_match(ctx.text)
}

fn reject_bare_page_number(ctx: &LineContext) -> bool {
    BARE_PAGE_NUMBER.is_match(&ctx.text.to_lowercase())
}

fn reject_form_field(ctx: &LineContext) -> bool {
    !ctx.is_poster && FORM_FIELD_PATTERNS.is_match(ctx.text)
}

fn reject_table_header(ctx: &LineContext) -> bool {
    if ctx.is_poster {
        return false;
    }
    if !ctx.text.is_empty() && ctx.page_text.matches(ctx.text).count() > 1 {
        return true;
    }
    TABLE_HEADER_PATTERNS.is_match(ctx.text)
}

fn reject_too_many_words(ctx: &LineContext) -> bool {
    !ctx.is_poster && ctx.word_count() > 12
}

fn reject_poster_shape(ctx: &LineContext) -> bool {
    ctx.is_poster && !(is_upper(ctx.text) || ctx.word_count() <= 5)
}

/// Rejection rules in evaluation order.
pub const REJECT_RULES: &[RejectRule] = &[
    RejectRule {
        name: "empty-or-overlong",
        test: reject_empty_or_overlong,
    },
    RejectRule {
        name: "continuation-marker",
        test: reject_continuation_marker,
    },
    RejectRule {
        name: "date-prefix",
        test: reject_date_prefix,
    },
    RejectRule {
        name: "bullet-prefix",
        test: reject_bullet_prefix,
    },
    RejectRule {
        name: "bare-page-number",
        test: reject_bare_page_number,
    },
    RejectRule {
        name: "form-field",
        test: reject_form_field,
    },
    RejectRule {
        name: "table-header",
        test: reject_table_header,
    },
    RejectRule {
        name: "too-many-words",
        test: reject_too_many_words,
    },
    RejectRule {
        name: "poster-shape",
        test: reject_poster_shape,
    },
];

/// A named additive score rule.
pub struct ScoreRule {
    /// Rule identifier, for diagnostics and tests
    pub name: &'static str,
    /// Score contribution for this line
    pub weight: fn(&LineContext) -> f32,
}

fn score_numbered_outline(ctx: &LineContext) -> f32 {
    if NUMBERED_OUTLINE.is_match(ctx.text) {
        3.0
    } else {
        0.0
    }
}

fn score_case_shape(ctx: &LineContext) -> f32 {
    if is_upper(ctx.text) {
        2.0
    } else if is_title(ctx.text) {
        1.0
    } else {
        0.0
    }
}

fn score_near_page_top(ctx: &LineContext) -> f32 {
    if ctx.line_index < 3 {
        1.0
    } else {
        0.0
    }
}

fn score_verb_scarcity(ctx: &LineContext) -> f32 {
    match ctx.verb_count {
        0 => 1.0,
        1 => 0.5,
        _ => 0.0,
    }
}

fn score_open_ended(ctx: &LineContext) -> f32 {
    let trimmed = ctx.text.trim_end();
    if trimmed.ends_with('.') || trimmed.ends_with(':') || trimmed.ends_with(';') {
        0.0
    } else {
        0.5
    }
}

fn score_distinct_from_prev(ctx: &LineContext) -> f32 {
    if !ctx.prev_line.is_empty() && !ctx.prev_line.contains(ctx.text) {
        0.5
    } else {
        0.0
    }
}

fn score_distinct_from_next(ctx: &LineContext) -> f32 {
    if !ctx.next_line.is_empty() && !ctx.next_line.contains(ctx.text) {
        0.5
    } else {
        0.0
    }
}

/// Score rules in evaluation order.
pub const SCORE_RULES: &[ScoreRule] = &[
    ScoreRule {
        name: "numbered-outline",
        weight: score_numbered_outline,
    },
    ScoreRule {
        name: "case-shape",
        weight: score_case_shape,
    },
    ScoreRule {
        name: "near-page-top",
        weight: score_near_page_top,
    },
    ScoreRule {
        name: "verb-scarcity",
        weight: score_verb_scarcity,
    },
    ScoreRule {
        name: "open-ended",
        weight: score_open_ended,
    },
    ScoreRule {
        name: "distinct-from-prev",
        weight: score_distinct_from_prev,
    },
    ScoreRule {
        name: "distinct-from-next",
        weight: score_distinct_from_next,
    },
];

/// Name of the first rejection rule matching the line, if any.
pub fn rejection(ctx: &LineContext) -> Option<&'static str> {
    REJECT_RULES
        .iter()
        .find(|rule| (rule.test)(ctx))
        .map(|rule| rule.name)
}

/// Sum of all score-rule contributions for the line.
pub fn heading_score(ctx: &LineContext) -> f32 {
    SCORE_RULES.iter().map(|rule| (rule.weight)(ctx)).sum()
}

/// Minimum score for acceptance. Posters get a lower bar.
pub fn accept_threshold(is_poster: bool) -> f32 {
    if is_poster {
        2.0
    } else {
        3.0
    }
}

/// Full classification: not rejected, and scored at or above threshold.
pub fn is_heading(ctx: &LineContext) -> bool {
    rejection(ctx).is_none() && heading_score(ctx) >= accept_threshold(ctx.is_poster)
}

/// Assign a heading level from the text alone.
///
/// A numbered prefix maps dot depth to level ("2" → H1, "2.1" → H2,
/// "2.1.3" → H3); otherwise all-caps text is H1, and short titles rank above
/// longer ones by word count.
pub fn heading_level(text: &str) -> HeadingLevel {
    if let Some(caps) = OUTLINE_PREFIX.captures(text) {
        let depth = caps.get(1).map(|m| m.as_str().matches('.').count());
        return match depth {
            Some(0) => HeadingLevel::H1,
            Some(1) => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        };
    }
    if is_upper(text) {
        return HeadingLevel::H1;
    }
    match text.split_whitespace().count() {
        0..=3 => HeadingLevel::H1,
        4..=6 => HeadingLevel::H2,
        _ => HeadingLevel::H3,
    }
}
