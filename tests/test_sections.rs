//! Integration tests for section reconstruction.

use std::collections::BTreeMap;

use docsieve::sections::reconstruct_sections;
use docsieve::{Document, HeadingEntry, HeadingLevel, Outline};

// ============================================================================
// Helper Functions for Creating Mock Data
// ============================================================================

fn heading(text: &str, page: u32) -> HeadingEntry {
    HeadingEntry {
        text: text.to_string(),
        level: HeadingLevel::H2,
        page,
    }
}

fn document(pages: &[&str], headings: Vec<HeadingEntry>) -> Document {
    let mut map = BTreeMap::new();
    for (i, text) in pages.iter().enumerate() {
        map.insert(i as u32 + 1, text.to_string());
    }
    Document {
        filename: "cities.pdf".to_string(),
        pages: map,
        outline: Outline {
            title: String::new(),
            headings,
        },
    }
}

const FILLER: &str = "plenty of descriptive body text with more than enough words to keep \
                      the reconstructed section above the minimum word count";

// ============================================================================
// Anchoring Properties
// ============================================================================

#[test]
fn test_sections_anchor_at_their_heading() {
    let page1 = format!("Nice and Around\n{}\nAvignon Day Trips\n{}", FILLER, FILLER);
    let doc = document(
        &[&page1],
        vec![heading("Nice and Around", 1), heading("Avignon Day Trips", 1)],
    );
    let sections = reconstruct_sections(&doc, 10);
    assert_eq!(sections.len(), 2);
    for section in &sections {
        assert!(
            section.text.starts_with(&section.heading.text),
            "section does not start with its heading: {:?}",
            section.heading.text
        );
    }
}

#[test]
fn test_section_never_swallows_next_heading() {
    let page1 = format!("Nice and Around\n{}\nAvignon Day Trips\n{}", FILLER, FILLER);
    let doc = document(
        &[&page1],
        vec![heading("Nice and Around", 1), heading("Avignon Day Trips", 1)],
    );
    let sections = reconstruct_sections(&doc, 10);
    assert!(!sections[0].text.contains("Avignon Day Trips"));
}

#[test]
fn test_cross_page_section_collects_intervening_pages() {
    let doc = document(
        &[
            &format!("Nice and Around\n{}", FILLER),
            "an entire middle page that belongs to the first section in full",
            &format!("tail of the first section\nAvignon Day Trips\n{}", FILLER),
        ],
        vec![heading("Nice and Around", 1), heading("Avignon Day Trips", 3)],
    );
    let sections = reconstruct_sections(&doc, 10);
    assert_eq!(sections.len(), 2);

    let first = &sections[0];
    assert!(first.text.starts_with("Nice and Around"));
    assert!(first.text.contains("an entire middle page"));
    assert!(first.text.contains("tail of the first section"));
    assert!(!first.text.contains("Avignon Day Trips"));
    assert_eq!((first.start_page, first.end_page), (1, 3));
}

#[test]
fn test_last_section_reaches_document_end() {
    let doc = document(
        &[
            &format!("Avignon Day Trips\n{}", FILLER),
            "closing remarks on the last page with several additional words here",
        ],
        vec![heading("Avignon Day Trips", 1)],
    );
    let sections = reconstruct_sections(&doc, 10);
    assert_eq!(sections.len(), 1);
    assert!(sections[0].text.contains("closing remarks on the last page"));
    assert_eq!(sections[0].end_page, 2);
}

// ============================================================================
// Drop and Skip Behavior
// ============================================================================

#[test]
fn test_unlocatable_heading_skips_section() {
    let doc = document(
        &[&format!("{}\n{}", FILLER, FILLER)],
        vec![heading("Never Appears", 1)],
    );
    assert!(reconstruct_sections(&doc, 10).is_empty());
}

#[test]
fn test_sections_under_minimum_words_are_dropped() {
    let doc = document(
        &[&format!("Stub Heading\nshort tail\nNice and Around\n{}", FILLER)],
        vec![heading("Stub Heading", 1), heading("Nice and Around", 1)],
    );
    let sections = reconstruct_sections(&doc, 10);
    // "Stub Heading\nshort tail" is 4 words; only the second survives.
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].heading.text, "Nice and Around");
}

#[test]
fn test_no_headings_yields_no_sections() {
    let doc = document(&[FILLER, FILLER], vec![]);
    assert!(reconstruct_sections(&doc, 10).is_empty());
}

#[test]
fn test_empty_document_yields_no_sections() {
    let doc = document(&[], vec![heading("Anything", 1)]);
    assert!(reconstruct_sections(&doc, 10).is_empty());
}
