//! Section reconstruction.
//!
//! A section is the text between one heading's occurrence on its page and
//! the next heading's occurrence on *its* page (or end of document for the
//! last heading). Sections routinely cross page boundaries; whole
//! intervening pages are included verbatim.
//!
//! Reconstruction is lossy by design: a heading whose text cannot be found
//! on its declared page (extraction drift) is skipped, and reconstructed
//! texts under the minimum word count are dropped as noise. Neither case is
//! an error.

use crate::document::{Document, Section};

/// Reconstruct every section of a document from its outline and page text.
///
/// Sections come back in outline order. `min_words` filters out noise
/// fragments (stray headings over figures, decorative lines).
pub fn reconstruct_sections(doc: &Document, min_words: usize) -> Vec<Section> {
    let headings = &doc.outline.headings;
    let mut sections = Vec::new();

    for (i, heading) in headings.iter().enumerate() {
        if heading.text.is_empty() {
            continue;
        }

        let next = headings.get(i + 1);
        let (end_page, end_text) = match next {
            Some(n) => (n.page, Some(n.text.as_str())),
            None => (doc.last_page().unwrap_or(heading.page), None),
        };

        let Some(text) = reconstruct_span(doc, heading.page, &heading.text, end_page, end_text)
        else {
            log::debug!(
                "section '{}' ({}): heading not found on page {}, skipping",
                heading.text,
                doc.filename,
                heading.page
            );
            continue;
        };

        if text.split_whitespace().count() < min_words {
            continue;
        }

        sections.push(Section {
            document: doc.filename.clone(),
            heading: heading.clone(),
            start_page: heading.page,
            end_page,
            text,
        });
    }

    sections
}

/// Recover the text span from `start_text` on `start_page` up to the first
/// occurrence of `end_text` on `end_page`.
///
/// Returns `None` when the start heading cannot be located on its page.
fn reconstruct_span(
    doc: &Document,
    start_page: u32,
    start_text: &str,
    end_page: u32,
    end_text: Option<&str>,
) -> Option<String> {
    let empty = String::new();
    let page_text = doc.pages.get(&start_page).unwrap_or(&empty);
    let start_index = page_text.find(start_text)?;

    let mut parts: Vec<&str> = Vec::new();

    if start_page == end_page && end_text.is_some() {
        // Single-page section: cut at the end heading, or run to end of page.
        let tail = &page_text[start_index..];
        let end_index = end_text
            .and_then(|t| tail.find(t))
            .unwrap_or(tail.len());
        parts.push(&tail[..end_index]);
    } else {
        parts.push(&page_text[start_index..]);
        for page_no in (start_page + 1)..end_page {
            if let Some(text) = doc.pages.get(&page_no) {
                parts.push(text);
            } else {
                parts.push("");
            }
        }
        if end_page > start_page {
            let end_page_text = doc.pages.get(&end_page).map(String::as_str).unwrap_or("");
            let end_index = end_text
                .and_then(|t| end_page_text.find(t))
                .unwrap_or(end_page_text.len());
            parts.push(&end_page_text[..end_index]);
        }
    }

    Some(parts.join("\n").trim().to_string())
}
