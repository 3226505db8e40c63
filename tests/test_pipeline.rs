//! End-to-end pipeline tests with a full mock service stack.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::Path;

use docsieve::io::{AnalysisInput, ChallengeInfo, DocumentRef, JobToBeDone, Persona};
use docsieve::pipeline::DocumentAnalyzer;
use docsieve::services::{
    Embedder, Embedding, KeyphraseExtractor, PageLayout, PageSource, ParsedPdf, PosTag, PosTagger,
    Summarizer,
};
use docsieve::{Error, Result};

// ============================================================================
// Mock Services
// ============================================================================

/// Serves pre-built documents keyed by filename.
struct MapPageSource {
    docs: HashMap<String, ParsedPdf>,
}

impl PageSource for MapPageSource {
    fn open(&self, path: &Path) -> Result<ParsedPdf> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        self.docs
            .get(name)
            .cloned()
            .ok_or_else(|| Error::Document {
                filename: name.to_string(),
                reason: "cannot open file".to_string(),
            })
    }
}

/// Deterministic bag-of-words embedding: tokens hashed into 64 buckets.
struct HashEmbedder;

impl Embedder for HashEmbedder {
    fn encode_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut v = vec![0.0f32; 64];
                for token in text.to_lowercase().split_whitespace() {
                    let mut hasher = DefaultHasher::new();
                    token.hash(&mut hasher);
                    v[(hasher.finish() % 64) as usize] += 1.0;
                }
                Embedding(v)
            })
            .collect())
    }
}

struct FixedKeyphrases;

impl KeyphraseExtractor for FixedKeyphrases {
    fn extract(
        &self,
        _text: &str,
        _ngram_range: (usize, usize),
        top_n: usize,
    ) -> Result<Vec<(String, f32)>> {
        Ok(["vegetarian buffet", "office party", "buffet menu"]
            .iter()
            .take(top_n)
            .map(|p| (p.to_string(), 0.8))
            .collect())
    }
}

/// Function words become Other, everything else a noun.
struct StopwordTagger;

impl PosTagger for StopwordTagger {
    fn tag(&self, text: &str) -> Result<Vec<(String, PosTag)>> {
        Ok(text
            .split_whitespace()
            .map(|w| {
                let tag = match w {
                    "a" | "an" | "and" | "for" | "the" | "to" | "of" => PosTag::Other,
                    _ => PosTag::Noun,
                };
                (w.to_string(), tag)
            })
            .collect())
    }
}

struct PrefixSummarizer;

impl Summarizer for PrefixSummarizer {
    fn summarize(&self, texts: &[String], _max: usize, _min: usize) -> Result<Vec<String>> {
        Ok(texts
            .iter()
            .map(|t| format!("SUMMARY: {}", &t[..20]))
            .collect())
    }
}

struct FailingSummarizer;

impl Summarizer for FailingSummarizer {
    fn summarize(&self, _: &[String], _: usize, _: usize) -> Result<Vec<String>> {
        Err(Error::Summarization("whole batch failed".to_string()))
    }
}

// ============================================================================
// Fixture Documents
// ============================================================================

const VEG_BODY: &str = "roasted vegetable platters with hummus and olive tapenade make an \
                        easy buffet menu centerpiece for any office party spread everyone enjoys";

const CHICKEN_BODY: &str = "classic grilled chicken salad with romaine croutons and parmesan \
                            shavings for the meat eaters attending";

const PLATTER_BODY: &str = "a generous buffet menu for the office party should include several \
                            bright salads seasonal fruit trays crusty rolls herbed dips and \
                            roasted nuts arranged so guests can serve themselves quickly while \
                            conversation continues around the room and nobody waits in a long \
                            line for plates";

const FILLER: &str = "additional notes about seasonal produce available from local markets \
                      during most of the year";

fn text_pages(pages: &[String]) -> ParsedPdf {
    ParsedPdf {
        pages: pages
            .iter()
            .map(|t| PageLayout {
                text: t.clone(),
                span_lines: vec![],
            })
            .collect(),
        tables: vec![],
    }
}

fn fixture_source() -> MapPageSource {
    let mut docs = HashMap::new();
    docs.insert(
        "veggie_menu.pdf".to_string(),
        text_pages(&[
            format!("VEGETARIAN BUFFET\n{}\nGRILLED CHICKEN SALAD\n{}", VEG_BODY, CHICKEN_BODY),
            FILLER.to_string(),
            FILLER.to_string(),
        ]),
    );
    docs.insert(
        "sides.pdf".to_string(),
        text_pages(&[
            format!("PARTY PLATTERS\n{}", PLATTER_BODY),
            FILLER.to_string(),
            FILLER.to_string(),
        ]),
    );
    docs.insert(
        "file01.pdf".to_string(),
        text_pages(&[
            format!("APPLICATION FORM\n{}", FILLER),
            FILLER.to_string(),
            FILLER.to_string(),
        ]),
    );
    MapPageSource { docs }
}

fn fixture_input() -> AnalysisInput {
    AnalysisInput {
        challenge_info: ChallengeInfo {
            test_case_name: "office_catering".to_string(),
            description: "plan catering from a set of guides".to_string(),
        },
        documents: vec![
            DocumentRef {
                filename: "veggie_menu.pdf".to_string(),
            },
            DocumentRef {
                filename: "sides.pdf".to_string(),
            },
            DocumentRef {
                filename: "file01.pdf".to_string(),
            },
            DocumentRef {
                filename: "missing.pdf".to_string(),
            },
        ],
        persona: Persona {
            role: "Food Contractor".to_string(),
        },
        job_to_be_done: JobToBeDone {
            task: "Prepare a vegetarian buffet menu for the office party".to_string(),
        },
    }
}

fn run_with_summarizer(summarizer: &dyn Summarizer) -> docsieve::io::AnalysisOutput {
    let _ = env_logger::builder().is_test(true).try_init();
    let source = fixture_source();
    let analyzer = DocumentAnalyzer::new(
        &source,
        &HashEmbedder,
        &FixedKeyphrases,
        &StopwordTagger,
        summarizer,
    );
    analyzer
        .run(&fixture_input(), Path::new("/fixtures"))
        .expect("pipeline run failed")
}

// ============================================================================
// End-to-End Behavior
// ============================================================================

#[test]
fn test_run_produces_ranked_output() {
    let output = run_with_summarizer(&PrefixSummarizer);

    assert!(!output.extracted_sections.is_empty());
    let ranks: Vec<u32> = output
        .extracted_sections
        .iter()
        .map(|s| s.importance_rank)
        .collect();
    let expected: Vec<u32> = (1..=output.extracted_sections.len() as u32).collect();
    assert_eq!(ranks, expected);

    // The vegetarian section outscores the sides platter on keyword bonuses.
    assert_eq!(output.extracted_sections[0].document, "veggie_menu.pdf");
    assert_eq!(output.extracted_sections[0].section_title, "VEGETARIAN BUFFET");
    assert_eq!(output.extracted_sections[0].page_number, 1);
}

#[test]
fn test_meat_sections_are_excluded_for_vegetarian_request() {
    let output = run_with_summarizer(&PrefixSummarizer);
    for section in &output.extracted_sections {
        assert_ne!(section.section_title, "GRILLED CHICKEN SALAD");
    }
    for sub in &output.subsection_analysis {
        assert!(!sub.refined_text.to_lowercase().contains("chicken"));
    }
}

#[test]
fn test_output_arrays_are_parallel() {
    let output = run_with_summarizer(&PrefixSummarizer);
    assert_eq!(
        output.extracted_sections.len(),
        output.subsection_analysis.len()
    );
    for (section, sub) in output
        .extracted_sections
        .iter()
        .zip(&output.subsection_analysis)
    {
        assert_eq!(section.document, sub.document);
        assert_eq!(section.page_number, sub.page_number);
    }
}

#[test]
fn test_metadata_lists_every_requested_document() {
    let output = run_with_summarizer(&PrefixSummarizer);
    assert_eq!(
        output.metadata.input_documents,
        vec![
            "veggie_menu.pdf".to_string(),
            "sides.pdf".to_string(),
            "file01.pdf".to_string(),
            "missing.pdf".to_string(),
        ]
    );
    assert_eq!(output.metadata.persona, "Food Contractor");
    assert!(output.metadata.job_to_be_done.starts_with("Prepare"));
    assert!(output.metadata.processing_timestamp.contains('T'));
}

#[test]
fn test_unopenable_document_is_skipped_not_fatal() {
    let output = run_with_summarizer(&PrefixSummarizer);
    for section in &output.extracted_sections {
        assert_ne!(section.document, "missing.pdf");
    }
}

#[test]
fn test_file01_outline_is_suppressed() {
    let output = run_with_summarizer(&PrefixSummarizer);
    for section in &output.extracted_sections {
        assert_ne!(section.document, "file01.pdf");
    }
}

#[test]
fn test_short_section_passes_through_uncondensed() {
    let output = run_with_summarizer(&PrefixSummarizer);
    // The vegetarian section is well under 40 words: refined text is the
    // cleaned text, never a summary.
    let veg = &output.subsection_analysis[0];
    assert!(!veg.refined_text.starts_with("SUMMARY:"));
    assert!(veg.refined_text.contains("roasted vegetable platters"));
}

#[test]
fn test_long_section_is_condensed() {
    let output = run_with_summarizer(&PrefixSummarizer);
    let platter = output
        .subsection_analysis
        .iter()
        .find(|s| s.document == "sides.pdf")
        .expect("sides.pdf section missing from output");
    assert!(platter.refined_text.starts_with("SUMMARY:"));
}

#[test]
fn test_summarizer_failure_degrades_to_cleaned_text() {
    let output = run_with_summarizer(&FailingSummarizer);
    let platter = output
        .subsection_analysis
        .iter()
        .find(|s| s.document == "sides.pdf")
        .expect("sides.pdf section must survive summarizer failure");
    assert!(platter.refined_text.contains("generous buffet menu"));
    assert!(!platter.refined_text.starts_with("SUMMARY:"));
}

#[test]
fn test_per_document_cap_in_final_output() {
    let output = run_with_summarizer(&PrefixSummarizer);
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for section in &output.extracted_sections {
        *counts.entry(section.document.as_str()).or_insert(0) += 1;
    }
    for count in counts.values() {
        assert!(*count <= 2);
    }
}

#[test]
fn test_all_documents_failing_is_an_input_error() {
    let source = MapPageSource {
        docs: HashMap::new(),
    };
    let analyzer = DocumentAnalyzer::new(
        &source,
        &HashEmbedder,
        &FixedKeyphrases,
        &StopwordTagger,
        &PrefixSummarizer,
    );
    let result = analyzer.run(&fixture_input(), Path::new("/fixtures"));
    assert!(matches!(result, Err(Error::Input(_))));
}
