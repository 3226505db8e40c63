//! Input and output JSON contracts.
//!
//! One input document per run describes the persona, the job to be done,
//! and the PDF filenames to analyze; the output carries run metadata plus
//! two parallel arrays (ranked section references and refined texts)
//! produced from the same final selection in the same order.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Challenge metadata accompanying the query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengeInfo {
    /// Test case identifier
    #[serde(default)]
    pub test_case_name: String,
    /// Free-form challenge description
    #[serde(default)]
    pub description: String,
}

/// One requested document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Filename of a PDF expected next to the input JSON
    pub filename: String,
}

/// The persona issuing the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Persona role description
    pub role: String,
}

/// The task the persona needs the sections for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobToBeDone {
    /// Task description
    pub task: String,
}

/// Top-level input record for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// Challenge metadata (optional fields default to empty)
    #[serde(default)]
    pub challenge_info: ChallengeInfo,
    /// Documents to analyze
    pub documents: Vec<DocumentRef>,
    /// Persona issuing the query
    pub persona: Persona,
    /// Job to be done
    pub job_to_be_done: JobToBeDone,
}

/// Run metadata echoed into the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Every requested input filename, in input order
    pub input_documents: Vec<String>,
    /// Persona role string
    pub persona: String,
    /// Task description string
    pub job_to_be_done: String,
    /// ISO-8601 timestamp of the run
    pub processing_timestamp: String,
}

/// One entry of the ranked section list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSection {
    /// Filename of the owning document
    pub document: String,
    /// Section heading text
    pub section_title: String,
    /// Dense 1-based importance rank
    pub importance_rank: u32,
    /// Page the section starts on (1-based)
    pub page_number: u32,
}

/// One entry of the refined-text list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    /// Filename of the owning document
    pub document: String,
    /// Condensed or cleaned section text
    pub refined_text: String,
    /// Page the section starts on (1-based)
    pub page_number: u32,
}

/// Top-level output record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutput {
    /// Run metadata
    pub metadata: Metadata,
    /// Ranked section references
    pub extracted_sections: Vec<ExtractedSection>,
    /// Refined texts, same sections in the same order
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

/// Load and validate the run input.
///
/// Fails with [`Error::Input`] when the file is missing and [`Error::Json`]
/// when required keys are absent; nothing downstream runs on partial input.
pub fn load_input(path: &Path) -> Result<AnalysisInput> {
    let data = fs::read_to_string(path)
        .map_err(|e| Error::Input(format!("cannot read {}: {}", path.display(), e)))?;
    let input: AnalysisInput = serde_json::from_str(&data)?;
    if input.documents.is_empty() {
        return Err(Error::Input("no documents listed in input".to_string()));
    }
    Ok(input)
}

/// Write the output record as pretty-printed JSON.
pub fn write_output(path: &Path, output: &AnalysisOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(output)?;
    fs::write(path, json)?;
    Ok(())
}
