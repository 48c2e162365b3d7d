use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PipelineError;
use crate::parser::Section;
use crate::subsections::Subsection;

pub const REPORT_SECTIONS: usize = 15;
pub const OUTPUT_FILE: &str = "challenge1b_output.json";

#[derive(Debug, Serialize, Deserialize)]
pub struct Report {
    pub metadata: Metadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    pub input_documents: Vec<String>,
    pub persona: String,
    pub job_to_be_done: String,
    pub processing_timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub section_title: String,
    pub importance_rank: usize,
    pub page_number: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

/// Local time, ISO-8601 with microseconds.
pub fn timestamp_now() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

pub fn assemble(
    metadata: Metadata,
    ranked: &[Section],
    subsections: &[Subsection],
    report_sections: usize,
) -> Report {
    let extracted_sections = ranked
        .iter()
        .take(report_sections)
        .map(|s| ExtractedSection {
            document: s.document.clone(),
            section_title: s.title.clone(),
            importance_rank: s.importance_rank,
            page_number: s.page,
        })
        .collect();

    let subsection_analysis = subsections
        .iter()
        .map(|s| SubsectionAnalysis {
            document: s.document.clone(),
            refined_text: s.refined_text.clone(),
            page_number: s.page,
        })
        .collect();

    Report {
        metadata,
        extracted_sections,
        subsection_analysis,
    }
}

impl Report {
    /// Four-space indented JSON; non-ASCII text is written as is.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn write(&self, path: &Path) -> Result<(), PipelineError> {
        let json = self.to_json().map_err(|e| PipelineError::io(path, e.into()))?;
        std::fs::write(path, json).map_err(|e| PipelineError::io(path, e))
    }
}

/// Create `dir`, or empty it of regular files if it already exists. Subdirectories are left alone.
pub fn prepare_output_dir(dir: &Path) -> Result<(), PipelineError> {
    if !dir.exists() {
        return std::fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| PipelineError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| PipelineError::io(dir, e))?.path();
        if path.is_file() {
            debug!("Removing stale output {}", path.display());
            std::fs::remove_file(&path).map_err(|e| PipelineError::io(&path, e))?;
        }
    }
    Ok(())
}

// ── Tests ──
