use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::PipelineError;

pub const MANIFEST_FILE: &str = "challenge1b_input.json";
pub const DOCUMENTS_DIR: &str = "PDFs";

pub const DEFAULT_PERSONA: &str = "Analyst";
pub const DEFAULT_TASK: &str = "Analyze documents";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub challenge_info: ChallengeInfo,
    pub documents: Vec<DocumentRef>,
    pub persona: Option<Persona>,
    pub job_to_be_done: Option<JobToBeDone>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChallengeInfo {
    pub challenge_id: Option<String>,
    pub test_case_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRef {
    pub filename: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Persona {
    pub role: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JobToBeDone {
    pub task: Option<String>,
}

/// A listed document that exists on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDocument {
    pub filename: String,
    pub title: Option<String>,
    pub path: PathBuf,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        if !path.is_file() {
            return Err(PipelineError::MissingManifest(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        Self::parse(&raw).map_err(|source| PipelineError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn persona(&self) -> &str {
        self.persona
            .as_ref()
            .and_then(|p| p.role.as_deref())
            .unwrap_or(DEFAULT_PERSONA)
    }

    pub fn task(&self) -> &str {
        self.job_to_be_done
            .as_ref()
            .and_then(|j| j.task.as_deref())
            .unwrap_or(DEFAULT_TASK)
    }

    /// Listed documents present in `dir`, in manifest order. Missing ones are skipped with a warning.
    pub fn resolve_documents(&self, dir: &Path) -> Result<Vec<ResolvedDocument>, PipelineError> {
        if !dir.is_dir() {
            return Err(PipelineError::MissingDocumentDir(dir.to_path_buf()));
        }

        let mut found = Vec::with_capacity(self.documents.len());
        for doc in &self.documents {
            let path = dir.join(&doc.filename);
            if path.is_file() {
                found.push(ResolvedDocument {
                    filename: doc.filename.clone(),
                    title: doc.title.clone(),
                    path,
                });
            } else {
                warn!("{} not found in {}", doc.filename, dir.display());
            }
        }

        if found.is_empty() {
            return Err(PipelineError::NoDocuments);
        }
        Ok(found)
    }
}

// ── Tests ──
