use std::path::PathBuf;

use config::Config;
use serde::Deserialize;

use crate::error::PipelineError;
use crate::parser::sections::LINES_PER_PAGE;
use crate::rank::MAX_FEATURES;
use crate::report::REPORT_SECTIONS;
use crate::subsections::{
    CHUNKS_PER_SECTION, MAX_CHUNK_CHARS, MAX_SUBSECTIONS, MIN_CHUNK_CHARS, TOP_SECTIONS,
};

pub const DEFAULT_INPUT_DIR: &str = "/app/input_1b";
pub const DEFAULT_OUTPUT_DIR: &str = "/app/output_1b";

/// Tunables of the analysis stages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub lines_per_page: usize,
    pub max_features: usize,
    pub top_sections: usize,
    pub max_chunk_chars: usize,
    pub chunks_per_section: usize,
    pub min_chunk_chars: usize,
    pub max_subsections: usize,
    pub report_sections: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            lines_per_page: LINES_PER_PAGE,
            max_features: MAX_FEATURES,
            top_sections: TOP_SECTIONS,
            max_chunk_chars: MAX_CHUNK_CHARS,
            chunks_per_section: CHUNKS_PER_SECTION,
            min_chunk_chars: MIN_CHUNK_CHARS,
            max_subsections: MAX_SUBSECTIONS,
            report_sections: REPORT_SECTIONS,
        }
    }
}

/// Everything one run needs. Passed explicitly; nothing is kept between runs.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Settings {
    #[cfg(test)]
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Settings {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            pipeline: PipelineConfig::default(),
        }
    }

    /// Defaults, then an optional `docintel.toml`, then `DOCINTEL_*` env vars
    /// (`DOCINTEL_INPUT_DIR`, `DOCINTEL_PIPELINE__TOP_SECTIONS`, ...).
    pub fn load() -> Result<Self, PipelineError> {
        let settings: Settings = Config::builder()
            .set_default("input_dir", DEFAULT_INPUT_DIR)?
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
            .add_source(config::File::with_name("docintel").required(false))
            .add_source(
                config::Environment::with_prefix("DOCINTEL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.input_dir.join(crate::manifest::MANIFEST_FILE)
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.input_dir.join(crate::manifest::DOCUMENTS_DIR)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(crate::report::OUTPUT_FILE)
    }
}
