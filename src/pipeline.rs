use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::PipelineError;
use crate::extract::extract_text;
use crate::manifest::{Manifest, ResolvedDocument};
use crate::metrics::StageTracker;
use crate::parser::{Document, Section};
use crate::rank::{build_query, rank_sections};
use crate::report::{self, Metadata};
use crate::settings::{PipelineConfig, Settings};
use crate::subsections::{extract_subsections, Subsection};

pub struct Analysis {
    pub ranked: Vec<Section>,
    pub subsections: Vec<Subsection>,
}

pub struct RunSummary {
    pub output_path: PathBuf,
    pub documents: usize,
    pub sections: usize,
    pub subsections: usize,
    pub reported_sections: usize,
    pub stages: StageTracker,
}

impl RunSummary {
    pub fn print(&self) {
        println!(
            "Saved {} with {} sections and {} subsections ({} sections from {} documents ranked).",
            self.output_path.display(),
            self.reported_sections,
            self.subsections,
            self.sections,
            self.documents,
        );
        self.stages.print();
    }
}

/// Segment every document; sections come back in document order.
pub fn segment_all(documents: &[Document], lines_per_page: usize) -> Vec<Section> {
    documents
        .par_iter()
        .map(|d| d.sections(lines_per_page))
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

/// Rank all sections against the persona/task query and pull excerpts from the best ones.
pub fn analyze(sections: Vec<Section>, persona: &str, task: &str, cfg: &PipelineConfig) -> Analysis {
    let query = build_query(persona, task);
    let ranked = rank_sections(sections, &query, cfg.max_features);
    let subsections = extract_subsections(&ranked, cfg);
    Analysis {
        ranked,
        subsections,
    }
}

/// Full run: manifest → documents → report file. Nothing is written unless
/// the manifest, the documents directory and at least one document exist.
pub fn run(settings: &Settings) -> Result<RunSummary, PipelineError> {
    let cfg = &settings.pipeline;
    let manifest = Manifest::load(&settings.manifest_path())?;
    let resolved = manifest.resolve_documents(&settings.documents_dir())?;

    report::prepare_output_dir(&settings.output_dir)?;

    let persona = manifest.persona();
    let task = manifest.task();
    info!(
        challenge = ?manifest.challenge_info.challenge_id,
        test_case = ?manifest.challenge_info.test_case_name,
        description = ?manifest.challenge_info.description,
        "Loaded manifest"
    );
    println!("Processing {} documents...", resolved.len());
    println!("Persona: {}", persona);
    println!("Job: {}", task);

    let mut stages = StageTracker::new();

    let documents = extract_all(&resolved);
    stages.record("extract", documents.len());

    let sections = segment_all(&documents, cfg.lines_per_page);
    info!("Extracted {} sections total", sections.len());
    stages.record("segment", sections.len());

    let section_count = sections.len();
    let analysis = analyze(sections, persona, task, cfg);
    stages.record("rank+excerpt", analysis.subsections.len());

    let metadata = Metadata {
        input_documents: resolved.iter().map(|d| d.filename.clone()).collect(),
        persona: persona.to_string(),
        job_to_be_done: task.to_string(),
        processing_timestamp: report::timestamp_now(),
    };
    let report = report::assemble(metadata, &analysis.ranked, &analysis.subsections, cfg.report_sections);
    let output_path = settings.output_path();
    report.write(&output_path)?;
    stages.record("report", report.extracted_sections.len());

    Ok(RunSummary {
        output_path,
        documents: documents.len(),
        sections: section_count,
        subsections: report.subsection_analysis.len(),
        reported_sections: report.extracted_sections.len(),
        stages,
    })
}

fn extract_all(resolved: &[ResolvedDocument]) -> Vec<Document> {
    let pb = ProgressBar::new(resolved.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let documents = resolved
        .par_iter()
        .map(|doc| {
            debug!(title = ?doc.title, "Extracting {}", doc.filename);
            let text = extract_text(&doc.path);
            pb.inc(1);
            Document::new(doc.filename.clone(), text)
        })
        .collect();

    pb.finish_and_clear();
    documents
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Report;
    use std::path::Path;

    fn fixture_input(dir: &Path) {
        let docs = dir.join("PDFs");
        std::fs::create_dir_all(&docs).unwrap();
        std::fs::copy("tests/fixtures/input/challenge1b_input.json", dir.join("challenge1b_input.json")).unwrap();
        for name in ["travel_guide.txt", "kitchen_safety.txt"] {
            std::fs::copy(format!("tests/fixtures/{}", name), docs.join(name)).unwrap();
        }
    }

    #[test]
    fn end_to_end() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("in");
        fixture_input(&input);
        let settings = Settings::new(&input, root.path().join("out"));

        // manifest lists a third document that is not present
        let summary = run(&settings).unwrap();
        assert_eq!(summary.documents, 2);
        assert!(summary.reported_sections <= 15);
        assert!(summary.subsections <= 20);

        let json = std::fs::read_to_string(settings.output_path()).unwrap();
        let report: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(report.metadata.input_documents, vec!["travel_guide.txt", "kitchen_safety.txt"]);
        assert_eq!(report.metadata.persona, "Travel Planner");
        assert_eq!(report.extracted_sections[0].document, "travel_guide.txt");
        assert_eq!(report.extracted_sections[0].importance_rank, 1);
        assert!(report
            .subsection_analysis
            .iter()
            .all(|s| s.refined_text.chars().count() >= 50));
    }

    #[test]
    fn missing_manifest_writes_nothing() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("out");
        let settings = Settings::new(root.path().join("in"), &out);
        assert!(matches!(run(&settings), Err(PipelineError::MissingManifest(_))));
        assert!(!out.exists());
    }

    #[test]
    fn missing_documents_dir_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("in");
        std::fs::create_dir_all(&input).unwrap();
        std::fs::write(input.join("challenge1b_input.json"), r#"{"documents": [{"filename": "a.pdf"}]}"#).unwrap();
        let settings = Settings::new(&input, root.path().join("out"));
        assert!(matches!(run(&settings), Err(PipelineError::MissingDocumentDir(_))));
    }

    #[test]
    fn zero_resolvable_documents_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("in");
        std::fs::create_dir_all(input.join("PDFs")).unwrap();
        std::fs::write(input.join("challenge1b_input.json"), r#"{"documents": [{"filename": "a.pdf"}]}"#).unwrap();
        let settings = Settings::new(&input, root.path().join("out"));
        assert!(matches!(run(&settings), Err(PipelineError::NoDocuments)));
        assert!(!settings.output_path().exists());
    }

    #[test]
    fn empty_document_contributes_nothing() {
        let docs = vec![
            Document::new("empty.pdf", ""),
            Document::new("notes.txt", "Overview\nthe harbour walk takes about an hour."),
        ];
        let sections = segment_all(&docs, 50);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].document, "notes.txt");
    }

    #[test]
    fn analyze_with_no_sections() {
        let analysis = analyze(Vec::new(), "Analyst", "Analyze documents", &PipelineConfig::default());
        assert!(analysis.ranked.is_empty());
        assert!(analysis.subsections.is_empty());
    }

    #[test]
    fn segment_all_keeps_document_order() {
        let docs: Vec<Document> = (0..8)
            .map(|i| Document::new(format!("d{}", i), format!("Title {}\nbody of document {}.", i, i)))
            .collect();
        let names: Vec<String> = segment_all(&docs, 50).into_iter().map(|s| s.document).collect();
        assert_eq!(names, (0..8).map(|i| format!("d{}", i)).collect::<Vec<_>>());
    }
}
