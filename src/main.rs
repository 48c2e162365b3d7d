mod error;
mod extract;
mod manifest;
mod metrics;
mod parser;
mod pipeline;
mod rank;
mod report;
mod settings;
mod subsections;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use parser::Document;
use settings::Settings;

#[derive(Parser)]
#[command(name = "docintel", about = "Persona-driven section ranking over document collections")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the input manifest, rank every document's sections and write the report
    Run {
        /// Input directory holding challenge1b_input.json and PDFs/
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output directory for challenge1b_output.json
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show how one document splits into sections
    Sections {
        file: PathBuf,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// Rank the sections of ad-hoc documents against a persona and task
    Rank {
        #[arg(short, long)]
        persona: String,
        #[arg(short, long)]
        task: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "15")]
        limit: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load().context("Failed to load settings")?;
    info!(settings_loaded = ?settings, "Starting docintel");

    let result = match cli.command {
        Commands::Run { input, output } => {
            if let Some(dir) = input {
                settings.input_dir = dir;
            }
            if let Some(dir) = output {
                settings.output_dir = dir;
            }

            println!("=== PERSONA-DRIVEN DOCUMENT INTELLIGENCE ===");
            println!("Input directory: {}", settings.input_dir.display());
            println!("Output directory: {}", settings.output_dir.display());

            let summary = pipeline::run(&settings).context("Pipeline run failed")?;
            summary.print();
            Ok(())
        }
        Commands::Sections { file, limit } => {
            let doc = load_document(&file);
            let sections = doc.sections(settings.pipeline.lines_per_page);
            if sections.is_empty() {
                println!("No sections found in {}.", file.display());
                return Ok(());
            }

            println!("{:>3} | {:>4} | {:<48} | {:>6}", "#", "Page", "Title", "Chars");
            println!("{}", "-".repeat(72));
            for (i, s) in sections.iter().take(limit).enumerate() {
                println!(
                    "{:>3} | {:>4} | {:<48} | {:>6}",
                    i + 1,
                    s.page,
                    truncate(&s.title, 48),
                    s.content.chars().count()
                );
            }
            println!("\n{} sections", sections.len());
            Ok(())
        }
        Commands::Rank {
            persona,
            task,
            files,
            limit,
        } => {
            let docs: Vec<Document> = files.iter().map(|f| load_document(f)).collect();
            let sections = pipeline::segment_all(&docs, settings.pipeline.lines_per_page);
            let analysis = pipeline::analyze(sections, &persona, &task, &settings.pipeline);

            println!(
                "{:>4} | {:<24} | {:<36} | {:>4} | {:>6}",
                "Rank", "Document", "Title", "Page", "Score"
            );
            println!("{}", "-".repeat(86));
            for s in analysis.ranked.iter().take(limit) {
                println!(
                    "{:>4} | {:<24} | {:<36} | {:>4} | {:>6.4}",
                    s.importance_rank,
                    truncate(&s.document, 24),
                    truncate(&s.title, 36),
                    s.page,
                    s.relevance_score
                );
            }

            if !analysis.subsections.is_empty() {
                println!("\n--- Excerpts ---");
                for sub in &analysis.subsections {
                    println!(
                        "  [{:.4}] {} p{}: {}",
                        sub.relevance_score,
                        sub.document,
                        sub.page,
                        truncate(&sub.refined_text, 80)
                    );
                }
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn load_document(path: &std::path::Path) -> Document {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Document::new(name, extract::extract_text(path))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
