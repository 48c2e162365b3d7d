use std::sync::LazyLock;

use regex::Regex;

use crate::parser::Section;
use crate::settings::PipelineConfig;

static SENTENCE_END_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

pub const TOP_SECTIONS: usize = 10;
pub const MAX_CHUNK_CHARS: usize = 200;
pub const CHUNKS_PER_SECTION: usize = 3;
pub const MIN_CHUNK_CHARS: usize = 50;
pub const MAX_SUBSECTIONS: usize = 20;

/// Score lost per chunk position within one section.
pub const DECAY_STEP: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Subsection {
    pub document: String,
    pub page: u32,
    pub refined_text: String,
    pub relevance_score: f64,
}

/// Break the top-ranked sections into short excerpts and re-rank them.
///
/// `ranked` must already be sorted by the ranker.
pub fn extract_subsections(ranked: &[Section], cfg: &PipelineConfig) -> Vec<Subsection> {
    let mut subsections = Vec::new();

    for section in ranked.iter().take(cfg.top_sections) {
        let chunks = chunk_sentences(&section.content, cfg.max_chunk_chars);
        for (position, chunk) in chunks.into_iter().take(cfg.chunks_per_section).enumerate() {
            if chunk.chars().count() < cfg.min_chunk_chars {
                continue;
            }
            subsections.push(Subsection {
                document: section.document.clone(),
                page: section.page,
                refined_text: chunk,
                relevance_score: section.relevance_score * (1.0 - DECAY_STEP * position as f64),
            });
        }
    }

    subsections.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
    subsections.truncate(cfg.max_subsections);
    subsections
}

/// Greedily pack sentences into chunks of roughly `max_chars`.
///
/// A sentence is appended while the chunk plus the bare sentence stays under
/// the bound; the ". " added after it can carry a chunk slightly past it.
pub fn chunk_sentences(content: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    let sentences = SENTENCE_END_RE
        .split(content)
        .map(str::trim)
        .filter(|s| !s.is_empty());

    for sentence in sentences {
        if current.chars().count() + sentence.chars().count() < max_chars {
            current.push_str(sentence);
            current.push_str(". ");
        } else {
            if !current.is_empty() {
                chunks.push(current.trim().to_string());
            }
            current = format!("{}. ", sentence);
        }
    }

    if !current.is_empty() {
        chunks.push(current.trim().to_string());
    }

    chunks
}

// ── Tests ──
