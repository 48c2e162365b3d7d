//! Relevance ranking of sections against a persona/task query.
//!
//! The vector model is fitted per run over every section plus the query, so
//! scores are only comparable within one call.

pub mod stopwords;
pub mod tfidf;

use tracing::{debug, warn};

use crate::parser::Section;
use tfidf::{cosine, TfidfModel};

pub const MAX_FEATURES: usize = 1000;

/// Score assigned to every section when the model cannot be fitted.
pub const FALLBACK_SCORE: f64 = 0.5;

pub fn build_query(persona: &str, task: &str) -> String {
    format!("{} {}", persona, task)
}

/// Score, sort (stable, descending) and rank `sections`. Never fails.
pub fn rank_sections(mut sections: Vec<Section>, query: &str, max_features: usize) -> Vec<Section> {
    if sections.is_empty() {
        return sections;
    }

    let mut texts: Vec<&str> = sections.iter().map(|s| s.content.as_str()).collect();
    texts.push(query);

    match TfidfModel::fit_transform(&texts, max_features) {
        Ok((model, rows)) => {
            debug!(features = model.vocabulary.len(), docs = rows.len(), "fitted tf-idf model");
            if let Some((query_row, section_rows)) = rows.split_last() {
                for (section, row) in sections.iter_mut().zip(section_rows) {
                    section.relevance_score = cosine(query_row, row);
                }
            }
            sections.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        }
        Err(e) => {
            warn!("Ranking fell back to encounter order: {}", e);
            for section in sections.iter_mut() {
                section.relevance_score = FALLBACK_SCORE;
            }
        }
    }

    for (i, section) in sections.iter_mut().enumerate() {
        section.importance_rank = i + 1;
    }
    sections
}

// ── Tests ──
