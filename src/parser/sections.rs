use super::headings::is_heading;

/// Rough page stride; the flattened text stream carries no real page breaks.
pub const LINES_PER_PAGE: usize = 50;

/// Title given to body text that never had a heading above it.
pub const PLACEHOLDER_TITLE: &str = "Content";

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub document: String,
    pub title: String,
    pub content: String,
    /// Best-effort 1-based page estimate.
    pub page: u32,
    /// Cosine similarity to the query, set by the ranker.
    pub relevance_score: f64,
    /// 1 = most relevant; 0 until ranked.
    pub importance_rank: usize,
}

impl Section {
    fn new(document: &str, title: Option<String>, body: &str, page: u32) -> Self {
        Section {
            document: document.to_string(),
            title: title.unwrap_or_else(|| PLACEHOLDER_TITLE.to_string()),
            content: body.trim().to_string(),
            page,
            relevance_score: 0.0,
            importance_rank: 0,
        }
    }
}

/// Split a document's text stream into titled sections.
///
/// Every non-blank, non-heading line lands in exactly one section. Headings
/// seen before any body text only rename the pending section, so no empty
/// sections are emitted. A section closed by a heading is tagged one page
/// back from the running counter; the last section keeps the counter as is.
pub fn segment(document: &str, text: &str, lines_per_page: usize) -> Vec<Section> {
    let stride = lines_per_page.max(1);
    let mut sections = Vec::new();
    let mut title: Option<String> = None;
    let mut body = String::new();
    let mut page: u32 = 1;

    for (i, raw) in text.split('\n').enumerate() {
        if i > 0 && i % stride == 0 {
            page += 1;
        }

        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if is_heading(line) {
            if !body.is_empty() {
                let flushed_page = page.saturating_sub(1).max(1);
                sections.push(Section::new(document, title.take(), &body, flushed_page));
                body.clear();
            }
            title = Some(line.to_string());
        } else {
            body.push_str(line);
            body.push(' ');
        }
    }

    if !body.is_empty() {
        sections.push(Section::new(document, title, &body, page));
    }

    sections
}

// ── Tests ──
