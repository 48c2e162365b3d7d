//! Document → text stream. Never fails: an unreadable document yields an
//! empty string and contributes no sections.

use std::path::Path;

use tracing::{debug, warn};

pub fn extract_text(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("pdf") => {
            let text = extract_pdf(path);
            if !text.trim().is_empty() {
                return text;
            }
            // text sidecar next to the PDF, e.g. guide.pdf → guide.txt
            let sidecar = path.with_extension("txt");
            if sidecar.is_file() {
                debug!("Using text sidecar {}", sidecar.display());
                return read_plain(&sidecar);
            }
            text
        }
        _ => read_plain(path),
    }
}

fn read_plain(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            warn!("Error reading {}: {}", path.display(), e);
            String::new()
        }
    }
}

#[cfg(feature = "pdf")]
fn extract_pdf(path: &Path) -> String {
    let owned = path.to_path_buf();
    match std::panic::catch_unwind(move || pdf_extract::extract_text(&owned)) {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Error reading {}: {:?}", path.display(), e);
            String::new()
        }
        Err(_) => {
            warn!("PDF decoder panicked on {}", path.display());
            String::new()
        }
    }
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(path: &Path) -> String {
    warn!("Built without PDF support, skipping {}", path.display());
    String::new()
}
