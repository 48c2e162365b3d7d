pub mod headings;
pub mod sections;

pub use sections::Section;

/// A document after text extraction: its name and one linearized text stream.
#[derive(Debug, Clone)]
pub struct Document {
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Document {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn sections(&self, lines_per_page: usize) -> Vec<Section> {
        sections::segment(&self.name, &self.text, lines_per_page)
    }
}
