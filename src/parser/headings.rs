use std::sync::LazyLock;

use regex::Regex;

static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.?\s+[A-Z]").unwrap());

/// Lines this long or longer are body text no matter what they look like.
pub const MAX_HEADING_CHARS: usize = 100;

const MAX_CAPS_WORDS: usize = 8;
const MAX_TITLE_WORDS: usize = 6;

/// Lexical heading test for a single, already trimmed line.
pub fn is_heading(line: &str) -> bool {
    if line.is_empty() || line.chars().count() >= MAX_HEADING_CHARS {
        return false;
    }
    is_numbered(line) || is_caps_heading(line) || is_title_like(line)
}

/// "1. Introduction", "2 Methods", "10.Results"
fn is_numbered(line: &str) -> bool {
    NUMBERED_RE.is_match(line)
}

/// "KITCHEN SAFETY", "SECTION 4: RULES"
fn is_caps_heading(line: &str) -> bool {
    is_all_upper(line) && word_count(line) <= MAX_CAPS_WORDS
}

/// Short capitalised line that is not a finished sentence.
fn is_title_like(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_uppercase)
        && word_count(line) <= MAX_TITLE_WORDS
        && !line.ends_with('.')
}

/// At least one cased letter and no lower-case ones. Digits and punctuation don't count.
fn is_all_upper(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered() {
        assert!(is_numbered("1. Introduction"));
        assert!(is_numbered("12 Results and discussion of the many findings"));
        assert!(!is_numbered("1.introduction"));
        assert!(!is_numbered("2024 was a good year"));
    }

    #[test]
    fn caps() {
        assert!(is_caps_heading("KITCHEN SAFETY REGULATIONS"));
        assert!(is_caps_heading("SECTION 4: RULES"));
        assert!(!is_caps_heading("ONE TWO THREE FOUR FIVE SIX SEVEN EIGHT NINE"));
        assert!(!is_caps_heading("1234 5678"));
        assert!(!is_caps_heading("Mostly Upper"));
    }

    #[test]
    fn title_like() {
        assert!(is_title_like("Coastal Adventures"));
        assert!(is_title_like("Things to do in Nice"));
        assert!(!is_title_like("Arrive early."));
        assert!(!is_title_like("lowercase start"));
        assert!(!is_title_like("This line has far too many words to be a title"));
    }

    #[test]
    fn combined() {
        assert!(is_heading("3. Packing Tips"));
        assert!(is_heading("GENERAL INFORMATION"));
        assert!(is_heading("Nightlife"));
        assert!(!is_heading(""));
        assert!(!is_heading("Day 1: Arrive and check in."));
        assert!(!is_heading("the rest of a sentence that wrapped onto a new line"));
    }

    #[test]
    fn long_lines_never_headings() {
        let long = format!("1. {}", "WORD ".repeat(30));
        assert!(long.chars().count() >= MAX_HEADING_CHARS);
        assert!(!is_heading(&long));
        let exactly = "A".repeat(MAX_HEADING_CHARS);
        assert!(!is_heading(&exactly));
        let just_under = "A".repeat(MAX_HEADING_CHARS - 1);
        assert!(is_heading(&just_under));
    }

    #[test]
    fn unicode_caps() {
        assert!(is_heading("ÉTÉ À PARIS"));
        assert!(!is_heading("été à paris"));
    }
}
