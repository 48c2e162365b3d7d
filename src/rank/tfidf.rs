use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use super::stopwords::is_stop_word;

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").unwrap());

#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    #[error("no documents to fit")]
    NoDocuments,
    #[error("empty vocabulary; documents may only contain stop words")]
    EmptyVocabulary,
}

/// Sparse row: (feature index, weight), sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

/// Bag-of-words vocabulary; weights use smoothed inverse document frequency.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    /// Selected terms in feature-index order (lexicographic).
    pub vocabulary: Vec<String>,
}

impl TfidfModel {
    /// Fit on `docs` and return every doc's L2-normalized weight row.
    ///
    /// `max_features` keeps the terms with the highest corpus-wide count,
    /// ties going to the lexicographically smaller term. Zero means no cap.
    pub fn fit_transform(
        docs: &[&str],
        max_features: usize,
    ) -> Result<(Self, Vec<SparseVector>), FitError> {
        if docs.is_empty() {
            return Err(FitError::NoDocuments);
        }

        let counts: Vec<BTreeMap<String, usize>> = docs.iter().map(|d| term_counts(d)).collect();

        let mut corpus_tf: BTreeMap<&str, usize> = BTreeMap::new();
        let mut df: HashMap<&str, usize> = HashMap::new();
        for doc in &counts {
            for (term, n) in doc {
                *corpus_tf.entry(term.as_str()).or_default() += n;
                *df.entry(term.as_str()).or_default() += 1;
            }
        }
        if corpus_tf.is_empty() {
            return Err(FitError::EmptyVocabulary);
        }

        // BTreeMap iterates alphabetically; the stable sort keeps that order among ties.
        let mut ranked: Vec<(&str, usize)> = corpus_tf.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        if max_features > 0 {
            ranked.truncate(max_features);
        }
        let mut vocabulary: Vec<String> = ranked.iter().map(|(t, _)| t.to_string()).collect();
        vocabulary.sort();

        let n = docs.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|t| {
                let d = df.get(t.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + d)).ln() + 1.0
            })
            .collect();

        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i))
            .collect();

        let rows = counts
            .iter()
            .map(|doc| {
                let mut row: SparseVector = doc
                    .iter()
                    .filter_map(|(term, &c)| {
                        index.get(term.as_str()).map(|&i| (i, c as f64 * idf[i]))
                    })
                    .collect();
                row.sort_by_key(|&(i, _)| i);
                normalize(&mut row);
                row
            })
            .collect();

        Ok((TfidfModel { vocabulary }, rows))
    }
}

/// Lower-cased word tokens of two or more characters, stop words removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

fn term_counts(text: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_default() += 1;
    }
    counts
}

fn normalize(row: &mut SparseVector) {
    let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in row.iter_mut() {
            *w /= norm;
        }
    }
}

/// Cosine similarity of two index-sorted sparse rows; 0 if either is all-zero.
pub fn cosine(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let norm_a = a.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let (mut i, mut j, mut dot) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot / (norm_a * norm_b)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn tokenizer_drops_short_tokens_and_stop_words() {
        assert_eq!(
            tokenize("The Day-1 plan: a 3 day TRIP to Nice!"),
            vec!["day", "plan", "day", "trip", "nice"]
        );
    }

    #[test]
    fn smoothed_idf() {
        let (model, rows) = TfidfModel::fit_transform(&["apple banana", "apple cherry"], 0).unwrap();
        assert_eq!(model.vocabulary, vec!["apple", "banana", "cherry"]);
        // idf(apple) = ln(3/3) + 1 = 1, idf(banana) = ln(3/2) + 1
        let (apple, banana) = (rows[0][0], rows[0][1]);
        assert_eq!((apple.0, banana.0), (0, 1));
        assert!((banana.1 / apple.1 - (1.5f64.ln() + 1.0)).abs() < EPS);
        assert!(rows[1].iter().all(|&(i, _)| i != 1));
    }

    #[test]
    fn rows_are_unit_length() {
        let (_, rows) =
            TfidfModel::fit_transform(&["hotel beach hotel", "museum tour", "beach"], 0).unwrap();
        for row in &rows {
            let norm: f64 = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn max_features_keeps_most_frequent() {
        let docs = ["beach beach beach hotel hotel museum", "beach zebra"];
        let (model, rows) = TfidfModel::fit_transform(&docs, 2).unwrap();
        assert_eq!(model.vocabulary, vec!["beach", "hotel"]);
        // "zebra" fell out, second doc only keeps "beach"
        assert_eq!(rows[1].len(), 1);
    }

    #[test]
    fn ties_go_to_lexicographically_smaller_term() {
        let (model, _) = TfidfModel::fit_transform(&["pear apple mango"], 2).unwrap();
        assert_eq!(model.vocabulary, vec!["apple", "mango"]);
    }

    #[test]
    fn empty_vocabulary_is_an_error() {
        let err = TfidfModel::fit_transform(&["the and of", "a an"], 1000).unwrap_err();
        assert_eq!(err, FitError::EmptyVocabulary);
        let err = TfidfModel::fit_transform(&[], 1000).unwrap_err();
        assert_eq!(err, FitError::NoDocuments);
    }

    #[test]
    fn cosine_bounds() {
        let (_, rows) =
            TfidfModel::fit_transform(&["trip planning guide", "trip planning guide", "kitchen safety"], 0)
                .unwrap();
        assert!((cosine(&rows[0], &rows[1]) - 1.0).abs() < EPS);
        assert_eq!(cosine(&rows[0], &rows[2]), 0.0);
        assert_eq!(cosine(&rows[0], &[]), 0.0);
    }

    #[test]
    fn refit_is_bit_identical() {
        let docs = ["castles and vineyards of the south", "vineyards tour", "south coast beaches"];
        let (_, a) = TfidfModel::fit_transform(&docs, 1000).unwrap();
        let (_, b) = TfidfModel::fit_transform(&docs, 1000).unwrap();
        assert_eq!(a, b);
    }
}
