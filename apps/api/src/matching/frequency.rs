use std::collections::{HashMap, HashSet};

/// Normalized term frequency: occurrences of each term divided by document length.
///
/// An empty document has no terms and yields an empty map.
pub fn term_frequency(tokens: &[String]) -> HashMap<String, f64> {
    let mut counts: HashMap<String, f64> = HashMap::new();
    for token in tokens {
        *counts.entry(token.clone()).or_insert(0.0) += 1.0;
    }

    if tokens.is_empty() {
        return counts;
    }

    let total = tokens.len() as f64;
    for value in counts.values_mut() {
        *value /= total;
    }
    counts
}

/// Corpus-wide inverse document frequency together with the vocabulary it was
/// computed over.
///
/// The vocabulary is kept in order of first discovery, and every TF-IDF vector
/// built against this `Idf` uses that order for its dimensions.
#[derive(Debug, Clone, Default)]
pub struct Idf {
    vocabulary: Vec<String>,
    weights: HashMap<String, f64>,
}

impl Idf {
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Weight of `term`, or 0 for a term outside the corpus.
    pub fn get(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }
}

/// Smoothed IDF over `docs`: `ln((N + 1) / (df + 1)) + 1`.
///
/// `df` counts documents containing the term at least once, so the weight is
/// strictly positive even for a term present in every document.
pub fn inverse_document_frequency(docs: &[Vec<String>]) -> Idf {
    let mut vocabulary: Vec<String> = Vec::new();
    let mut document_frequency: HashMap<&str, usize> = HashMap::new();

    for doc in docs {
        let mut seen: HashSet<&str> = HashSet::new();
        for term in doc {
            if !seen.insert(term.as_str()) {
                continue;
            }
            let df = document_frequency.entry(term.as_str()).or_insert(0);
            if *df == 0 {
                vocabulary.push(term.clone());
            }
            *df += 1;
        }
    }

    let n = docs.len() as f64;
    let weights = vocabulary
        .iter()
        .map(|term| {
            let df = document_frequency[term.as_str()] as f64;
            (term.clone(), ((n + 1.0) / (df + 1.0)).ln() + 1.0)
        })
        .collect();

    Idf {
        vocabulary,
        weights,
    }
}
