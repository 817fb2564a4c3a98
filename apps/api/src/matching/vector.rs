use std::collections::HashMap;

use crate::matching::frequency::Idf;

/// Projects a term-frequency map onto the corpus vocabulary.
///
/// One entry per vocabulary term, in vocabulary order. Terms missing from `tf`
/// contribute 0; terms in `tf` but outside the vocabulary are ignored.
pub fn tfidf_vector(tf: &HashMap<String, f64>, idf: &Idf) -> Vec<f64> {
    idf.vocabulary()
        .iter()
        .map(|term| tf.get(term).copied().unwrap_or(0.0) * idf.get(term))
        .collect()
}

/// Cosine of the angle between `a` and `b`. Both must come from the same `Idf`.
///
/// Returns 0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "vectors built from different vocabularies");

    let (mut dot, mut mag_a, mut mag_b) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a.sqrt() * mag_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::frequency::{inverse_document_frequency, term_frequency};

    fn doc(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_vector_length_matches_vocabulary() {
        let idf = inverse_document_frequency(&[doc("a b c"), doc("d e"), doc("f")]);
        for text in ["", "a", "a b c d e f", "zzz"] {
            let v = tfidf_vector(&term_frequency(&doc(text)), &idf);
            assert_eq!(v.len(), idf.len());
        }
    }

    #[test]
    fn test_vector_positions_follow_vocabulary() {
        let idf = inverse_document_frequency(&[doc("a b"), doc("b c")]);
        let v = tfidf_vector(&term_frequency(&doc("c")), &idf);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[1], 0.0);
        assert!((v[2] - idf.get("c")).abs() < 1e-12);
    }

    #[test]
    fn test_identical_vectors_are_maximally_similar() {
        let v = vec![0.3, 0.0, 1.7, 2.2];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_orthogonal_vectors() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 2.0]), 0.0);
    }

    #[test]
    fn test_zero_vector_is_zero_not_nan() {
        let zero = vec![0.0; 3];
        let other = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&zero, &other), 0.0);
        assert_eq!(cosine_similarity(&other, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_scale_invariant() {
        let a = vec![1.0, 2.0, 0.5];
        let b: Vec<f64> = a.iter().map(|x| x * 10.0).collect();
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
    }
}
