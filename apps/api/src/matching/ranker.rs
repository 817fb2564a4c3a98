//! Ranking pipeline: tokenize every document, weight them against one shared
//! corpus, and order postings by cosine similarity to the candidate's skills.
//!
//! The corpus is the query plus whatever the `PostingSource` returned for this
//! request. Filters are part of the fetch, so they always shape the IDF weights.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::matching::frequency::{inverse_document_frequency, term_frequency};
use crate::matching::tokenizer::{tokenize, tokenize_skills};
use crate::matching::vector::{cosine_similarity, tfidf_vector};
use crate::models::job::{Posting, PostingFilter, RankedPosting};

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Posting source failed: {0}")]
    DataSource(#[from] sqlx::Error),
}

/// Supplies the postings considered by one match request.
#[async_trait]
pub trait PostingSource: Send + Sync {
    async fn fetch_postings(&self, filter: &PostingFilter) -> Result<Vec<Posting>, sqlx::Error>;
}

#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Drop postings whose similarity is exactly 0.
    pub filter_zero: bool,
    pub filter: PostingFilter,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            filter_zero: true,
            filter: PostingFilter::default(),
        }
    }
}

/// Validates the query, fetches postings and ranks them.
///
/// A blank query fails before the source is touched. A source failure is
/// returned as `MatchError::DataSource`, never as an empty ranking.
pub async fn match_jobs<S>(
    query_skills: &str,
    source: &S,
    options: &MatchOptions,
) -> Result<Vec<RankedPosting>, MatchError>
where
    S: PostingSource + ?Sized,
{
    if query_skills.trim().is_empty() {
        return Err(MatchError::InvalidInput(
            "skills must be a non-empty string".to_string(),
        ));
    }

    let postings = source.fetch_postings(&options.filter).await?;
    Ok(rank_postings(query_skills, postings, options.filter_zero))
}

/// Scores `postings` against `query_skills` and sorts them by descending
/// similarity. The sort is stable, so equal scores keep their fetch order.
pub fn rank_postings(
    query_skills: &str,
    postings: Vec<Posting>,
    filter_zero: bool,
) -> Vec<RankedPosting> {
    let query_doc = tokenize_skills(query_skills);
    let posting_docs: Vec<Vec<String>> = postings
        .iter()
        .map(|p| tokenize(&p.scoring_text()))
        .collect();

    let mut corpus = Vec::with_capacity(posting_docs.len() + 1);
    corpus.push(query_doc);
    corpus.extend(posting_docs);

    let idf = inverse_document_frequency(&corpus);
    let query_vec = tfidf_vector(&term_frequency(&corpus[0]), &idf);

    debug!(
        postings = postings.len(),
        vocabulary = idf.len(),
        query_terms = corpus[0].len(),
        "scoring postings"
    );

    let mut ranked: Vec<RankedPosting> = postings
        .into_iter()
        .zip(&corpus[1..])
        .map(|(posting, doc)| {
            let vec = tfidf_vector(&term_frequency(doc), &idf);
            RankedPosting {
                job: posting.summary,
                similarity: cosine_similarity(&query_vec, &vec),
            }
        })
        .filter(|r| !filter_zero || r.similarity > 0.0)
        .collect();

    ranked.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

    debug!(matches = ranked.len(), "ranking complete");
    ranked
}
