// TF-IDF job matcher. Stateless: every request builds its own corpus,
// vocabulary and weights, and nothing survives the call.

pub mod frequency;
pub mod ranker;
pub mod tokenizer;
pub mod vector;

pub use ranker::{match_jobs, MatchError, MatchOptions, PostingSource};
