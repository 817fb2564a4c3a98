// Job postings: publishing and editing, saved jobs, and skill matching.

pub mod handlers;
pub mod repository;
