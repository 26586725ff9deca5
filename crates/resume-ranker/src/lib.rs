//! Résumé field extraction and candidate ranking.
//!
//! Raw document text flows through [`candidates::FieldExtractor`] into
//! [`candidates::CandidateRecord`]s, which the [`candidates::RankingEngine`]
//! scores and orders. The HTTP surface lives in [`candidates::candidate_router`].

pub mod candidates;
pub mod config;
pub mod error;
pub mod telemetry;
