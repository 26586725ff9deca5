//! Candidate intake, scoring, and ranking.
//!
//! Extraction turns upstream document text into [`CandidateRecord`]s; the
//! [`RankingEngine`] scores them on a fixed rubric and the
//! [`CandidateService`] ties both to a [`CandidateRepository`].

pub mod domain;
pub mod export;
pub mod extraction;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    CandidateId, CandidateRecord, DocumentSubmission, ExtractionFailure, SourceDocument,
    UnknownVariant, UNKNOWN_EDUCATION,
};
pub use export::{export_rows, to_csv_string, write_csv, ExportError, ExportRow, EXPORT_FILE_NAME};
pub use extraction::{extract, ExperienceFallback, FieldExtractor, SKILL_VOCABULARY};
pub use ranking::{
    education_tier, EducationLevel, FilterOutcome, Ranking, RankingEngine, ScoreBand,
    ScoreBreakdown, ScoreComponent, ScoreFactor, SortKey,
};
pub use repository::{CandidateRepository, InMemoryCandidateRepository, RepositoryError};
pub use router::{candidate_router, ingest_response, RankingResponse};
pub use service::{CandidateService, CandidateServiceError, IngestReport, RankingOutcome};
pub use views::{CandidateDetailView, CandidateSummary, RankedCandidateView, RankingView};
