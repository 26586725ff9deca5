use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{CandidateId, CandidateRecord, ExtractionFailure, SourceDocument};
use super::export::{self, ExportError};
use super::extraction::FieldExtractor;
use super::ranking::{Ranking, RankingEngine, SortKey};
use super::repository::{CandidateRepository, RepositoryError};
use super::views::CandidateSummary;
use crate::config::RankingSettings;

/// Service composing the extractor, ranking engine, and candidate store.
pub struct CandidateService<R> {
    repository: Arc<R>,
    extractor: FieldExtractor,
    engine: RankingEngine,
    settings: RankingSettings,
}

impl<R> CandidateService<R>
where
    R: CandidateRepository + 'static,
{
    pub fn new(repository: Arc<R>, settings: RankingSettings) -> Self {
        Self {
            repository,
            extractor: FieldExtractor::new(settings.experience_fallback),
            engine: RankingEngine::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &RankingSettings {
        &self.settings
    }

    /// Extract and store every readable document in the batch.
    ///
    /// Upstream failures and failed inserts are skipped and reported; they
    /// never abort the batch. An error is returned only when a store failure
    /// left nothing stored.
    pub fn ingest<I>(&self, documents: I) -> Result<IngestReport, CandidateServiceError>
    where
        I: IntoIterator<Item = Result<SourceDocument, ExtractionFailure>>,
    {
        let mut report = IngestReport::default();
        let mut store_error = None;

        for document in documents {
            match document {
                Ok(document) => {
                    let record = self.extractor.extract(&document.text, &document.file_name);
                    debug!(
                        candidate_id = %record.id,
                        file_name = %document.file_name,
                        skills = record.skills.len(),
                        experience = ?record.experience,
                        "extracted candidate fields"
                    );
                    match self.repository.insert(record) {
                        Ok(stored) => report.candidates.push(CandidateSummary::from(&stored)),
                        Err(err) => {
                            warn!(
                                file_name = %document.file_name,
                                error = %err,
                                "candidate could not be stored"
                            );
                            report.skipped_documents.push(ExtractionFailure::new(
                                document.file_name,
                                format!("store unavailable: {err}"),
                            ));
                            if store_error.is_none() {
                                store_error = Some(err);
                            }
                        }
                    }
                }
                Err(failure) => {
                    warn!(
                        file_name = %failure.file_name,
                        reason = %failure.reason,
                        "skipping unreadable document"
                    );
                    report.skipped_documents.push(failure);
                }
            }
        }

        report.processed = report.candidates.len();
        report.skipped = report.skipped_documents.len();

        if report.processed == 0 {
            if let Some(err) = store_error {
                return Err(err.into());
            }
        }

        info!(
            processed = report.processed,
            skipped = report.skipped,
            "candidate ingest finished"
        );
        Ok(report)
    }

    /// Score a snapshot of the store and order it by `sort`.
    ///
    /// Fresh scores are written back so later lookups report them.
    pub fn rank(&self, sort: SortKey) -> Result<RankingOutcome, CandidateServiceError> {
        let snapshot = self.repository.snapshot()?;
        if snapshot.is_empty() {
            return Ok(RankingOutcome::NoCandidates);
        }

        let ranking = self.engine.rank(snapshot);
        for record in ranking.candidates() {
            match self.repository.update(record.clone()) {
                Ok(()) => {}
                Err(RepositoryError::NotFound) => {
                    debug!(candidate_id = %record.id, "candidate removed while ranking");
                }
                Err(err) => return Err(err.into()),
            }
        }

        let ranking = ranking.sorted_by(sort);
        info!(count = ranking.len(), %sort, "ranked candidates");
        Ok(RankingOutcome::Ranked(ranking))
    }

    /// CSV rendering of the current ranking, or `None` when nothing is stored.
    pub fn export_csv(&self, sort: SortKey) -> Result<Option<String>, CandidateServiceError> {
        match self.rank(sort)? {
            RankingOutcome::Ranked(ranking) => Ok(Some(export::to_csv_string(&ranking)?)),
            RankingOutcome::NoCandidates => Ok(None),
        }
    }

    pub fn get(&self, id: &CandidateId) -> Result<CandidateRecord, CandidateServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Remove a candidate permanently, returning the removed record.
    pub fn delete(&self, id: &CandidateId) -> Result<CandidateRecord, CandidateServiceError> {
        let removed = self.repository.remove(id)?;
        info!(candidate_id = %removed.id, "candidate deleted");
        Ok(removed)
    }
}

/// Partial-success summary of an ingest call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub processed: usize,
    pub skipped: usize,
    pub candidates: Vec<CandidateSummary>,
    pub skipped_documents: Vec<ExtractionFailure>,
}

impl IngestReport {
    pub fn message(&self) -> String {
        format!(
            "{} file(s) processed, {} skipped",
            self.processed, self.skipped
        )
    }
}

/// Ranking result, distinguishing "nothing stored" from an actual ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingOutcome {
    NoCandidates,
    Ranked(Ranking),
}

/// Error raised by the candidate service.
#[derive(Debug, thiserror::Error)]
pub enum CandidateServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
