use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{CandidateId, CandidateRecord};
use super::ranking::{Ranking, ScoreBand, SortKey};

const NOT_SPECIFIED: &str = "Not specified";
const TOP_CANDIDATE_COUNT: usize = 3;

/// Short description of a record created by an ingest call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSummary {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub experience: Option<u32>,
    pub education: String,
    pub source_file_name: String,
}

impl From<&CandidateRecord> for CandidateSummary {
    fn from(record: &CandidateRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            skills: record.skills.clone(),
            experience: record.experience,
            education: record.education.clone(),
            source_file_name: record.source_file_name.clone(),
        }
    }
}

/// One row of a ranking table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCandidateView {
    pub rank: usize,
    pub id: CandidateId,
    pub name: String,
    pub score: u8,
    pub score_band: ScoreBand,
    pub experience: String,
    pub education: String,
    pub skills: Vec<String>,
    pub top_candidate: bool,
}

impl RankedCandidateView {
    fn new(rank: usize, record: &CandidateRecord, top_candidate: bool) -> Self {
        Self {
            rank,
            id: record.id.clone(),
            name: record.name.clone(),
            score: record.score,
            score_band: ScoreBand::from_score(record.score),
            experience: record.experience_label(),
            education: record.education.clone(),
            skills: record.skills.clone(),
            top_candidate,
        }
    }
}

/// Ranking table plus the ordering and query that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingView {
    pub sort: SortKey,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub candidates: Vec<RankedCandidateView>,
}

impl RankingView {
    /// Full table; the first rows are flagged as top candidates.
    pub fn from_ranking(ranking: &Ranking) -> Self {
        let candidates = ranking
            .candidates()
            .iter()
            .enumerate()
            .map(|(index, record)| {
                RankedCandidateView::new(index + 1, record, index < TOP_CANDIDATE_COUNT)
            })
            .collect::<Vec<_>>();

        Self {
            sort: ranking.sort_key(),
            count: candidates.len(),
            query: None,
            candidates,
        }
    }

    /// Filtered table; rows are renumbered and never flagged.
    pub fn from_matches(ranking: &Ranking, query: &str, matches: &[&CandidateRecord]) -> Self {
        let candidates = matches
            .iter()
            .enumerate()
            .map(|(index, record)| RankedCandidateView::new(index + 1, record, false))
            .collect::<Vec<_>>();

        Self {
            sort: ranking.sort_key(),
            count: candidates.len(),
            query: Some(query.to_string()),
            candidates,
        }
    }
}

/// Everything shown when a single candidate is opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateDetailView {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub score: u8,
    pub score_band: ScoreBand,
    pub experience: String,
    pub education: String,
    pub skills: Vec<String>,
    pub source_file_name: String,
    pub ingested_at: DateTime<Utc>,
    pub preview: String,
}

impl CandidateDetailView {
    pub fn from_record(record: &CandidateRecord, preview_chars: usize) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            email: or_not_specified(&record.email),
            phone: or_not_specified(&record.phone),
            score: record.score,
            score_band: ScoreBand::from_score(record.score),
            experience: record.experience_label(),
            education: record.education.clone(),
            skills: record.skills.clone(),
            source_file_name: record.source_file_name.clone(),
            ingested_at: record.ingested_at,
            preview: record.preview(preview_chars),
        }
    }
}

fn or_not_specified(value: &str) -> String {
    if value.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        value.to_string()
    }
}
