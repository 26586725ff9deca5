mod order;
mod rules;

pub use order::{education_tier, SortKey};
pub use rules::EducationLevel;

use serde::{Deserialize, Serialize};

use super::domain::CandidateRecord;

/// Stateless scorer applying the fixed additive rubric.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingEngine;

impl RankingEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, record: &CandidateRecord) -> ScoreBreakdown {
        let (components, total) = rules::score_record(record);
        ScoreBreakdown { total, components }
    }

    /// Score every record and order them by descending score.
    ///
    /// The sort is stable, so tied records keep their input order.
    pub fn rank(&self, records: Vec<CandidateRecord>) -> Ranking {
        let mut candidates = records;
        for record in &mut candidates {
            record.score = self.score(record).total;
        }
        order::sort_candidates(&mut candidates, SortKey::Score);

        Ranking {
            candidates,
            sort_key: SortKey::Score,
        }
    }
}

/// Rubric dimension a component was scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Experience,
    Education,
    Skills,
}

/// Discrete contribution to a total, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub score: u8,
    pub notes: String,
}

/// Composite score with the per-factor trail that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: u8,
    pub components: Vec<ScoreComponent>,
}

impl ScoreBreakdown {
    pub fn component(&self, factor: ScoreFactor) -> u8 {
        self.components
            .iter()
            .find(|component| component.factor == factor)
            .map(|component| component.score)
            .unwrap_or(0)
    }
}

/// Coarse grouping of a total used when presenting a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            Self::High
        } else if score < 50 {
            Self::Low
        } else {
            Self::Medium
        }
    }
}

/// Scored candidates in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ranking {
    candidates: Vec<CandidateRecord>,
    sort_key: SortKey,
}

impl Ranking {
    pub fn candidates(&self) -> &[CandidateRecord] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Reorder without touching scores.
    pub fn reorder(&mut self, key: SortKey) {
        order::sort_candidates(&mut self.candidates, key);
        self.sort_key = key;
    }

    pub fn sorted_by(mut self, key: SortKey) -> Self {
        self.reorder(key);
        self
    }

    /// Read-only view of the records whose name, skills, or education
    /// contain `query`, ignoring case. Surrounding whitespace is part of the
    /// needle; a blank query keeps everything.
    pub fn filter(&self, query: &str) -> FilterOutcome<'_> {
        if query.trim().is_empty() {
            return FilterOutcome::Matches(self.candidates.iter().collect());
        }

        let needle = query.to_lowercase();
        let matches: Vec<&CandidateRecord> = self
            .candidates
            .iter()
            .filter(|record| record.matches_lowercase(&needle))
            .collect();

        if matches.is_empty() {
            FilterOutcome::NoMatches
        } else {
            FilterOutcome::Matches(matches)
        }
    }
}

/// Result of filtering a ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome<'a> {
    Matches(Vec<&'a CandidateRecord>),
    NoMatches,
}
