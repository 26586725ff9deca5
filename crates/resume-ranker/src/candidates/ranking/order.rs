use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::super::domain::{CandidateRecord, UnknownVariant};

/// Key a ranking is ordered by; every key sorts descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Score,
    Experience,
    Education,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Score => "score",
            SortKey::Experience => "experience",
            SortKey::Education => "education",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "score" => Ok(Self::Score),
            "experience" => Ok(Self::Experience),
            "education" => Ok(Self::Education),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Ordinal used when sorting by education, read from the label's first word.
///
/// Abbreviated labels such as `B.S.` map to 0 here even though the scoring
/// rubric credits them.
pub fn education_tier(label: &str) -> u8 {
    match label.split_whitespace().next() {
        Some("PhD") => 3,
        Some("Master") => 2,
        Some("Bachelor") => 1,
        _ => 0,
    }
}

/// Stable, descending reorder by `key`. Ties keep their current relative order.
pub(crate) fn sort_candidates(candidates: &mut [CandidateRecord], key: SortKey) {
    match key {
        SortKey::Score => candidates.sort_by_key(|record| Reverse(record.score)),
        SortKey::Experience => {
            candidates.sort_by_key(|record| Reverse(record.experience_years()))
        }
        SortKey::Education => {
            candidates.sort_by_key(|record| Reverse(education_tier(&record.education)))
        }
    }
}
