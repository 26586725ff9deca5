mod patterns;
mod vocabulary;

pub use vocabulary::SKILL_VOCABULARY;

use std::str::FromStr;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, CandidateRecord, UnknownVariant};

/// What to record when a document never states its years of experience.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceFallback {
    /// Leave experience unset; it contributes nothing to the score.
    #[default]
    NotStated,
    /// Draw a value in `1..=10`, matching the behavior of the legacy screener.
    LegacyRandom,
}

impl FromStr for ExperienceFallback {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "not_stated" | "none" | "unknown" => Ok(Self::NotStated),
            "legacy_random" | "random" => Ok(Self::LegacyRandom),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Heuristic, pattern-driven conversion of résumé text into a candidate record.
///
/// Extraction never fails: every field has a well-defined fallback when its
/// pattern finds nothing.
#[derive(Debug, Clone, Default)]
pub struct FieldExtractor {
    fallback: ExperienceFallback,
}

impl FieldExtractor {
    pub fn new(fallback: ExperienceFallback) -> Self {
        Self { fallback }
    }

    pub fn extract(&self, raw_text: &str, file_name: &str) -> CandidateRecord {
        let experience = patterns::detect_experience(raw_text).or_else(|| match self.fallback {
            ExperienceFallback::NotStated => None,
            ExperienceFallback::LegacyRandom => Some(rand::thread_rng().gen_range(1..=10)),
        });

        CandidateRecord {
            id: CandidateId::generate(),
            name: patterns::detect_name(raw_text, file_name),
            email: patterns::detect_email(raw_text),
            phone: patterns::detect_phone(raw_text),
            skills: vocabulary::detect_skills(raw_text),
            experience,
            education: patterns::detect_education(raw_text),
            source_text: raw_text.to_string(),
            source_file_name: file_name.to_string(),
            score: 0,
            ingested_at: Utc::now(),
        }
    }
}

/// Extract with the default "not stated" experience policy.
pub fn extract(raw_text: &str, file_name: &str) -> CandidateRecord {
    FieldExtractor::default().extract(raw_text, file_name)
}
