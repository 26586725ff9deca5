use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label stored when no education pattern matches.
pub const UNKNOWN_EDUCATION: &str = "Unknown";

/// Opaque identifier assigned to every ingested candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured representation of one parsed résumé.
///
/// Everything except `score` is fixed at extraction time; `score` starts at
/// zero and is replaced by every ranking pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    /// Years of experience; `None` when the document never states a number.
    pub experience: Option<u32>,
    pub education: String,
    pub source_text: String,
    pub source_file_name: String,
    pub score: u8,
    pub ingested_at: DateTime<Utc>,
}

impl CandidateRecord {
    /// Experience used for scoring and ordering, with "not stated" counting as zero.
    pub fn experience_years(&self) -> u32 {
        self.experience.unwrap_or(0)
    }

    pub fn experience_label(&self) -> String {
        match self.experience {
            Some(1) => "1 year".to_string(),
            Some(years) => format!("{years} years"),
            None => "Not stated".to_string(),
        }
    }

    /// Case-insensitive containment check against name, skills, and education.
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(needle))
            || self.education.to_lowercase().contains(needle)
    }

    /// Leading slice of the source text, cut on a character boundary.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut chars = self.source_text.char_indices();
        match chars.nth(max_chars) {
            Some((cut, _)) => format!("{}...", &self.source_text[..cut]),
            None => self.source_text.clone(),
        }
    }
}

/// Text handed over by the upstream extraction step for a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    pub file_name: String,
    pub text: String,
}

impl SourceDocument {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
        }
    }
}

/// Upstream report that a document could not be turned into text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("could not extract text from {file_name}: {reason}")]
pub struct ExtractionFailure {
    pub file_name: String,
    pub reason: String,
}

impl ExtractionFailure {
    pub fn new(file_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            reason: reason.into(),
        }
    }
}

/// Wire form of a batch entry: either extracted `text` or an upstream `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSubmission {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentSubmission {
    pub fn into_result(self) -> Result<SourceDocument, ExtractionFailure> {
        match (self.text, self.error) {
            (_, Some(reason)) => Err(ExtractionFailure::new(self.file_name, reason)),
            (Some(text), None) => Ok(SourceDocument::new(self.file_name, text)),
            (None, None) => Err(ExtractionFailure::new(
                self.file_name,
                "no extracted text supplied",
            )),
        }
    }
}

/// Returned when a textual setting does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized value '{0}'")]
pub struct UnknownVariant(pub String);
