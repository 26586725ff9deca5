use std::io::Write;

use serde::Serialize;

use super::ranking::Ranking;

/// Suggested download name for exported rankings.
pub const EXPORT_FILE_NAME: &str = "resume_rankings.csv";

const HEADER: [&str; 6] = ["Rank", "Name", "Score", "Experience", "Education", "Skills"];

/// Flattened ranking row, one per candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub rank: usize,
    pub name: String,
    pub score: u8,
    pub experience: String,
    pub education: String,
    pub skills: String,
}

pub fn export_rows(ranking: &Ranking) -> Vec<ExportRow> {
    ranking
        .candidates()
        .iter()
        .enumerate()
        .map(|(index, record)| ExportRow {
            rank: index + 1,
            name: record.name.clone(),
            score: record.score,
            experience: record.experience_label(),
            education: record.education.clone(),
            skills: record.skills.join(", "),
        })
        .collect()
}

/// Write the ranking as CSV. Fields are quoted only when they contain a
/// delimiter, quote, or line break, and embedded quotes are doubled.
pub fn write_csv<W: Write>(ranking: &Ranking, writer: W) -> Result<W, ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for row in export_rows(ranking) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;

    csv_writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))
}

pub fn to_csv_string(ranking: &Ranking) -> Result<String, ExportError> {
    let buffer = write_csv(ranking, Vec::new())?;
    Ok(String::from_utf8(buffer)?)
}

/// Error raised while encoding an export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("export write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("export is not valid utf-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
