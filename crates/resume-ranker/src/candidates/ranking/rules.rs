use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::super::domain::CandidateRecord;
use super::{ScoreComponent, ScoreFactor};

pub(crate) const EXPERIENCE_POINTS_PER_YEAR: u32 = 4;
pub(crate) const EXPERIENCE_CAP: u8 = 40;
pub(crate) const SKILL_POINTS_EACH: usize = 3;
pub(crate) const SKILLS_CAP: u8 = 30;

/// Education tier recognised by the scoring rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Doctorate,
    Master,
    Bachelor,
    Unrecognized,
}

impl EducationLevel {
    /// Highest tier whose pattern appears in `label`, checked doctorate first.
    pub fn classify(label: &str) -> Self {
        if doctorate().is_match(label) {
            Self::Doctorate
        } else if master().is_match(label) {
            Self::Master
        } else if bachelor().is_match(label) {
            Self::Bachelor
        } else {
            Self::Unrecognized
        }
    }

    pub fn points(self) -> u8 {
        match self {
            Self::Doctorate => 30,
            Self::Master => 20,
            Self::Bachelor => 10,
            Self::Unrecognized => 0,
        }
    }
}

fn doctorate() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| Regex::new(r"(?i)PhD|Doctorate").expect("doctorate pattern compiles"))
}

fn master() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| {
        Regex::new(r"(?i)Master|M\.?S\.?|M\.?A\.?").expect("master pattern compiles")
    })
}

fn bachelor() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| {
        Regex::new(r"(?i)Bachelor|B\.?S\.?|B\.?A\.?").expect("bachelor pattern compiles")
    })
}

pub(crate) fn experience_points(experience: Option<u32>) -> u8 {
    match experience {
        Some(years) => years
            .saturating_mul(EXPERIENCE_POINTS_PER_YEAR)
            .min(u32::from(EXPERIENCE_CAP)) as u8,
        None => 0,
    }
}

pub(crate) fn skills_points(skill_count: usize) -> u8 {
    skill_count
        .saturating_mul(SKILL_POINTS_EACH)
        .min(usize::from(SKILLS_CAP)) as u8
}

pub(crate) fn score_record(record: &CandidateRecord) -> (Vec<ScoreComponent>, u8) {
    let mut components = Vec::with_capacity(3);

    let experience = experience_points(record.experience);
    components.push(ScoreComponent {
        factor: ScoreFactor::Experience,
        score: experience,
        notes: match record.experience {
            Some(years) => format!("{years} year(s) of experience"),
            None => "experience not stated".to_string(),
        },
    });

    let level = EducationLevel::classify(&record.education);
    components.push(ScoreComponent {
        factor: ScoreFactor::Education,
        score: level.points(),
        notes: format!("education '{}' read as {:?}", record.education, level),
    });

    let skills = skills_points(record.skills.len());
    components.push(ScoreComponent {
        factor: ScoreFactor::Skills,
        score: skills,
        notes: format!("{} recognised skill(s)", record.skills.len()),
    });

    let total = experience + level.points() + skills;
    (components, total)
}
