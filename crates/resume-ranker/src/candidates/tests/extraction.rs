use super::common::*;
use crate::candidates::domain::UNKNOWN_EDUCATION;
use crate::candidates::extraction::{ExperienceFallback, FieldExtractor, SKILL_VOCABULARY};
use crate::candidates::extract;

#[test]
fn extractor_reads_reference_scenario() {
    let record = extract(SCENARIO_TEXT, "john_smith.pdf");

    assert_eq!(record.name, "John Smith");
    assert_eq!(record.email, "john.smith@example.com");
    assert_eq!(record.phone, "(555) 123-4567");
    assert_eq!(record.experience, Some(5));
    assert_eq!(record.education, "Bachelor");
    assert_eq!(record.skills, vec!["Python".to_string(), "Docker".to_string()]);
    assert_eq!(record.score, 0);
    assert_eq!(record.source_text, SCENARIO_TEXT);
    assert_eq!(record.source_file_name, "john_smith.pdf");
}

#[test]
fn extractor_degrades_gracefully_on_empty_text() {
    let record = extract("", "maria_garcia_resume.pdf");

    assert_eq!(record.name, "maria garcia resume");
    assert!(record.email.is_empty());
    assert!(record.phone.is_empty());
    assert!(record.skills.is_empty());
    assert_eq!(record.experience, None);
    assert_eq!(record.education, UNKNOWN_EDUCATION);
    assert_eq!(record.score, 0);
}

#[test]
fn extractor_never_returns_an_empty_name() {
    for (text, file_name) in [("", ""), ("   ", ".pdf"), ("lowercase only", "__.pdf")] {
        let record = extract(text, file_name);
        assert!(!record.name.trim().is_empty(), "empty name for {file_name:?}");
        assert_eq!(record.score, 0);
    }
}

#[test]
fn skills_follow_vocabulary_order_not_document_order() {
    let forwards = extract("leadership, docker and PYTHON", "a.pdf");
    let backwards = extract("python docker LEADERSHIP", "b.pdf");

    let expected = vec![
        "Python".to_string(),
        "Docker".to_string(),
        "Leadership".to_string(),
    ];
    assert_eq!(forwards.skills, expected);
    assert_eq!(backwards.skills, expected);
}

#[test]
fn skills_use_substring_containment() {
    let record = extract("Senior JavaScript engineer", "dev.pdf");
    assert_eq!(
        record.skills,
        vec!["JavaScript".to_string(), "Java".to_string()]
    );
}

#[test]
fn skills_are_idempotent_and_within_vocabulary() {
    let text = "C++ HTML CSS SQL Git AWS agile Data Analysis project management";
    let first = extract(text, "x.pdf");
    let second = extract(text, "x.pdf");

    assert_eq!(first.skills, second.skills);
    assert!(first
        .skills
        .iter()
        .all(|skill| SKILL_VOCABULARY.contains(&skill.as_str())));
    assert_eq!(first.skills.len(), 9);
}

#[test]
fn identifiers_are_unique_per_record() {
    let first = extract(SCENARIO_TEXT, "a.pdf");
    let second = extract(SCENARIO_TEXT, "a.pdf");
    assert_ne!(first.id, second.id);
}

#[test]
fn legacy_fallback_synthesizes_experience_in_range() {
    let extractor = FieldExtractor::new(ExperienceFallback::LegacyRandom);
    for _ in 0..50 {
        let record = extractor.extract("No numbers anywhere", "legacy.pdf");
        let years = record.experience.expect("legacy policy always fills experience");
        assert!((1..=10).contains(&years), "out of range: {years}");
    }
}

#[test]
fn stated_experience_wins_over_fallback_policy() {
    let extractor = FieldExtractor::new(ExperienceFallback::LegacyRandom);
    let record = extractor.extract("Experience: 14", "stated.pdf");
    assert_eq!(record.experience, Some(14));
}

#[test]
fn fallback_policy_parses_from_settings() {
    assert_eq!(
        "legacy_random".parse::<ExperienceFallback>(),
        Ok(ExperienceFallback::LegacyRandom)
    );
    assert_eq!(
        " Not_Stated ".parse::<ExperienceFallback>(),
        Ok(ExperienceFallback::NotStated)
    );
    assert!("sometimes".parse::<ExperienceFallback>().is_err());
}
