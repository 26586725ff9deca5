use std::sync::OnceLock;

use regex::Regex;

use super::super::domain::UNKNOWN_EDUCATION;

const UNNAMED_CANDIDATE: &str = "Unnamed Candidate";

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in extraction pattern compiles"))
}

fn leading_name() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, r"^([A-Z][a-z]+ [A-Z][a-z]+)")
}

fn any_name() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, r"([A-Z][a-z]+ [A-Z][a-z]+)")
}

fn email() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, r"(?i)[a-z0-9._-]+@[a-z0-9.-]+\.[a-z]{2,}")
}

fn phone() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, r"(\+[0-9]{1,2}\s?)?(\([0-9]{3}\)|[0-9]{3})[\s.-]?[0-9]{3}[\s.-]?[0-9]{4}")
}

fn years_mention() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, r"(?i)([0-9]+)\+?\s*(?:years?|yrs?)")
}

fn experience_label() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(&CELL, r"(?i)experience:\s*([0-9]+)")
}

fn education() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    compiled(
        &CELL,
        r"Bachelor|Master|PhD|B\.?S\.?|M\.?S\.?|B\.?A\.?|M\.?A\.?",
    )
}

pub(crate) fn detect_name(text: &str, file_name: &str) -> String {
    let matched = leading_name()
        .find(text)
        .or_else(|| any_name().find(text))
        .map(|found| found.as_str().trim().to_string());

    match matched {
        Some(name) => name,
        None => name_from_file(file_name),
    }
}

/// File name without directories or extension, underscores read as spaces.
pub(crate) fn name_from_file(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let stem = match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => base,
    };
    let name = stem.replace('_', " ").trim().to_string();

    if name.is_empty() {
        UNNAMED_CANDIDATE.to_string()
    } else {
        name
    }
}

pub(crate) fn detect_email(text: &str) -> String {
    email()
        .find(text)
        .map(|found| found.as_str().to_string())
        .unwrap_or_default()
}

pub(crate) fn detect_phone(text: &str) -> String {
    phone()
        .find(text)
        .map(|found| found.as_str().to_string())
        .unwrap_or_default()
}

/// First explicit number of years, if the text states one.
pub(crate) fn detect_experience(text: &str) -> Option<u32> {
    years_mention()
        .captures(text)
        .or_else(|| experience_label().captures(text))
        .and_then(|captures| captures.get(1))
        .map(|digits| digits.as_str().parse::<u32>().unwrap_or(u32::MAX))
}

pub(crate) fn detect_education(text: &str) -> String {
    education()
        .find(text)
        .map(|found| found.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN_EDUCATION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_prefers_leading_capitalised_pair() {
        assert_eq!(
            detect_name("Ada Lovelace worked with Charles Babbage", "x.pdf"),
            "Ada Lovelace"
        );
    }

    #[test]
    fn name_falls_back_to_pair_anywhere() {
        assert_eq!(
            detect_name("resume of grace hopper, Grace Hopper", "x.pdf"),
            "Grace Hopper"
        );
    }

    #[test]
    fn name_falls_back_to_file_name() {
        assert_eq!(detect_name("no names here", "jane_doe.pdf"), "jane doe");
        assert_eq!(
            name_from_file("uploads/2024/alan_turing.final.pdf"),
            "alan turing.final"
        );
        assert_eq!(name_from_file("README"), "README");
        assert_eq!(name_from_file(".pdf"), ".pdf");
        assert_eq!(name_from_file("___.pdf"), UNNAMED_CANDIDATE);
        assert_eq!(name_from_file(""), UNNAMED_CANDIDATE);
    }

    #[test]
    fn email_requires_alphabetic_top_level_domain() {
        assert_eq!(
            detect_email("Reach me: Jane.Doe@Mail.Example.ORG today"),
            "Jane.Doe@Mail.Example.ORG"
        );
        assert_eq!(detect_email("build@host.42"), "");
    }

    #[test]
    fn phone_accepts_common_north_american_shapes() {
        assert_eq!(detect_phone("call (555) 123-4567"), "(555) 123-4567");
        assert_eq!(detect_phone("call +1 555.123.4567 now"), "+1 555.123.4567");
        assert_eq!(detect_phone("call 5551234567"), "5551234567");
        assert_eq!(detect_phone("call 555-12"), "");
    }

    #[test]
    fn phone_ignores_non_ascii_digits() {
        assert_eq!(detect_phone("هاتف ٥٥٥-١٢٣-٤٥٦٧"), "");
        assert_eq!(detect_phone("call ５５５-１２３-４５６７"), "");
    }

    #[test]
    fn experience_reads_years_before_label() {
        assert_eq!(detect_experience("over 7+ yrs in ops"), Some(7));
        assert_eq!(detect_experience("Experience: 12"), Some(12));
        assert_eq!(detect_experience("3 Years leading teams, experience: 9"), Some(3));
        assert_eq!(detect_experience("seasoned professional"), None);
    }

    #[test]
    fn experience_saturates_on_overflowing_digits() {
        assert_eq!(
            detect_experience("99999999999999999999 years"),
            Some(u32::MAX)
        );
    }

    #[test]
    fn education_takes_leftmost_match() {
        assert_eq!(detect_education("PhD in Physics, Bachelor of Arts"), "PhD");
        assert_eq!(detect_education("Bachelor of Science then PhD"), "Bachelor");
        assert_eq!(detect_education("M.S. Computer Science"), "M.S.");
        assert_eq!(detect_education("self taught"), UNKNOWN_EDUCATION);
    }
}
