/// Closed list of skill labels the extractor recognises, in reporting order.
pub const SKILL_VOCABULARY: [&str; 17] = [
    "JavaScript",
    "Python",
    "Java",
    "C++",
    "HTML",
    "CSS",
    "React",
    "Node.js",
    "SQL",
    "Git",
    "AWS",
    "Docker",
    "Machine Learning",
    "Data Analysis",
    "Project Management",
    "Agile",
    "Leadership",
];

/// Every vocabulary entry contained anywhere in `text`, ignoring case.
///
/// Plain substring containment: "Java" is also found inside "JavaScript".
pub(crate) fn detect_skills(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| haystack.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}
