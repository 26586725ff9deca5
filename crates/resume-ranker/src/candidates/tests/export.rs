use super::common::*;
use crate::candidates::export::{export_rows, to_csv_string};
use crate::candidates::ranking::{RankingEngine, SortKey};

#[test]
fn export_flattens_ranking_rows() {
    let ranking = RankingEngine::new().rank(vec![
        record("Alice Walker", Some(1), "Master", &["Python", "SQL"]),
        record("Bob Stone", None, "Unknown", &[]),
    ]);

    let rows = export_rows(&ranking);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].name, "Alice Walker");
    assert_eq!(rows[0].score, 30);
    assert_eq!(rows[0].experience, "1 year");
    assert_eq!(rows[0].skills, "Python, SQL");
    assert_eq!(rows[1].rank, 2);
    assert_eq!(rows[1].experience, "Not stated");
}

#[test]
fn csv_escapes_embedded_quotes_and_delimiters() {
    let ranking = RankingEngine::new().rank(vec![record(
        "Doe, \"JJ\" Jane",
        Some(3),
        "Bachelor",
        &["Git", "AWS"],
    )]);

    let csv = to_csv_string(&ranking).expect("export encodes");

    let expected = "Rank,Name,Score,Experience,Education,Skills\n\
                    1,\"Doe, \"\"JJ\"\" Jane\",28,3 years,Bachelor,\"Git, AWS\"\n";
    assert_eq!(csv, expected);
}

#[test]
fn csv_rows_follow_ranking_order() {
    let ranking = RankingEngine::new()
        .rank(vec![
            record("Scholar Person", Some(1), "PhD", &[]),
            record("Veteran Person", Some(9), "Unknown", &[]),
        ])
        .sorted_by(SortKey::Experience);

    let csv = to_csv_string(&ranking).expect("export encodes");
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("1,Veteran Person,36,"));
    assert!(lines[2].starts_with("2,Scholar Person,34,"));
}
