use crate::documents::{collect_paths, load_document};
use crate::infra::build_candidate_service;
use clap::Args;
use resume_ranker::candidates::{
    write_csv, CandidateServiceError, FilterOutcome, IngestReport, RankingOutcome, RankingView,
    SortKey,
};
use resume_ranker::config::AppConfig;
use resume_ranker::error::AppError;
use resume_ranker::telemetry;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

const NAME_WIDTH: usize = 28;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Résumé files (PDF or plain text) or directories containing them
    #[arg(required = true)]
    pub(crate) paths: Vec<PathBuf>,
    /// Ordering of the table: score, experience or education
    #[arg(long)]
    pub(crate) sort: Option<SortKey>,
    /// Only list candidates whose name, skills or education contain this text
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Write the full ranking to this CSV file
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        paths,
        sort,
        query,
        export,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let sort = sort.unwrap_or(config.ranking.default_sort);
    let service = build_candidate_service(config.ranking);

    let paths = collect_paths(&paths)?;
    let report = service.ingest(paths.iter().map(|path| load_document(path)))?;
    render_ingest_report(&report);

    let ranking = match service.rank(sort)? {
        RankingOutcome::Ranked(ranking) => ranking,
        RankingOutcome::NoCandidates => {
            println!("No candidates to rank.");
            return Ok(());
        }
    };

    let query = query.unwrap_or_default();
    if query.trim().is_empty() {
        print_lines(&format_ranking(&RankingView::from_ranking(&ranking)));
    } else {
        match ranking.filter(&query) {
            FilterOutcome::Matches(matches) => {
                let view = RankingView::from_matches(&ranking, &query, &matches);
                print_lines(&format_ranking(&view));
            }
            FilterOutcome::NoMatches => println!("No candidates match \"{}\".", query.trim()),
        }
    }

    if let Some(path) = export {
        let file = File::create(&path)?;
        let mut writer =
            write_csv(&ranking, BufWriter::new(file)).map_err(CandidateServiceError::from)?;
        writer.flush()?;
        println!("Ranking exported to {}", path.display());
    }

    Ok(())
}

fn render_ingest_report(report: &IngestReport) {
    println!("{}", report.message());
    for failure in &report.skipped_documents {
        println!("  skipped {}: {}", failure.file_name, failure.reason);
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// Plain-text table; top candidates are marked with `*`.
pub(crate) fn format_ranking(view: &RankingView) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.candidates.len() + 2);
    lines.push(format!("Ranked by {} ({} candidate(s))", view.sort, view.count));
    lines.push(format!(
        "  {:>4}  {:<NAME_WIDTH$}  {:>5}  {:<10}  {:<12}  Skills",
        "Rank", "Name", "Score", "Experience", "Education"
    ));

    for row in &view.candidates {
        let marker = if row.top_candidate { '*' } else { ' ' };
        lines.push(format!(
            "{marker} {:>4}  {:<NAME_WIDTH$}  {:>5}  {:<10}  {:<12}  {}",
            row.rank,
            truncate(&row.name, NAME_WIDTH),
            row.score,
            row.experience,
            row.education,
            row.skills.join(", ")
        ));
    }
    lines
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut shortened = value.chars().take(width - 1).collect::<String>();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;
    use resume_ranker::candidates::{FieldExtractor, RankingEngine};

    #[test]
    fn table_marks_top_candidates() {
        let extractor = FieldExtractor::default();
        let records = [
            "Ada Lovelace\nPhD\n12 years of Python",
            "Alan Turing",
            "Grace Hopper",
            "Linus Torvalds",
        ]
        .iter()
        .map(|text| extractor.extract(text, "resume.pdf"))
        .collect::<Vec<_>>();
        let ranking = RankingEngine::new().rank(records);

        let lines = format_ranking(&RankingView::from_ranking(&ranking));

        assert_eq!(lines[0], "Ranked by score (4 candidate(s))");
        assert_eq!(lines.len(), 6);
        assert!(lines[2].starts_with("*    1  Ada Lovelace"));
        assert!(lines[2].contains("12 years"));
        assert!(lines[5].starts_with("     4  "));
    }

    #[test]
    fn long_names_are_shortened() {
        assert_eq!(truncate("Short", 10), "Short");
        assert_eq!(truncate("Maximiliana Featherstonehaugh", 12), "Maximiliana…");
    }
}
