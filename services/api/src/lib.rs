mod cli;
mod documents;
mod infra;
mod ranking_report;
mod routes;
mod server;

use resume_ranker::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
