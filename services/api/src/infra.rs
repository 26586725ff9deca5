use metrics_exporter_prometheus::PrometheusHandle;
use resume_ranker::candidates::{CandidateService, InMemoryCandidateRepository};
use resume_ranker::config::RankingSettings;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type CandidateStore = CandidateService<InMemoryCandidateRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_candidate_service(settings: RankingSettings) -> Arc<CandidateStore> {
    let repository = Arc::new(InMemoryCandidateRepository::default());
    Arc::new(CandidateService::new(repository, settings))
}
