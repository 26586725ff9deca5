use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::candidates::domain::{CandidateId, CandidateRecord, SourceDocument};
use crate::candidates::repository::{
    CandidateRepository, InMemoryCandidateRepository, RepositoryError,
};
use crate::candidates::{candidate_router, CandidateService};
use crate::config::RankingSettings;

pub(super) const SCENARIO_TEXT: &str = "John Smith john.smith@example.com (555) 123-4567 5 years experience Python Docker Bachelor of Science";

pub(super) fn record(
    name: &str,
    experience: Option<u32>,
    education: &str,
    skills: &[&str],
) -> CandidateRecord {
    CandidateRecord {
        id: CandidateId(format!("cand-{}", name.to_lowercase().replace(' ', "-"))),
        name: name.to_string(),
        email: String::new(),
        phone: String::new(),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        experience,
        education: education.to_string(),
        source_text: String::new(),
        source_file_name: format!("{}.pdf", name.replace(' ', "_")),
        score: 0,
        ingested_at: Utc
            .with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn document(file_name: &str, text: &str) -> SourceDocument {
    SourceDocument::new(file_name, text)
}

pub(super) fn strong_resume() -> SourceDocument {
    document(
        "ada_lovelace.pdf",
        "Ada Lovelace ada@engines.io +1 555.010.2030 12 years experience. \
         PhD in Mathematics. JavaScript Python React Node.js SQL Git AWS Docker \
         Machine Learning Data Analysis Project Management Agile Leadership",
    )
}

pub(super) fn modest_resume() -> SourceDocument {
    document(
        "grace_hopper.pdf",
        "Grace Hopper grace@navy.mil 2 yrs building compilers. Master of Science. Python",
    )
}

pub(super) fn build_service() -> (
    CandidateService<InMemoryCandidateRepository>,
    Arc<InMemoryCandidateRepository>,
) {
    let repository = Arc::new(InMemoryCandidateRepository::default());
    let service = CandidateService::new(repository.clone(), RankingSettings::default());
    (service, repository)
}

pub(super) fn candidate_router_with_service(
    service: CandidateService<InMemoryCandidateRepository>,
) -> axum::Router {
    candidate_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) struct UnavailableRepository;

impl CandidateRepository for UnavailableRepository {
    fn insert(&self, _record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: CandidateRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove(&self, _id: &CandidateId) -> Result<CandidateRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn snapshot(&self) -> Result<Vec<CandidateRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// In-memory store whose `fail_on`-th insert (1-based) reports an outage.
#[derive(Default)]
pub(super) struct FlakyRepository {
    inner: InMemoryCandidateRepository,
    inserts: AtomicUsize,
    fail_on: usize,
}

impl FlakyRepository {
    pub(super) fn failing_on(fail_on: usize) -> Self {
        Self {
            fail_on,
            ..Self::default()
        }
    }
}

impl CandidateRepository for FlakyRepository {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let attempt = self.inserts.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt == self.fail_on {
            return Err(RepositoryError::Unavailable("write timeout".to_string()));
        }
        self.inner.insert(record)
    }

    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError> {
        self.inner.update(record)
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn remove(&self, id: &CandidateId) -> Result<CandidateRecord, RepositoryError> {
        self.inner.remove(id)
    }

    fn snapshot(&self) -> Result<Vec<CandidateRecord>, RepositoryError> {
        self.inner.snapshot()
    }
}
