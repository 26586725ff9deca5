use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{CandidateId, CandidateRecord};

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Implementations serialize writers; `snapshot` hands back an owned copy in
/// insertion order so ranking never holds the store.
pub trait CandidateRepository: Send + Sync {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError>;
    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError>;
    fn remove(&self, id: &CandidateId) -> Result<CandidateRecord, RepositoryError>;
    fn snapshot(&self) -> Result<Vec<CandidateRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store backed by a mutex-guarded vector.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCandidateRepository {
    records: Arc<Mutex<Vec<CandidateRecord>>>,
}

impl InMemoryCandidateRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Vec<CandidateRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("candidate store lock poisoned".to_string()))
    }
}

impl CandidateRepository for InMemoryCandidateRepository {
    fn insert(&self, record: CandidateRecord) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: CandidateRecord) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        match guard.iter_mut().find(|existing| existing.id == record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &CandidateId) -> Result<Option<CandidateRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn remove(&self, id: &CandidateId) -> Result<CandidateRecord, RepositoryError> {
        let mut guard = self.lock()?;
        let position = guard
            .iter()
            .position(|record| &record.id == id)
            .ok_or(RepositoryError::NotFound)?;
        Ok(guard.remove(position))
    }

    fn snapshot(&self) -> Result<Vec<CandidateRecord>, RepositoryError> {
        Ok(self.lock()?.clone())
    }
}
