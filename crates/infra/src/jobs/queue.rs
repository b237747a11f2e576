//! Job queue boundary and the in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::types::{Job, JobId, JobStatus};

/// Job queue error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error("job already exists: {0}")]
    AlreadyExists(JobId),
    #[error("queue error: {0}")]
    Storage(String),
}

/// Queue abstraction for background work.
///
/// Producers enqueue, consumers claim FIFO and report the outcome. There is
/// no retry machinery at this boundary; a failed job stays visible with its
/// error until a consumer decides what to do with it.
pub trait JobQueue: Send + Sync {
    /// Enqueue a new pending job.
    fn enqueue(&self, job: Job) -> Result<JobId, QueueError>;

    /// Claim the oldest pending job, marking it running.
    fn claim_next(&self) -> Result<Option<Job>, QueueError>;

    /// Mark a claimed job completed.
    fn complete(&self, id: JobId) -> Result<(), QueueError>;

    /// Mark a claimed job failed.
    fn fail(&self, id: JobId, error: String) -> Result<(), QueueError>;

    /// Get a job by id.
    fn get(&self, id: JobId) -> Result<Option<Job>, QueueError>;

    /// Number of pending jobs.
    fn len(&self) -> Result<usize, QueueError>;

    fn is_empty(&self) -> Result<bool, QueueError> {
        Ok(self.len()? == 0)
    }
}

impl<Q> JobQueue for Arc<Q>
where
    Q: JobQueue + ?Sized,
{
    fn enqueue(&self, job: Job) -> Result<JobId, QueueError> {
        (**self).enqueue(job)
    }

    fn claim_next(&self) -> Result<Option<Job>, QueueError> {
        (**self).claim_next()
    }

    fn complete(&self, id: JobId) -> Result<(), QueueError> {
        (**self).complete(id)
    }

    fn fail(&self, id: JobId, error: String) -> Result<(), QueueError> {
        (**self).fail(id, error)
    }

    fn get(&self, id: JobId) -> Result<Option<Job>, QueueError> {
        (**self).get(id)
    }

    fn len(&self) -> Result<usize, QueueError> {
        (**self).len()
    }
}

/// In-memory job queue for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryJobQueue {
    jobs: RwLock<HashMap<JobId, Job>>,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<JobId, Job>>, QueueError> {
        self.jobs
            .read()
            .map_err(|_| QueueError::Storage("job queue lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<JobId, Job>>, QueueError> {
        self.jobs
            .write()
            .map_err(|_| QueueError::Storage("job queue lock poisoned".to_string()))
    }
}

impl JobQueue for InMemoryJobQueue {
    fn enqueue(&self, job: Job) -> Result<JobId, QueueError> {
        let mut jobs = self.write()?;
        if jobs.contains_key(&job.id) {
            return Err(QueueError::AlreadyExists(job.id));
        }
        let id = job.id;
        jobs.insert(id, job);
        Ok(id)
    }

    fn claim_next(&self) -> Result<Option<Job>, QueueError> {
        let mut jobs = self.write()?;

        // Oldest pending job first (FIFO by created_at).
        let next = jobs
            .values()
            .filter(|j| j.status == JobStatus::Pending)
            .min_by_key(|j| (j.created_at, j.id.0))
            .map(|j| j.id);

        if let Some(id) = next {
            if let Some(job) = jobs.get_mut(&id) {
                job.status = JobStatus::Running;
                return Ok(Some(job.clone()));
            }
        }
        Ok(None)
    }

    fn complete(&self, id: JobId) -> Result<(), QueueError> {
        let mut jobs = self.write()?;
        let job = jobs.get_mut(&id).ok_or(QueueError::NotFound(id))?;
        job.status = JobStatus::Completed;
        Ok(())
    }

    fn fail(&self, id: JobId, error: String) -> Result<(), QueueError> {
        let mut jobs = self.write()?;
        let job = jobs.get_mut(&id).ok_or(QueueError::NotFound(id))?;
        job.status = JobStatus::Failed { error };
        Ok(())
    }

    fn get(&self, id: JobId) -> Result<Option<Job>, QueueError> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn len(&self) -> Result<usize, QueueError> {
        Ok(self
            .read()?
            .values()
            .filter(|j| j.status == JobStatus::Pending)
            .count())
    }
}
