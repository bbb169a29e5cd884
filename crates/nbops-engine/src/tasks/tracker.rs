use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use nbops_core::errors::TaskError;
use nbops_core::models::{JobKind, JobRecord, JobState};
use nbops_core::tracing::events;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Spawns jobs on the tokio runtime and keeps one [`JobRecord`] per job.
///
/// Jobs are unbounded: no queue limit, no cancellation. Records are kept for
/// the life of the process.
#[derive(Debug, Clone, Default)]
pub struct TaskTracker {
    jobs: Arc<DashMap<Uuid, JobRecord>>,
}

/// Handle to a submitted job. Dropping it detaches the job.
#[derive(Debug)]
pub struct JobHandle {
    pub id: Uuid,
    pub kind: JobKind,
    handle: JoinHandle<()>,
    jobs: Arc<DashMap<Uuid, JobRecord>>,
}

impl JobHandle {
    /// Wait for the job to finish and return its final record.
    pub async fn wait(self) -> Result<JobRecord, TaskError> {
        // The supervising task records every outcome itself, panics included.
        let _ = self.handle.await;
        self.jobs
            .get(&self.id)
            .map(|r| r.clone())
            .ok_or(TaskError::NotFound {
                id: self.id.to_string(),
            })
    }
}

impl TaskTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `work` as a job of `kind`. Must be called within a tokio runtime.
    ///
    /// The returned record moves queued → running → succeeded | failed; an
    /// error from `work` is stored on the record.
    pub fn submit<F, T, E>(&self, kind: JobKind, work: F) -> JobHandle
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Display + Send + 'static,
    {
        let record = JobRecord::queued(kind);
        let id = record.id;
        self.jobs.insert(id, record);
        events::job_transition(&id.to_string(), &kind.to_string(), "queued");

        let jobs = Arc::clone(&self.jobs);
        let handle = tokio::spawn(async move {
            update(&jobs, id, JobRecord::mark_running);
            events::job_transition(&id.to_string(), &kind.to_string(), "running");

            // A panic in `work` arrives here as a `JoinError`.
            let message = match tokio::spawn(work).await {
                Ok(Ok(_)) => None,
                Ok(Err(e)) => Some(e.to_string()),
                Err(e) => Some(format!("job aborted: {e}")),
            };
            match message {
                None => {
                    update(&jobs, id, JobRecord::mark_succeeded);
                    events::job_transition(&id.to_string(), &kind.to_string(), "succeeded");
                }
                Some(message) => {
                    events::job_failed(&id.to_string(), &kind.to_string(), &message);
                    update(&jobs, id, |r| r.mark_failed(message));
                }
            }
        });

        JobHandle {
            id,
            kind,
            handle,
            jobs: Arc::clone(&self.jobs),
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<JobRecord> {
        self.jobs.get(id).map(|r| r.clone())
    }

    pub fn try_get(&self, id: &Uuid) -> Result<JobRecord, TaskError> {
        self.get(id).ok_or(TaskError::NotFound { id: id.to_string() })
    }

    /// All records, newest first.
    pub fn list(&self) -> Vec<JobRecord> {
        let mut records: Vec<JobRecord> = self.jobs.iter().map(|r| r.value().clone()).collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Jobs of `kind` that have not finished.
    pub fn active(&self, kind: JobKind) -> usize {
        self.jobs
            .iter()
            .filter(|r| r.kind == kind && !r.state.is_terminal())
            .count()
    }
}

fn update(jobs: &DashMap<Uuid, JobRecord>, id: Uuid, f: impl FnOnce(&mut JobRecord)) {
    if let Some(mut record) = jobs.get_mut(&id) {
        f(record.value_mut());
    }
}
