//! Background jobs keyed by string, with results kept for an hour.
//!
//! Narrative generation is too slow to run inside a JSON request, so the
//! first request starts it on the runtime and later requests poll for the
//! stored result.

use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

pub const JOB_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Pending,
    Ready,
}

#[derive(Debug, Clone)]
enum JobState {
    InProgress,
    Done(Value),
}

#[derive(Debug, Clone)]
struct JobEntry {
    state: JobState,
    stored_at: Instant,
}

#[derive(Clone)]
pub struct JobRegistry {
    jobs: Arc<Mutex<HashMap<String, JobEntry>>>,
    ttl: Duration,
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new(JOB_TTL)
    }
}

impl JobRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            jobs: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    fn jobs(&self) -> MutexGuard<'_, HashMap<String, JobEntry>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start `job` unless it is already running or has a fresh result.
    ///
    /// Must be called from within a tokio runtime.
    pub fn ensure_job<F>(&self, key: &str, job: F) -> JobStatus
    where
        F: Future<Output = Result<Value, String>> + Send + 'static,
    {
        {
            let mut jobs = self.jobs();
            jobs.retain(|_, entry| entry.stored_at.elapsed() < self.ttl);
            match jobs.get(key).map(|entry| &entry.state) {
                Some(JobState::Done(_)) => return JobStatus::Ready,
                Some(JobState::InProgress) => return JobStatus::Pending,
                None => {}
            }
            jobs.insert(
                key.to_string(),
                JobEntry {
                    state: JobState::InProgress,
                    stored_at: Instant::now(),
                },
            );
        }

        debug!(key, "starting background job");
        let registry = self.clone();
        let key = key.to_string();
        tokio::spawn(async move {
            let value = match job.await {
                Ok(value) => value,
                Err(message) => {
                    warn!(key = %key, error = %message, "background job failed");
                    json!({ "error": message })
                }
            };
            registry.store(key, value);
        });

        JobStatus::Pending
    }

    fn store(&self, key: String, value: Value) {
        self.jobs().insert(
            key,
            JobEntry {
                state: JobState::Done(value),
                stored_at: Instant::now(),
            },
        );
    }

    /// The finished job's value; `None` while pending, expired or unknown.
    pub fn result(&self, key: &str) -> Option<Value> {
        let jobs = self.jobs();
        match jobs.get(key) {
            Some(JobEntry {
                state: JobState::Done(value),
                stored_at,
            }) if stored_at.elapsed() < self.ttl => Some(value.clone()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.jobs().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
