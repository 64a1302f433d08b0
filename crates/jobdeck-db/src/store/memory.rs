//! In-memory job store.
//!
//! Applies the same selection rules as the PostgreSQL store over jobs and
//! builds held in process, with hooks for counting queries and injecting
//! failures. Used by tests.

use async_trait::async_trait;
use jobdeck_core::{Build, Job, JobId, PointerBuild};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use super::{JobScope, JobStore};
use crate::DbResult;

#[derive(Debug, Default)]
struct MemoryState {
    jobs: Vec<Job>,
    builds: HashMap<i64, Build>,
    failing_pointers: HashSet<PointerBuild>,
    failing_jobs: bool,
}

/// JobStore backed by in-process collections.
#[derive(Debug, Default)]
pub struct MemoryJobStore {
    state: RwLock<MemoryState>,
    job_queries: AtomicUsize,
    build_queries: AtomicUsize,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a job, replacing any existing job with the same id.
    pub async fn insert_job(&self, job: Job) {
        let mut state = self.state.write().await;
        state.jobs.retain(|j| j.id != job.id);
        state.jobs.push(job);
    }

    /// Add a build, replacing any existing build with the same id.
    pub async fn insert_build(&self, build: Build) {
        let mut state = self.state.write().await;
        state.builds.insert(build.id.get(), build);
    }

    /// Make every subsequent lookup through `pointer` fail.
    pub async fn fail_builds_for(&self, pointer: PointerBuild) {
        self.state.write().await.failing_pointers.insert(pointer);
    }

    /// Make every subsequent job selection fail.
    pub async fn fail_job_queries(&self) {
        self.state.write().await.failing_jobs = true;
    }

    /// Number of job selections served so far.
    pub fn job_queries(&self) -> usize {
        self.job_queries.load(Ordering::SeqCst)
    }

    /// Number of pointer build lookups served so far.
    pub fn build_queries(&self) -> usize {
        self.build_queries.load(Ordering::SeqCst)
    }
}

fn injected_failure(what: &str) -> sqlx::Error {
    sqlx::Error::Protocol(format!("injected failure for {what}"))
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn active_jobs(&self, scope: &JobScope) -> DbResult<Vec<Job>> {
        self.job_queries.fetch_add(1, Ordering::SeqCst);
        let state = self.state.read().await;
        if state.failing_jobs {
            return Err(injected_failure("active jobs").into());
        }

        let mut jobs: Vec<Job> = state
            .jobs
            .iter()
            .filter(|j| j.active && scope.admits(&j.team_name, j.public))
            .cloned()
            .collect();
        jobs.sort_by_key(|j| j.id);
        Ok(jobs)
    }

    async fn builds_for(
        &self,
        pointer: PointerBuild,
        job_ids: &[JobId],
    ) -> DbResult<HashMap<JobId, Build>> {
        self.build_queries.fetch_add(1, Ordering::SeqCst);
        let state = self.state.read().await;
        if state.failing_pointers.contains(&pointer) {
            return Err(injected_failure(pointer.column()).into());
        }

        let wanted: HashSet<JobId> = job_ids.iter().copied().collect();
        let builds = state
            .jobs
            .iter()
            .filter(|j| wanted.contains(&j.id))
            .filter_map(|j| {
                let build_id = j.pointer(pointer)?;
                let build = state.builds.get(&build_id.get())?;
                (build.job_id == j.id).then(|| (j.id, build.clone()))
            })
            .collect();
        Ok(builds)
    }

    async fn ping(&self) -> DbResult<()> {
        Ok(())
    }
}
