//! Dashboard assembly.
//!
//! Selects the jobs a caller may see and attaches each job's next, latest
//! completed and transition builds.

use jobdeck_core::{Build, Dashboard, DashboardJob, Job, JobId, PointerBuild};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::store::{JobScope, JobStore};
use crate::DbResult;

/// Builds dashboards from a job store.
#[derive(Clone)]
pub struct JobFactory {
    store: Arc<dyn JobStore>,
}

impl JobFactory {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    /// Dashboard of the jobs visible to members of `team_names`.
    ///
    /// Jobs owned by those teams come first, followed by public jobs of
    /// every other team. Each group is ordered by job id; the two groups are
    /// not merged into a single ordering.
    pub async fn visible_jobs(&self, team_names: &[String]) -> DbResult<Dashboard> {
        let own_scope = JobScope::Teams(team_names.to_vec());
        let public_scope = JobScope::OtherTeamsPublic(team_names.to_vec());

        let (mut jobs, public_jobs) = tokio::try_join!(
            self.store.active_jobs(&own_scope),
            self.store.active_jobs(&public_scope),
        )?;

        debug!(
            teams = ?team_names,
            own = jobs.len(),
            public = public_jobs.len(),
            "Selected visible jobs"
        );

        jobs.extend(public_jobs);
        self.build_dashboard(jobs).await
    }

    /// Dashboard of every active job, without visibility filtering.
    pub async fn all_active_jobs(&self) -> DbResult<Dashboard> {
        let jobs = self.store.active_jobs(&JobScope::All).await?;
        self.build_dashboard(jobs).await
    }

    /// Attach pointer builds to `jobs`, keeping their order.
    ///
    /// Either every lookup succeeds and a full dashboard is returned, or
    /// the first failure is returned and nothing else.
    pub async fn build_dashboard(&self, jobs: Vec<Job>) -> DbResult<Dashboard> {
        if jobs.is_empty() {
            return Ok(Dashboard::new());
        }

        let job_ids: Vec<JobId> = jobs.iter().map(|j| j.id).collect();

        let (next_builds, finished_builds, transition_builds) = tokio::try_join!(
            self.resolve_builds(PointerBuild::Next, &job_ids),
            self.resolve_builds(PointerBuild::Finished, &job_ids),
            self.resolve_builds(PointerBuild::Transition, &job_ids),
        )?;

        let dashboard: Dashboard = jobs
            .into_iter()
            .map(|job| {
                let id = job.id;
                let mut entry = DashboardJob::new(job);
                entry.next_build = next_builds.get(&id).cloned();
                entry.finished_build = finished_builds.get(&id).cloned();
                entry.transition_build = transition_builds.get(&id).cloned();
                entry
            })
            .collect();

        debug!(jobs = dashboard.len(), "Assembled dashboard");
        Ok(dashboard)
    }

    async fn resolve_builds(
        &self,
        pointer: PointerBuild,
        job_ids: &[JobId],
    ) -> DbResult<HashMap<JobId, Build>> {
        let mut builds = self.store.builds_for(pointer, job_ids).await?;

        builds.retain(|job_id, build| {
            let owned = build.job_id == *job_id;
            if !owned {
                warn!(
                    %pointer,
                    job_id = %job_id,
                    build_id = %build.id,
                    owner = %build.job_id,
                    "Dropping pointer build owned by another job"
                );
            }
            owned
        });

        Ok(builds)
    }
}
