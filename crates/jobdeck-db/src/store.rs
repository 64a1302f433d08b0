//! Job store trait and implementations.

pub mod memory;
pub mod pg;

pub use memory::MemoryJobStore;
pub use pg::PgJobStore;

use async_trait::async_trait;
use jobdeck_core::{Build, Job, JobId, PointerBuild};
use std::collections::HashMap;

use crate::DbResult;

/// Which active jobs to select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobScope {
    /// Every active job, regardless of team or visibility.
    All,
    /// Active jobs owned by any of the named teams.
    Teams(Vec<String>),
    /// Active jobs on public pipelines owned by teams not in the list.
    OtherTeamsPublic(Vec<String>),
}

impl JobScope {
    /// Whether a job owned by `team_name` on a pipeline with the given
    /// visibility falls in this scope. Activity is checked separately.
    pub fn admits(&self, team_name: &str, public: bool) -> bool {
        match self {
            JobScope::All => true,
            JobScope::Teams(names) => names.iter().any(|n| n == team_name),
            JobScope::OtherTeamsPublic(names) => {
                public && !names.iter().any(|n| n == team_name)
            }
        }
    }
}

/// Read access to jobs and builds.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Active jobs in the given scope, ordered by job id ascending.
    async fn active_jobs(&self, scope: &JobScope) -> DbResult<Vec<Job>>;

    /// Builds referenced by `pointer` on the given jobs, keyed by job id.
    ///
    /// Jobs without a value in the pointer column, or whose referenced build
    /// does not exist or belongs to another job, are absent from the map.
    async fn builds_for(
        &self,
        pointer: PointerBuild,
        job_ids: &[JobId],
    ) -> DbResult<HashMap<JobId, Build>>;

    /// Check that the store is reachable.
    async fn ping(&self) -> DbResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teams_scope() {
        let scope = JobScope::Teams(vec!["ops".to_string(), "dev".to_string()]);
        assert!(scope.admits("ops", false));
        assert!(scope.admits("dev", true));
        assert!(!scope.admits("qa", true));
    }

    #[test]
    fn test_other_teams_public_scope() {
        let scope = JobScope::OtherTeamsPublic(vec!["ops".to_string()]);
        assert!(scope.admits("dev", true));
        assert!(!scope.admits("dev", false));
        assert!(!scope.admits("ops", true));
    }

    #[test]
    fn test_empty_team_list() {
        assert!(!JobScope::Teams(vec![]).admits("ops", true));
        assert!(JobScope::OtherTeamsPublic(vec![]).admits("ops", true));
        assert!(!JobScope::OtherTeamsPublic(vec![]).admits("ops", false));
    }
}
