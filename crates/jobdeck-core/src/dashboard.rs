//! Dashboard types.

use serde::{Deserialize, Serialize};

use crate::{Build, Job, PointerBuild};

/// A job paired with its pointer builds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardJob {
    pub job: Job,
    pub next_build: Option<Build>,
    pub finished_build: Option<Build>,
    pub transition_build: Option<Build>,
}

impl DashboardJob {
    /// A dashboard entry with no builds attached.
    pub fn new(job: Job) -> Self {
        Self {
            job,
            next_build: None,
            finished_build: None,
            transition_build: None,
        }
    }

    pub fn build(&self, pointer: PointerBuild) -> Option<&Build> {
        match pointer {
            PointerBuild::Next => self.next_build.as_ref(),
            PointerBuild::Finished => self.finished_build.as_ref(),
            PointerBuild::Transition => self.transition_build.as_ref(),
        }
    }

    /// All attached builds, in pointer order.
    pub fn builds(&self) -> impl Iterator<Item = &Build> {
        PointerBuild::ALL.into_iter().filter_map(|p| self.build(p))
    }
}

/// Ordered dashboard, in the order of the job list that produced it.
pub type Dashboard = Vec<DashboardJob>;
