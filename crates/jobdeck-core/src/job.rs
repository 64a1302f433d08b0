//! Jobs and the pointer builds they track.

use serde::{Deserialize, Serialize};

use crate::{BuildId, JobId};

/// A schedulable unit within a pipeline.
///
/// Team and pipeline attributes are denormalized onto the job so the
/// dashboard can be rendered without further lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub name: String,
    pub pipeline_id: i64,
    pub pipeline_name: String,
    pub team_name: String,
    /// Whether the owning pipeline is visible to other teams.
    pub public: bool,
    pub active: bool,
    pub paused: bool,
    /// Scheduled or in-flight build.
    pub next_build_id: Option<BuildId>,
    /// Most recent build that reached a terminal status.
    pub latest_completed_build_id: Option<BuildId>,
    /// Most recent build whose status differs from the one before it.
    pub transition_build_id: Option<BuildId>,
}

impl Job {
    /// The build id this job holds for the given pointer, if any.
    pub fn pointer(&self, pointer: PointerBuild) -> Option<BuildId> {
        match pointer {
            PointerBuild::Next => self.next_build_id,
            PointerBuild::Finished => self.latest_completed_build_id,
            PointerBuild::Transition => self.transition_build_id,
        }
    }
}

/// The three per-job build references shown on a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerBuild {
    Next,
    Finished,
    Transition,
}

impl PointerBuild {
    pub const ALL: [PointerBuild; 3] = [
        PointerBuild::Next,
        PointerBuild::Finished,
        PointerBuild::Transition,
    ];

    /// Name of the `jobs` column holding this pointer.
    pub fn column(&self) -> &'static str {
        match self {
            PointerBuild::Next => "next_build_id",
            PointerBuild::Finished => "latest_completed_build_id",
            PointerBuild::Transition => "transition_build_id",
        }
    }
}

impl std::fmt::Display for PointerBuild {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}
