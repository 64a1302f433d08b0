//! Team dashboard endpoint.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use jobdeck_core::{Build, DashboardJob, Job};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::ApiError;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(visible_jobs))
}

/// A dashboard entry as rendered to clients.
#[derive(Debug, Serialize)]
pub struct DashboardJobResponse {
    #[serde(flatten)]
    pub job: Job,
    pub next_build: Option<Build>,
    pub finished_build: Option<Build>,
    pub transition_build: Option<Build>,
}

impl From<DashboardJob> for DashboardJobResponse {
    fn from(entry: DashboardJob) -> Self {
        Self {
            job: entry.job,
            next_build: entry.next_build,
            finished_build: entry.finished_build,
            transition_build: entry.transition_build,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VisibleJobsQuery {
    /// Comma-separated team names.
    teams: Option<String>,
}

/// Split a comma-separated team list, dropping blanks and repeats.
fn parse_teams(raw: Option<&str>) -> Vec<String> {
    let mut teams: Vec<String> = Vec::new();
    for name in raw.unwrap_or_default().split(',').map(str::trim) {
        if !name.is_empty() && !teams.iter().any(|t| t == name) {
            teams.push(name.to_string());
        }
    }
    teams
}

async fn visible_jobs(
    State(state): State<AppState>,
    Query(query): Query<VisibleJobsQuery>,
) -> Result<Json<Vec<DashboardJobResponse>>, ApiError> {
    let teams = parse_teams(query.teams.as_deref());
    let dashboard = state.job_factory.visible_jobs(&teams).await?;
    Ok(Json(dashboard.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::{app, get, job_ids};
    use axum::http::StatusCode;
    use jobdeck_core::PointerBuild;

    #[test]
    fn test_parse_teams() {
        assert_eq!(parse_teams(None), Vec::<String>::new());
        assert_eq!(parse_teams(Some("")), Vec::<String>::new());
        assert_eq!(parse_teams(Some("ops, dev,,ops")), vec!["ops", "dev"]);
    }

    #[tokio::test]
    async fn test_team_jobs_come_first() {
        let (app, _) = app(None).await;
        let (status, body) = get(app, "/api/v1/jobs?teams=ops", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(job_ids(&body), vec![1, 5, 3]);
        assert_eq!(body[1]["team_name"], "ops");
        assert_eq!(body[1]["finished_build"]["id"], 50);
        assert_eq!(body[1]["finished_build"]["status"], "succeeded");
        assert!(body[1]["next_build"].is_null());
        assert!(body[0]["transition_build"].is_null());
    }

    #[tokio::test]
    async fn test_anonymous_sees_public_jobs() {
        let (app, _) = app(None).await;
        let (status, body) = get(app, "/api/v1/jobs", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(job_ids(&body), vec![3]);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_server_error() {
        let (app, store) = app(None).await;
        store.fail_builds_for(PointerBuild::Transition).await;
        let (status, body) = get(app, "/api/v1/jobs?teams=ops", None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("transition_build_id"));
    }
}
