//! API routes.

pub mod admin;
pub mod health;
pub mod jobs;

use crate::AppState;
use axum::Router;

/// Build the main API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_router())
        .merge(health::router())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/jobs", jobs::router())
        .nest("/admin", admin::router())
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use jobdeck_core::{Build, BuildId, BuildStatus, Job, JobId};
    use jobdeck_db::MemoryJobStore;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::AppState;

    pub fn make_job(id: i64, team: &str, public: bool) -> Job {
        Job {
            id: JobId::new(id),
            name: format!("job-{id}"),
            pipeline_id: 1,
            pipeline_name: format!("{team}-main"),
            team_name: team.to_string(),
            public,
            active: true,
            paused: false,
            next_build_id: None,
            latest_completed_build_id: None,
            transition_build_id: None,
        }
    }

    /// ops owns 1 and 5 (5 has a finished build), dev owns public 3.
    pub async fn app(admin_token: Option<&str>) -> (Router, Arc<MemoryJobStore>) {
        let store = Arc::new(MemoryJobStore::new());
        store.insert_job(make_job(1, "ops", false)).await;
        let mut shipped = make_job(5, "ops", false);
        shipped.latest_completed_build_id = Some(BuildId::new(50));
        store.insert_job(shipped).await;
        store.insert_job(make_job(3, "dev", true)).await;
        store
            .insert_build(Build {
                id: BuildId::new(50),
                job_id: JobId::new(5),
                name: "7".to_string(),
                status: BuildStatus::Succeeded,
                start_time: None,
                end_time: None,
            })
            .await;

        let state = AppState::new(store.clone(), admin_token.map(String::from));
        (super::router(state), store)
    }

    pub async fn get(app: Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder().uri(uri);
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {token}"));
        }

        let response = app
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub fn job_ids(body: &Value) -> Vec<i64> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|j| j["id"].as_i64().unwrap())
            .collect()
    }
}
