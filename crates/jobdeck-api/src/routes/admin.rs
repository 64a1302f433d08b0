//! Administrative dashboard endpoint.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::routing::get;
use axum::{Json, Router};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::jobs::DashboardJobResponse;
use crate::AppState;
use crate::error::ApiError;

pub fn router() -> Router<AppState> {
    Router::new().route("/jobs", get(all_jobs))
}

type HmacSha256 = Hmac<Sha256>;

/// Compare tokens in constant time by verifying HMAC tags keyed with the
/// configured token.
fn token_matches(expected: &str, presented: &str) -> bool {
    let Ok(mut expected_mac) = HmacSha256::new_from_slice(expected.as_bytes()) else {
        return false;
    };
    expected_mac.update(expected.as_bytes());
    let tag = expected_mac.finalize().into_bytes();

    let Ok(mut mac) = HmacSha256::new_from_slice(expected.as_bytes()) else {
        return false;
    };
    mac.update(presented.as_bytes());
    mac.verify_slice(&tag).is_ok()
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(token) = state.admin_token.as_deref() else {
        return Err(ApiError::NotFound("admin view is disabled".to_string()));
    };

    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match presented {
        Some(p) if token_matches(token, p) => Ok(()),
        Some(_) => Err(ApiError::Unauthorized("invalid admin token".to_string())),
        None => Err(ApiError::Unauthorized("missing admin token".to_string())),
    }
}

async fn all_jobs(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<DashboardJobResponse>>, ApiError> {
    authorize(&state, &headers)?;
    let dashboard = state.job_factory.all_active_jobs().await?;
    Ok(Json(dashboard.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use super::token_matches;
    use crate::routes::test_support::{app, get, job_ids};
    use axum::http::StatusCode;

    #[test]
    fn test_token_matches() {
        assert!(token_matches("s3cret", "s3cret"));
        assert!(!token_matches("s3cret", "s3cre"));
        assert!(!token_matches("s3cret", "s3cretx"));
        assert!(!token_matches("s3cret", ""));
        assert!(!token_matches("s3cret", "S3CRET"));
    }

    #[tokio::test]
    async fn test_all_jobs_with_token() {
        let (app, _) = app(Some("s3cret")).await;
        let (status, body) = get(app, "/api/v1/admin/jobs", Some("s3cret")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(job_ids(&body), vec![1, 3, 5]);
    }

    #[tokio::test]
    async fn test_wrong_token_is_rejected() {
        let (app, store) = app(Some("s3cret")).await;
        let (status, _) = get(app, "/api/v1/admin/jobs", Some("guess")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(store.job_queries(), 0);
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected() {
        let (app, _) = app(Some("s3cret")).await;
        let (status, _) = get(app, "/api/v1/admin/jobs", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_disabled_without_configured_token() {
        let (app, _) = app(None).await;
        let (status, _) = get(app, "/api/v1/admin/jobs", Some("anything")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
