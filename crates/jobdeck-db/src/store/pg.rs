//! PostgreSQL job store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jobdeck_core::{Build, BuildId, BuildStatus, Job, JobId, PointerBuild};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::{JobScope, JobStore};
use crate::{DbError, DbResult};

const JOBS_QUERY: &str = r#"
    SELECT j.id, j.name, j.pipeline_id, p.name AS pipeline_name, t.name AS team_name,
           p.public, j.active, j.paused,
           j.next_build_id, j.latest_completed_build_id, j.transition_build_id
    FROM jobs j
    JOIN pipelines p ON p.id = j.pipeline_id
    JOIN teams t ON t.id = p.team_id
    WHERE j.active = true
"#;

/// A job row joined with its pipeline and team.
#[derive(Debug, Clone, sqlx::FromRow)]
struct JobRow {
    id: i64,
    name: String,
    pipeline_id: i64,
    pipeline_name: String,
    team_name: String,
    public: bool,
    active: bool,
    paused: bool,
    next_build_id: Option<i64>,
    latest_completed_build_id: Option<i64>,
    transition_build_id: Option<i64>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: JobId::new(row.id),
            name: row.name,
            pipeline_id: row.pipeline_id,
            pipeline_name: row.pipeline_name,
            team_name: row.team_name,
            public: row.public,
            active: row.active,
            paused: row.paused,
            next_build_id: row.next_build_id.map(BuildId::new),
            latest_completed_build_id: row.latest_completed_build_id.map(BuildId::new),
            transition_build_id: row.transition_build_id.map(BuildId::new),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct BuildRow {
    id: i64,
    job_id: i64,
    name: String,
    status: String,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
}

impl TryFrom<BuildRow> for Build {
    type Error = DbError;

    fn try_from(row: BuildRow) -> DbResult<Self> {
        let status: BuildStatus = row
            .status
            .parse()
            .map_err(|e| DbError::Decode(format!("build {}: {}", row.id, e)))?;
        Ok(Build {
            id: BuildId::new(row.id),
            job_id: JobId::new(row.job_id),
            name: row.name,
            status,
            start_time: row.start_time,
            end_time: row.end_time,
        })
    }
}

/// PostgreSQL implementation of JobStore.
pub struct PgJobStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgJobStore {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Run a query future, failing with `DbError::Timeout` once the
    /// configured deadline passes.
    async fn timed<T, F>(&self, what: &str, fut: F) -> DbResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(DbError::Timeout(format!(
                "{} after {}ms",
                what,
                self.query_timeout.as_millis()
            ))),
        }
    }
}

/// Build the job selection query for a scope.
fn jobs_query(scope: &JobScope) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(JOBS_QUERY);

    match scope {
        JobScope::All => {}
        JobScope::Teams(names) => {
            builder.push(" AND t.name = ANY(");
            builder.push_bind(names.clone());
            builder.push(")");
        }
        JobScope::OtherTeamsPublic(names) => {
            builder.push(" AND NOT (t.name = ANY(");
            builder.push_bind(names.clone());
            builder.push(")) AND p.public = true");
        }
    }

    builder.push(" ORDER BY j.id ASC");
    builder
}

/// Select builds through a pointer column, restricted to builds owned by
/// the pointing job.
fn builds_query(pointer: PointerBuild) -> String {
    format!(
        r#"
        SELECT b.id, b.job_id, b.name, b.status, b.start_time, b.end_time
        FROM builds b
        JOIN jobs j ON j.{column} = b.id AND b.job_id = j.id
        WHERE j.id = ANY($1)
        "#,
        column = pointer.column()
    )
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn active_jobs(&self, scope: &JobScope) -> DbResult<Vec<Job>> {
        let mut builder = jobs_query(scope);
        let rows = self
            .timed(
                "active jobs",
                builder.build_query_as::<JobRow>().fetch_all(&self.pool),
            )
            .await?;

        debug!(?scope, jobs = rows.len(), "Fetched active jobs");
        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn builds_for(
        &self,
        pointer: PointerBuild,
        job_ids: &[JobId],
    ) -> DbResult<HashMap<JobId, Build>> {
        if job_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<i64> = job_ids.iter().map(|id| id.get()).collect();
        let sql = builds_query(pointer);
        let rows = self
            .timed(
                pointer.column(),
                sqlx::query_as::<_, BuildRow>(&sql)
                    .bind(ids)
                    .fetch_all(&self.pool),
            )
            .await?;

        let mut builds = HashMap::with_capacity(rows.len());
        for row in rows {
            let build = Build::try_from(row)?;
            builds.insert(build.job_id, build);
        }

        debug!(%pointer, builds = builds.len(), "Resolved pointer builds");
        Ok(builds)
    }

    async fn ping(&self) -> DbResult<()> {
        self.timed("ping", sqlx::query("SELECT 1").execute(&self.pool))
            .await?;
        Ok(())
    }
}
