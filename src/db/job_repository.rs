use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{Pool, Postgres, QueryBuilder};
use tracing::debug;

use crate::api::job::models::{JobUpdate, NewJob};
use crate::db::models::{Job, JobRow};
use crate::db::object_id::ObjectId;
use crate::db::store::{JobStore, StoreError};

const JOB_COLUMNS: &str = "id, title, job_type, description, company, created_at, updated_at";

/// Postgres-backed job collection. The embedded company lives in a JSONB column.
pub struct PgJobStore {
    pool: Pool<Postgres>,
}

impl PgJobStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn into_jobs(rows: Vec<JobRow>) -> Result<Vec<Job>, StoreError> {
    rows.into_iter().map(Job::try_from).collect()
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn list(&self) -> Result<Vec<Job>, StoreError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} jobs", rows.len());
        into_jobs(rows)
    }

    async fn insert(&self, job: &NewJob) -> Result<Job, StoreError> {
        let id = ObjectId::new();
        debug!("Creating job: id={}, title={}", id, job.title);

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO jobs (id, title, job_type, description, company)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(id.to_string())
        .bind(&job.title)
        .bind(&job.job_type)
        .bind(&job.description)
        .bind(Json(job.company.clone().unwrap_or_default()))
        .fetch_one(&self.pool)
        .await?;

        Job::try_from(row)
    }

    async fn insert_many(&self, jobs: &[NewJob]) -> Result<Vec<Job>, StoreError> {
        if jobs.is_empty() {
            debug!("Bulk insert called with empty job list");
            return Ok(Vec::new());
        }

        debug!("Starting bulk insert of {} jobs", jobs.len());

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO jobs (id, title, job_type, description, company) ");
        builder.push_values(jobs, |mut b, job| {
            b.push_bind(ObjectId::new().to_string())
                .push_bind(job.title.clone())
                .push_bind(job.job_type.clone())
                .push_bind(job.description.clone())
                .push_bind(Json(job.company.clone().unwrap_or_default()));
        });
        builder.push(format!(" RETURNING {JOB_COLUMNS}"));

        let rows = builder.build_query_as::<JobRow>().fetch_all(&self.pool).await?;
        debug!("Bulk insert completed: {} rows inserted", rows.len());
        into_jobs(rows)
    }

    async fn find(&self, id: &ObjectId) -> Result<Option<Job>, StoreError> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Job::try_from).transpose()
    }

    async fn update(&self, id: &ObjectId, update: &JobUpdate) -> Result<Option<Job>, StoreError> {
        debug!("Updating job: id={}", id);

        // `||` merges top-level keys, so absent company fields survive
        let company_patch = Json(update.company.clone().unwrap_or_default());

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            UPDATE jobs SET
                title = COALESCE($2, title),
                job_type = COALESCE($3, job_type),
                description = COALESCE($4, description),
                company = company || $5,
                updated_at = clock_timestamp()
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(id.to_string())
        .bind(update.title.as_deref())
        .bind(update.job_type.as_deref())
        .bind(update.description.as_deref())
        .bind(company_patch)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Job::try_from).transpose()
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        debug!("Deleted job id={}: {} rows affected", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM jobs").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
