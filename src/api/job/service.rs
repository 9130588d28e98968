use actix_web::{HttpResponse, ResponseError};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, warn};
use validator::Validate;

use crate::api::validation::{field_messages, ErrorResponse};
use crate::db::models::Job;
use crate::db::object_id::{MalformedId, ObjectId};
use crate::db::store::{JobStore, StoreError};
use super::dto::{JobError, SeedReport};
use super::models::{JobUpdate, NewJob};

/// Service-level errors
#[derive(Debug)]
pub enum ServiceError {
    /// Store operation failed
    Store(StoreError),

    /// Path id is not a valid object id
    MalformedId(String),

    /// Payload failed validation
    Validation(String),

    /// Well-formed id with no matching job
    NotFound(ObjectId),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Store(e) => write!(f, "Store error: {}", e),
            ServiceError::MalformedId(id) => write!(f, "Malformed job id: {:?}", id),
            ServiceError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ServiceError::NotFound(id) => write!(f, "Job not found: {}", id),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e)
    }
}

impl From<MalformedId> for ServiceError {
    fn from(e: MalformedId) -> Self {
        ServiceError::MalformedId(e.0)
    }
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Store(e) => {
                error!("Store error: {}", e);
                HttpResponse::InternalServerError().json(ErrorResponse::message(
                    "Failed to process request",
                    "Database error occurred",
                ))
            }
            ServiceError::MalformedId(id) => {
                warn!("Malformed job id: {:?}", id);
                HttpResponse::BadRequest().json(ErrorResponse::message(
                    "Invalid job id",
                    format!("{:?} is not a valid job id", id),
                ))
            }
            ServiceError::Validation(msg) => {
                warn!("Validation error: {}", msg);
                HttpResponse::BadRequest().json(ErrorResponse::message("Validation failed", msg.clone()))
            }
            ServiceError::NotFound(id) => {
                warn!("Job not found: {}", id);
                HttpResponse::NotFound().json(ErrorResponse::message(
                    "Not found",
                    format!("Job with id {} not found", id),
                ))
            }
        }
    }
}

fn validation_summary(errors: &validator::ValidationErrors) -> Vec<String> {
    field_messages(errors)
        .into_iter()
        .flat_map(|(field, messages)| messages.into_iter().map(move |m| format!("{}: {}", field, m)))
        .collect()
}

/// Job service containing business logic
pub struct JobService {
    store: Arc<dyn JobStore>,
}

impl JobService {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self { store }
    }

    pub async fn list_jobs(&self) -> Result<Vec<Job>, ServiceError> {
        let jobs = self.store.list().await?;
        info!("Service: Listed {} jobs", jobs.len());
        Ok(jobs)
    }

    /// Create a single job
    ///
    /// The HTTP extractor already validated the payload; the check is repeated
    /// here so callers outside the HTTP layer get the same guarantees.
    pub async fn create_job(&self, job: &NewJob) -> Result<Job, ServiceError> {
        info!("Service: Creating job with title={}", job.title);

        job.validate()
            .map_err(|e| ServiceError::Validation(validation_summary(&e).join("; ")))?;

        let created = self.store.insert(job).await?;
        info!("Service: Job created successfully with id={}", created.id);
        Ok(created)
    }

    pub async fn get_job(&self, raw_id: &str) -> Result<Job, ServiceError> {
        let id: ObjectId = raw_id.parse()?;
        self.store
            .find(&id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Merge the supplied fields into an existing job
    ///
    /// # Returns
    /// - `Err(ServiceError::MalformedId)` - id is not an object id
    /// - `Err(ServiceError::NotFound)` - no job with this id
    pub async fn update_job(&self, raw_id: &str, update: &JobUpdate) -> Result<Job, ServiceError> {
        let id: ObjectId = raw_id.parse()?;

        update
            .validate()
            .map_err(|e| ServiceError::Validation(validation_summary(&e).join("; ")))?;

        if update.is_empty() {
            info!("Service: Empty update for job id={}, returning current record", id);
            return self.store.find(&id).await?.ok_or(ServiceError::NotFound(id));
        }

        let updated = self
            .store
            .update(&id, update)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        info!("Service: Job updated id={}", id);
        Ok(updated)
    }

    /// Delete a job. Deleting an id that does not exist is not an error.
    pub async fn delete_job(&self, raw_id: &str) -> Result<(), ServiceError> {
        let id: ObjectId = raw_id.parse()?;

        if self.store.delete(&id).await? {
            info!("Service: Job deleted id={}", id);
        } else {
            info!("Service: Delete requested for absent job id={}", id);
        }
        Ok(())
    }

    /// Bulk load jobs
    ///
    /// # Business Logic
    /// - Optionally empties the collection first
    /// - Validates each job individually and collects failures by title
    /// - Inserts only the valid jobs, in one statement
    pub async fn seed_jobs(&self, jobs: Vec<NewJob>, reset: bool) -> Result<SeedReport, ServiceError> {
        info!("Service: Seeding {} jobs (reset={})", jobs.len(), reset);

        let removed = if reset {
            let removed = self.store.delete_all().await?;
            info!("Service: Removed {} existing jobs", removed);
            removed
        } else {
            0
        };

        let mut valid_jobs = Vec::new();
        let mut errors = Vec::new();

        for job in jobs {
            match job.validate() {
                Ok(()) => valid_jobs.push(job),
                Err(validation_errors) => {
                    warn!("Service: Validation failed for job: {:?}", job.title);
                    errors.push(JobError {
                        title: job.title,
                        errors: validation_summary(&validation_errors),
                    });
                }
            }
        }

        let created = if valid_jobs.is_empty() {
            warn!("Service: No valid jobs to insert");
            Vec::new()
        } else {
            self.store.insert_many(&valid_jobs).await?
        };

        if errors.is_empty() {
            info!("Service: Seeding completed: {} jobs created", created.len());
        } else {
            warn!("Service: Seeding completed with {} validation errors", errors.len());
        }

        Ok(SeedReport {
            message: format!(
                "Seeding completed. {} created, {} failed",
                created.len(),
                errors.len()
            ),
            removed,
            created: created.len(),
            errors,
        })
    }
}
