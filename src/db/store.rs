use async_trait::async_trait;

use crate::api::job::models::{JobUpdate, NewJob};
use crate::db::models::Job;
use crate::db::object_id::ObjectId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("corrupt record {id}: {reason}")]
    Corrupt { id: String, reason: String },
}

/// Persistence seam for the job collection.
///
/// Every method touches at most one document, except the bulk helpers used
/// for seeding. Implementations assign ids and timestamps.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// All jobs in insertion order
    async fn list(&self) -> Result<Vec<Job>, StoreError>;

    async fn insert(&self, job: &NewJob) -> Result<Job, StoreError>;

    async fn insert_many(&self, jobs: &[NewJob]) -> Result<Vec<Job>, StoreError>;

    async fn find(&self, id: &ObjectId) -> Result<Option<Job>, StoreError>;

    /// Merge `update` into the job; `None` when no job has this id
    async fn update(&self, id: &ObjectId, update: &JobUpdate) -> Result<Option<Job>, StoreError>;

    /// Returns whether a job was removed
    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError>;

    async fn delete_all(&self) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    async fn close(&self) {}
}
