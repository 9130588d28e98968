use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::api::job::models::{JobUpdate, NewJob};
use crate::db::models::Job;
use crate::db::object_id::ObjectId;
use crate::db::store::{JobStore, StoreError};

/// Job store kept in process memory. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryJobStore {
    jobs: RwLock<Vec<Job>>,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn build(job: &NewJob) -> Job {
        let now = chrono::Utc::now().naive_utc();
        Job {
            id: ObjectId::new(),
            title: job.title.clone(),
            job_type: job.job_type.clone(),
            description: job.description.clone(),
            company: job.company.clone().unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn list(&self) -> Result<Vec<Job>, StoreError> {
        Ok(self.jobs.read().await.clone())
    }

    async fn insert(&self, job: &NewJob) -> Result<Job, StoreError> {
        let job = Self::build(job);
        debug!("Inserting job in memory: id={}", job.id);
        self.jobs.write().await.push(job.clone());
        Ok(job)
    }

    async fn insert_many(&self, jobs: &[NewJob]) -> Result<Vec<Job>, StoreError> {
        let created: Vec<Job> = jobs.iter().map(Self::build).collect();
        self.jobs.write().await.extend(created.iter().cloned());
        Ok(created)
    }

    async fn find(&self, id: &ObjectId) -> Result<Option<Job>, StoreError> {
        Ok(self.jobs.read().await.iter().find(|j| &j.id == id).cloned())
    }

    async fn update(&self, id: &ObjectId, update: &JobUpdate) -> Result<Option<Job>, StoreError> {
        let mut jobs = self.jobs.write().await;
        let Some(job) = jobs.iter_mut().find(|j| &j.id == id) else {
            return Ok(None);
        };
        job.apply(update);
        job.updated_at = chrono::Utc::now().naive_utc();
        Ok(Some(job.clone()))
    }

    async fn delete(&self, id: &ObjectId) -> Result<bool, StoreError> {
        let mut jobs = self.jobs.write().await;
        let before = jobs.len();
        jobs.retain(|j| &j.id != id);
        Ok(jobs.len() < before)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut jobs = self.jobs.write().await;
        let removed = jobs.len() as u64;
        jobs.clear();
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::job::models::Company;

    fn new_job(title: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            job_type: "Full-time".into(),
            description: "Build things.".into(),
            company: Some(Company {
                name: Some("Helsinki Tech".into()),
                contact_email: Some("hr@helsinkitech.fi".into()),
                contact_phone: Some("1234567890".into()),
            }),
        }
    }

    #[actix_web::test]
    async fn list_preserves_insertion_order() {
        let store = InMemoryJobStore::new();
        store.insert_many(&[new_job("first"), new_job("second")]).await.unwrap();
        store.insert(&new_job("third")).await.unwrap();

        let titles: Vec<String> = store.list().await.unwrap().into_iter().map(|j| j.title).collect();
        assert_eq!(titles, ["first", "second", "third"]);
    }

    #[actix_web::test]
    async fn insert_assigns_distinct_ids() {
        let store = InMemoryJobStore::new();
        let a = store.insert(&new_job("a")).await.unwrap();
        let b = store.insert(&new_job("b")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.find(&a.id).await.unwrap().unwrap().title, "a");
    }

    #[actix_web::test]
    async fn update_merges_and_refreshes_timestamp() {
        let store = InMemoryJobStore::new();
        let job = store.insert(&new_job("a")).await.unwrap();

        let update = JobUpdate {
            company: Some(Company {
                contact_phone: Some("555111222".into()),
                ..Company::default()
            }),
            ..JobUpdate::default()
        };
        let updated = store.update(&job.id, &update).await.unwrap().unwrap();

        assert_eq!(updated.title, "a");
        assert_eq!(updated.company.name.as_deref(), Some("Helsinki Tech"));
        assert_eq!(updated.company.contact_phone.as_deref(), Some("555111222"));
        assert!(updated.updated_at >= job.updated_at);
        assert_eq!(updated.created_at, job.created_at);
    }

    #[actix_web::test]
    async fn update_of_unknown_id_returns_none() {
        let store = InMemoryJobStore::new();
        let result = store.update(&ObjectId::new(), &JobUpdate::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[actix_web::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = InMemoryJobStore::new();
        let job = store.insert(&new_job("a")).await.unwrap();

        assert!(store.delete(&job.id).await.unwrap());
        assert!(!store.delete(&job.id).await.unwrap());
        assert!(store.find(&job.id).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn delete_all_empties_the_collection() {
        let store = InMemoryJobStore::new();
        store.insert_many(&[new_job("a"), new_job("b")]).await.unwrap();
        assert_eq!(store.delete_all().await.unwrap(), 2);
        assert!(store.list().await.unwrap().is_empty());
    }
}
