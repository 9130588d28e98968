use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

use crate::api::job::models::{Company, JobUpdate};
use crate::db::object_id::ObjectId;
use crate::db::store::StoreError;

/// Database representation of a job with all columns
#[derive(Debug, FromRow)]
pub struct JobRow {
    pub id: String,
    pub title: String,
    pub job_type: String,
    pub description: String,
    pub company: Json<Company>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A stored job posting, as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: ObjectId,
    pub title: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub description: String,
    pub company: Company,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Job {
    /// Merge the fields present in `update` into this record
    pub fn apply(&mut self, update: &JobUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(job_type) = &update.job_type {
            self.job_type = job_type.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(company) = &update.company {
            self.company.merge(company);
        }
    }
}

impl TryFrom<JobRow> for Job {
    type Error = StoreError;

    fn try_from(row: JobRow) -> Result<Self, Self::Error> {
        let id = row.id.parse().map_err(|_| StoreError::Corrupt {
            id: row.id.clone(),
            reason: "id is not a valid object id".to_string(),
        })?;

        Ok(Job {
            id,
            title: row.title,
            job_type: row.job_type,
            description: row.description,
            company: row.company.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(id: &str) -> JobRow {
        let now = chrono::Utc::now().naive_utc();
        JobRow {
            id: id.to_string(),
            title: "Software Engineer".into(),
            job_type: "Full-time".into(),
            description: "Build and maintain backend services.".into(),
            company: Json(Company {
                name: Some("Helsinki Tech".into()),
                contact_email: Some("hr@helsinkitech.fi".into()),
                contact_phone: None,
            }),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_converts_to_job() {
        let job = Job::try_from(row("65a1f0c2e4b0a1b2c3d4e5f6")).unwrap();
        assert_eq!(job.id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(job.company.name.as_deref(), Some("Helsinki Tech"));
    }

    #[test]
    fn row_with_bad_id_is_corrupt() {
        assert!(matches!(
            Job::try_from(row("not-an-id")),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let job = Job::try_from(row("65a1f0c2e4b0a1b2c3d4e5f6")).unwrap();
        let value = serde_json::to_value(&job).unwrap();

        assert_eq!(value["id"], json!("65a1f0c2e4b0a1b2c3d4e5f6"));
        assert_eq!(value["type"], json!("Full-time"));
        assert_eq!(value["company"]["contactEmail"], json!("hr@helsinkitech.fi"));
        assert!(value["company"].get("contactPhone").is_none());
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn apply_only_touches_supplied_fields() {
        let mut job = Job::try_from(row("65a1f0c2e4b0a1b2c3d4e5f6")).unwrap();
        let before = job.clone();

        job.apply(&JobUpdate {
            description: Some("Updated description".into()),
            job_type: Some("Part-time".into()),
            ..JobUpdate::default()
        });

        assert_eq!(job.description, "Updated description");
        assert_eq!(job.job_type, "Part-time");
        assert_eq!(job.title, before.title);
        assert_eq!(job.company, before.company);
        assert_eq!(job.id, before.id);
    }
}
