use serde::{Deserialize, Serialize};
use validator::Validate;

/// Company details embedded in every job posting.
///
/// All fields are optional so a posting can carry a partial company record,
/// and so the same type doubles as a patch during updates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Contact email must be a valid email address"))]
    pub contact_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}

impl Company {
    /// Overwrite the fields present in `patch`, keep the rest
    pub fn merge(&mut self, patch: &Company) {
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }
        if let Some(email) = &patch.contact_email {
            self.contact_email = Some(email.clone());
        }
        if let Some(phone) = &patch.contact_phone {
            self.contact_phone = Some(phone.clone());
        }
    }
}

/// Payload for creating a job posting
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct NewJob {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    #[serde(rename = "type")]
    pub job_type: String,

    pub description: String,

    #[serde(default)]
    #[validate(nested)]
    pub company: Option<Company>,
}

/// Payload for a partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct JobUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub company: Option<Company>,
}

impl JobUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.job_type.is_none()
            && self.description.is_none()
            && self.company.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_job(value: serde_json::Value) -> NewJob {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn complete_payload_is_valid() {
        let job = new_job(json!({
            "title": "Software Engineer",
            "type": "Full-time",
            "description": "Build and maintain backend services.",
            "company": {
                "name": "Helsinki Tech",
                "contactEmail": "hr@helsinkitech.fi",
                "contactPhone": "1234567890"
            }
        }));

        assert!(job.validate().is_ok());
        assert_eq!(job.job_type, "Full-time");
        assert_eq!(
            job.company.unwrap().contact_email.as_deref(),
            Some("hr@helsinkitech.fi")
        );
    }

    #[test]
    fn company_may_be_missing_or_partial() {
        let job = new_job(json!({"title": "Tester", "type": "Contract", "description": "QA"}));
        assert!(job.validate().is_ok());
        assert!(job.company.is_none());

        let job = new_job(json!({
            "title": "Tester",
            "type": "Contract",
            "description": "QA",
            "company": {"name": "Quality Corp"}
        }));
        assert!(job.validate().is_ok());
    }

    #[test]
    fn empty_title_is_rejected() {
        let job = new_job(json!({"title": "", "type": "Contract", "description": "QA"}));
        let errors = job.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn invalid_contact_email_is_rejected() {
        let job = new_job(json!({
            "title": "Tester",
            "type": "Contract",
            "description": "QA",
            "company": {"contactEmail": "not-an-email"}
        }));
        assert!(job.validate().is_err());
    }

    #[test]
    fn missing_required_field_fails_to_deserialize() {
        let result = serde_json::from_value::<NewJob>(json!({"type": "Contract", "description": "QA"}));
        assert!(result.is_err());
    }

    #[test]
    fn empty_update_is_valid_and_empty() {
        let update: JobUpdate = serde_json::from_value(json!({})).unwrap();
        assert!(update.validate().is_ok());
        assert!(update.is_empty());
    }

    #[test]
    fn update_with_blank_title_is_rejected() {
        let update: JobUpdate = serde_json::from_value(json!({"title": ""})).unwrap();
        assert!(update.validate().is_err());
    }

    #[test]
    fn company_merge_keeps_unspecified_fields() {
        let mut company = Company {
            name: Some("Nordic Web".into()),
            contact_email: Some("jobs@nordicweb.fi".into()),
            contact_phone: Some("0987654321".into()),
        };
        company.merge(&Company {
            contact_phone: Some("555111222".into()),
            ..Company::default()
        });

        assert_eq!(company.name.as_deref(), Some("Nordic Web"));
        assert_eq!(company.contact_email.as_deref(), Some("jobs@nordicweb.fi"));
        assert_eq!(company.contact_phone.as_deref(), Some("555111222"));
    }
}
