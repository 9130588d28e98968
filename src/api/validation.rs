use actix_web::HttpResponse;
use serde::Serialize;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Error body shared by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

impl ErrorResponse {
    pub fn message(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            fields: serde_json::json!({ "message": message.into() }),
        }
    }
}

/// Flatten validation errors into `field -> [messages]`.
///
/// Nested structs use dotted paths, e.g. `company.contact_email`.
pub fn field_messages(errors: &ValidationErrors) -> Vec<(String, Vec<String>)> {
    let mut out = Vec::new();
    collect(None, errors, &mut out);
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

fn collect(prefix: Option<&str>, errors: &ValidationErrors, out: &mut Vec<(String, Vec<String>)>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(p) => format!("{}.{}", p, field),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("Validation error in field: {}", path))
                    })
                    .collect();
                out.push((path, messages));
            }
            ValidationErrorsKind::Struct(inner) => collect(Some(path.as_str()), inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(Some(format!("{}[{}]", path, index).as_str()), inner, out);
                }
            }
        }
    }
}

fn bad_request(body: ErrorResponse) -> actix_web::Error {
    actix_web::error::InternalError::from_response("", HttpResponse::BadRequest().json(body)).into()
}

/// Classify a JSON extraction failure into a client-facing message
fn payload_message(err: &str) -> String {
    if err.contains("EOF while parsing") {
        "Request body is empty. Expected JSON payload".to_string()
    } else if err.contains("Content type error") {
        "Content-Type must be application/json".to_string()
    } else if err.contains("overflow") || err.contains("larger than allowed") {
        "Request body is too large".to_string()
    } else if let Some(pos) = err.find("missing field") {
        err[pos..].split(" at line").next().unwrap_or("missing field").to_string()
    } else if err.contains("invalid type") {
        "A field has the wrong type".to_string()
    } else {
        "Invalid JSON format".to_string()
    }
}

/// JSON extractor config with standardized 400 responses for the whole service
pub fn json_config(limit: usize) -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| match err {
            actix_web_validator::Error::Validate(validation_errors) => {
                let mut fields = serde_json::Map::new();
                for (field, messages) in field_messages(&validation_errors) {
                    fields.insert(field, serde_json::json!({ "errors": messages }));
                }

                bad_request(ErrorResponse {
                    error: "Validation failed".to_string(),
                    fields: serde_json::Value::Object(fields),
                })
            }
            other => bad_request(ErrorResponse::message(
                "Request validation failed",
                payload_message(&other.to_string()),
            )),
        })
}
