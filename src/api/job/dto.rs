use serde::Serialize;

/// Validation failure for one job in a bulk load
#[derive(Debug, Serialize)]
pub struct JobError {
    pub title: String,
    pub errors: Vec<String>,
}

/// Summary of a seeding run
#[derive(Debug, Serialize)]
pub struct SeedReport {
    pub message: String,
    pub removed: u64,
    pub created: usize,
    pub errors: Vec<JobError>,
}
