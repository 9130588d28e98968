pub mod connection;
pub mod job_repository;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod object_id;
pub mod store;

pub use job_repository::PgJobStore;
pub use memory::InMemoryJobStore;
pub use store::JobStore;
