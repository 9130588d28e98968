use actix_web::{App, HttpServer, middleware, web};
use clap::Parser;
use sqlx::{Pool, Postgres};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

mod api;
mod cli;
mod config;
mod db;
mod logging;
mod shutdown;

use crate::api::{
    health::health_config,
    job::{JobService, NewJob, handlers::job_config},
    validation,
};
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::db::{InMemoryJobStore, JobStore, PgJobStore};
use crate::shutdown::ShutdownCoordinator;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let command = Cli::parse().command();

    let config = Config::from_env().map_err(io::Error::other)?;
    logging::init(&config.log_dir)?;

    match command {
        Command::Serve { in_memory } => serve(config, in_memory).await,
        Command::Migrate => migrate(&config).await,
        Command::Seed { file, reset } => seed(&config, &file, reset).await,
    }
}

async fn connect(config: &Config) -> io::Result<Pool<Postgres>> {
    let database_url = config.require_database_url().map_err(io::Error::other)?;
    db::connection::get_connection(database_url, config.max_db_connections)
        .await
        .map_err(io::Error::other)
}

/// Postgres store with migrations applied, or a fresh in-memory store
async fn open_store(config: &Config, in_memory: bool) -> io::Result<Arc<dyn JobStore>> {
    if in_memory {
        warn!("Using in-memory job store; data will not survive a restart");
        return Ok(Arc::new(InMemoryJobStore::new()));
    }

    let pool = connect(config).await?;
    db::migrations::run_migrations(&pool)
        .await
        .map_err(io::Error::other)?;
    Ok(Arc::new(PgJobStore::new(pool)))
}

async fn serve(config: Config, in_memory: bool) -> io::Result<()> {
    info!("Starting job-board application");
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max database connections: {}", config.max_db_connections);
    info!("  - Shutdown timeout: {:?}", config.shutdown_timeout);

    let store = open_store(&config, in_memory).await?;

    let job_service = web::Data::new(JobService::new(store.clone()));
    let store_data: web::Data<dyn JobStore> = web::Data::from(store.clone());
    let max_payload_size = config.max_payload_size;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(job_service.clone())
            .app_data(store_data.clone())
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(validation::json_config(max_payload_size))
            .configure(health_config)
            .configure(job_config)
    })
    .disable_signals()
    .shutdown_timeout(config.shutdown_timeout.as_secs())
    .bind((config.host.as_str(), config.port))?
    .run();

    info!("Server listening on http://{}:{}", config.host, config.port);

    let server_handle = server.handle();
    let server_task = actix_web::rt::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, store)
        .wait_for_shutdown()
        .await
}

async fn migrate(config: &Config) -> io::Result<()> {
    let pool = connect(config).await?;
    db::migrations::run_migrations(&pool)
        .await
        .map_err(io::Error::other)?;
    pool.close().await;
    Ok(())
}

async fn seed(config: &Config, file: &Path, reset: bool) -> io::Result<()> {
    let raw = tokio::fs::read(file).await?;
    let jobs: Vec<NewJob> = serde_json::from_slice(&raw)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("{}: {}", file.display(), e)))?;

    let store = open_store(config, false).await?;
    let service = JobService::new(store.clone());
    let result = service.seed_jobs(jobs, reset).await;
    store.close().await;

    let report = result.map_err(io::Error::other)?;
    info!("{}", report.message);
    println!("{}", serde_json::to_string_pretty(&report).map_err(io::Error::other)?);
    Ok(())
}
