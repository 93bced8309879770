mod cli;
mod seed;
mod server;

pub mod routes;

pub mod catalog;
pub mod collections;
pub mod config;
pub mod error;
pub mod forms;
pub mod landing;
pub mod listings;
pub mod stats;
pub mod storage;
pub mod telemetry;

pub use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
