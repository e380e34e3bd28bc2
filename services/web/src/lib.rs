mod assets;
mod cli;
mod infra;
mod pages;
mod routes;
mod score;
mod server;

use lendwise::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
