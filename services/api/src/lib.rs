mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use plan_maker::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
