mod app;
mod cli;

pub use title_search::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
