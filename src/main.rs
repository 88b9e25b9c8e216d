use anyhow::Result;

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    whoseek::cli::run().await
}
