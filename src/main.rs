use anyhow::Result;
use chronosage::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
