use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    playscribe_cli::cli::run().await
}
