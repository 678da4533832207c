use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    roadcheck_cli::main_entry().await
}
