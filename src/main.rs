use anyhow::Result;

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    oppfinder::tui::run().await
}
