use anyhow::Result;

use sabzi::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is initialized in App::run() with buffer support
    App::new().run().await?;

    Ok(())
}
