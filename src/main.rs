// Main entry point for YouTube Jam
// This is where the application starts

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use ytjam::config::{AppConfig, Cli};
use ytjam::logging::{self, LogTarget};
use ytjam::player::jukebox::Jukebox;
use ytjam::ui::app::JamApp;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_cli(Cli::parse());

    let target = if config.print_only {
        LogTarget::Stderr
    } else {
        LogTarget::File(config.log_file.clone())
    };
    logging::init(&target)?;

    info!("YouTube Jam v{} starting", env!("CARGO_PKG_VERSION"));

    // Queue whatever was passed on the command line, skipping bad links
    let mut jukebox = Jukebox::new();
    for url in &config.seed_urls {
        if let Err(e) = jukebox.submit_text(url) {
            warn!(url = %url, error = %e, "skipping startup link");
        }
    }

    if config.print_only {
        let snapshot = jukebox.queue().snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    // Run the TUI event loop
    let mut app = JamApp::new(jukebox);
    app.run().await?;

    Ok(())
}
