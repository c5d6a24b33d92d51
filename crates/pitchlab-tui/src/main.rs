// Pitch report entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Scan the data directory and build the canonical table
// 4. Run the TUI until the user quits

use pitchlab_core::config;
use pitchlab_tui::app::AppState;
use pitchlab_tui::tui;

use anyhow::Context;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("pitchlab starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: data dir={}, export dir={}, startup mode={:?}",
        config.data.dir, config.export.dir, config.display.mode
    );
    if config.access_password().is_none() {
        warn!("no [access] password configured; the dashboard is open");
    }

    let app = AppState::load(config);
    info!(
        "{} pitches for {} pitchers ready",
        app.table.len(),
        app.pitchers.len()
    );

    tui::run(app).await?;

    info!("pitchlab shut down");
    Ok(())
}

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("pitchlab.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("pitchlab=info,pitchlab_core=info,pitchlab_tui=info,warn")
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
