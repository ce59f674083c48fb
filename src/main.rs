// Entrypoint for the fitness tracker.
// - Keeps `main` small: set up logging, load configuration and hand the
//   session to the UI loop.
// - Returns `anyhow::Result` so any setup failure is reported with context.

use anyhow::Context;
use fitness_cli::{config::Config, session::FitnessSystem, ui::main_menu};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr and default to `warn` so they do not interleave
    // with the menus. Use RUST_LOG=debug to see store activity.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Data directory comes from `FITNESS_DATA_DIR` or defaults to the
    // current directory. See `config::Config::from_env`.
    let config = Config::from_env().context("Failed to load configuration")?;
    info!(data_dir = %config.data_dir.display(), "configuration loaded");

    let system = FitnessSystem::from_config(&config);

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(system, &config)?;
    Ok(())
}
