//! Binary entry point: resolve configuration, start file logging, queue the
//! initial load and drive the Ratatui event loop until the user exits.
use bookbase::{logging, run_app, App, Config, Remote, UreqTransport};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(&config.log_file)?;
    tracing::info!(api = %config.api_url, "starting bookbase");

    let remote = Remote::new(&config, Box::new(UreqTransport::new()));
    let mut app = App::new(remote);
    run_app(&mut app)
}
