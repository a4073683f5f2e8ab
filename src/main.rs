//! Binary entry point: read the configuration, install logging on stderr,
//! open the store, and run the menu on stdin/stdout until the user exits.
use std::io;

use anyhow::Context;
use crossterm::tty::IsTty;
use shlist::{open_store, Config, Menu};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();

    let conn = open_store(&config.db_path)
        .with_context(|| format!("failed to open store at {}", config.db_path.display()))?;
    info!(path = %config.db_path.display(), "store ready");

    let color = io::stdout().is_tty();
    let interactive = color && io::stdin().is_tty();
    let mut menu = Menu::new(conn, io::stdin().lock(), io::stdout())
        .with_color(color)
        .with_interactive(interactive);
    menu.run().context("menu loop failed")?;

    // Dropping the menu closes the connection.
    Ok(())
}
