// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, load config, build the API client
//   and hand it to the UI loop.
// - Returns `anyhow::Result` so startup errors print with their context.

use kisan_cli::{config::ClientConfig, ui::main_menu, ApiClient};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the prompts.
    // Verbosity comes from `KISAN_LOG` (e.g. `KISAN_LOG=debug`).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("KISAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Backend address from ~/.kisan/config.json, overridden by
    // `KISAN_API_URL` / `KISAN_TIMEOUT_SECS`. See `ClientConfig::load`.
    let config = ClientConfig::load()?;
    tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "loaded config");
    let api = ApiClient::new(&config)?;

    // Blocks until the user exits.
    main_menu(api)?;
    Ok(())
}
