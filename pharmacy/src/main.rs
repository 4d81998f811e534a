#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code to prevent panics on bad input.
// Test code is allowed to use unwrap() for convenience.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
use std::io;

use pharmacy::{Inventory, config::AppConfig, menu::Menu};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Logs go to stderr so the menu on stdout stays readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pharmacy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Load configuration from environment variables
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Loaded configuration: mode={}, results_path={}, seed={:?}",
        config.mode,
        config.results_path.display(),
        config.seed
    );

    let rng = config
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    // Pre-load the demo batches so the listing is never empty on first run.
    let inventory = Inventory::with_sample_data(config.mode);

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut menu = Menu::new(stdin, stdout, inventory, config.results_path, rng);

    if let Err(e) = menu.run() {
        tracing::error!("Menu terminated: {e}");
        std::process::exit(1);
    }
}
