use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured log filter.
const LOG_ENV: &str = "CLOCKBURN_LOG";

/// Install the stderr subscriber. `CLOCKBURN_LOG` wins over the configured
/// filter; an unparsable filter falls back to `warn`.
pub fn init(configured: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}
