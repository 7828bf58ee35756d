use tracing_subscriber::EnvFilter;

/// Initialises the global tracing subscriber. A `RUST_LOG` environment
/// setting takes precedence over the level passed on the command line.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
