use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset: warnings from dependencies,
/// run milestones from this crate.
pub const DEFAULT_FILTER: &str = "warn,site_snapshot=info";

/// Installs a stderr `fmt` subscriber. Per-asset failures show up here as
/// warnings while progress goes to stdout.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
