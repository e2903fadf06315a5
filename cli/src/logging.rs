use tracing_subscriber::EnvFilter;

/// Initialize structured logging on stderr.
///
/// stdout is the display, so logs must never go there. `RUST_LOG` takes
/// precedence over `default_filter`.
pub fn init_logging(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
