/// Tracing setup: structured logs to stderr, never to stdout.
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `--debug` enables this crate's debug
/// events and everything else stays at `warn`.
pub fn init(debug: bool) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else if debug {
        EnvFilter::new("warn,dbperms=debug")
    } else {
        EnvFilter::new("warn")
    };

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(err) = init_result {
        tracing::warn!(error = %err, "tracing already initialized; skipping setup");
    }
}
