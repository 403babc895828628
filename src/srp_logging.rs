use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `SRP_LOG=debug`.
pub const LOG_ENV: &str = "SRP_LOG";

/// Installs the tracing subscriber. Logs go to stderr; stdout is reserved for the payload.
/// Logging is off unless [`LOG_ENV`] says otherwise.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
