use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "PAPERTIDY_LOG";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Install the stderr subscriber. User-facing output stays on stdout, so
/// diagnostics never interleave with `Deleting:` lines in a pipe.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
