use tracing_subscriber::EnvFilter;

/// Environment variable read for the log filter
pub const LOG_ENV: &str = "BIT_BROWSE_LOG";

/// Install the global subscriber, writing to stderr so command output stays
/// clean
///
/// `filter` uses the `EnvFilter` directive syntax (`warn`, `bit_browse=debug`).
pub fn init_logging(filter: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| anyhow::anyhow!("invalid log filter '{filter}': {e}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))
}
