use anyhow::{anyhow, Context};
use tracing_subscriber::EnvFilter;

/// Installs the global `fmt` subscriber, writing to stderr.
///
/// `filter` uses `RUST_LOG` directive syntax. Only binaries should call this.
pub fn init(filter: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter).with_context(|| format!("invalid log filter {filter:?}"))?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
