//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "vaultprobe=warn";
const VERBOSE_FILTER: &str = "vaultprobe=debug";

/// Installs the global subscriber. `RUST_LOG` takes precedence over the
/// `--verbose` default.
pub fn init(verbose: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

const fn fallback_filter(verbose: bool) -> &'static str {
    if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }
}
