//! Diagnostic logging on stderr.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` controls the level; without it only warnings are shown.
/// `verbose` forces debug output for the lanscan crates.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("lanscan=debug,lanscan_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Another subscriber may already be installed when embedded.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
