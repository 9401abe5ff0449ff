//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `--verbose` enables debug events
/// from the diagnosis engine and the default shows warnings only.
pub fn init(verbose: bool) {
    let fallback = if verbose {
        "extdoctor_core=debug,extdoctor=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
