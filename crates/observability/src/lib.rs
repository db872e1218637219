//! JSON logging setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Initialize JSON logging for `service`, filtered via `RUST_LOG` with an
/// `info` default. Safe to call more than once; later calls are no-ops.
pub fn init(service: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(false)
        .try_init()
        .is_ok();

    // First event ties the log stream to the emitting service.
    if installed {
        tracing::info!(service, "logging initialized");
    }
}
