//! Idempotent tracing bootstrap.
//!
//! Degrade paths in this workspace report through `tracing::warn!`, so
//! binaries and integration tests need a subscriber installed exactly once.
//! Repeat calls are no-ops, which keeps per-test initialization safe.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

/// Install a fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call from multiple places; only the first call installs.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        // A subscriber may already be set by the host application; that is
        // not an error from our side.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init();
        tracing::debug!("logging initialized");
    });
}
