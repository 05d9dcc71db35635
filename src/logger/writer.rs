//! Log writer module
//!
//! Installs the global `tracing` subscriber. Lifecycle and error messages go to the
//! `calc_server` target, access log lines to the `access` target, both through the
//! same fmt layer on stdout.

use std::sync::OnceLock;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Target used for access log lines
pub const ACCESS_TARGET: &str = "access";

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Build the filter: `RUST_LOG` wins, otherwise the configured level for this crate and the access log
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("calc_server={level},{ACCESS_TARGET}=info"))
    })
}

/// Initialize the global subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: &str) -> Result<(), String> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }

    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .map_err(|e| format!("Failed to install log subscriber: {e}"))?;

    let _ = INITIALIZED.set(());
    Ok(())
}
