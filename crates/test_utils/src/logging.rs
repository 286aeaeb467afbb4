//! Test logging
//!
//! Installs a fmt subscriber once per test binary. Filter with `RUST_LOG`,
//! e.g. `RUST_LOG=domain_claims=debug`.

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Another harness may already have installed a global subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer().with_target(true))
        .try_init();
});

/// Initializes test tracing; safe to call from every test
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
