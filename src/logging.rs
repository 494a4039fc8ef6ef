//! Logging initialization.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "parcel_tracker=info";

static INIT_ONCE: Once = Once::new();

/// Install a fmt subscriber filtered by `RUST_LOG` (default `parcel_tracker=info`).
///
/// Safe to call more than once; only the first call has an effect. If another
/// global subscriber is already set, that one is kept.
pub fn init() {
    INIT_ONCE.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        // keep a subscriber the host application installed first
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init();
    });
}
