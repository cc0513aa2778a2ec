//! `env_logger` setup
//!
//! Library events are emitted through `tracing`, whose `log` feature forwards
//! them here when no subscriber is installed.

use env_logger::Env;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize logging once at startup.
///
/// Levels come from `RUST_LOG` and default to `warn`, e.g.
/// `RUST_LOG=uplynk_jwt=debug` to trace the signing pipeline.
pub fn init() {
    INIT_LOGGER.call_once(|| {
        env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
            .format_timestamp_micros()
            .init();
    });
}

/// Initialize logging for tests; repeated calls are harmless
pub fn init_test() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();
}
