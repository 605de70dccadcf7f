// 📝 Logging - tracing-subscriber setup for the binaries
//
// Level comes from RUST_LOG (default: info), e.g.
//   RUST_LOG=debug
//   RUST_LOG=plate_dating=trace

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize logging for a binary. Call once, at startup.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Verbose logging captured by the test harness; safe to call repeatedly
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
