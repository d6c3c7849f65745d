//! Tracing subscriber setup.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Install a stderr subscriber filtered at `default_level`
///
/// `RUST_LOG` takes precedence when set. Calling this twice is harmless;
/// the second install is ignored.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init();
}
