//! stderr logging via `tracing-subscriber`.

use tracing_subscriber::{fmt, EnvFilter};

/// `RUST_LOG` wins; otherwise `debug` when asked for, else `info`.
pub fn init(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
