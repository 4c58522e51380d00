//! Diagnostics via `RUST_LOG` to stderr. Product output stays on stdout.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// `RUST_LOG` wins; otherwise `-v` raises the default `warn` to info, `-vv` to debug.
pub fn init(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "replan_core=info,replan=info",
        _ => "replan_core=debug,replan=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
