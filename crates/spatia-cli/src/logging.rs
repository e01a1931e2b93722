//! Logging initialization.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the level comes from the `-v` count:
/// none is `info`, one is `debug`, two or more is `trace`. Logs go to stderr
/// so `--json` output on stdout stays machine readable.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbose > 0)
                .with_writer(std::io::stderr),
        )
        .init();
}
