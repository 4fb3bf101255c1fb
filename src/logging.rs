//! Diagnostic logging to stderr via `tracing`.
//!
//! `RUST_LOG` takes precedence; otherwise only warnings are shown, or
//! everything down to `debug` with `--verbose`.

use std::{
    env,
    io::{self, IsTerminal},
};

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "srclist=debug" } else { "srclist=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(use_ansi(
            env::var_os("NO_COLOR").is_some(),
            io::stderr().is_terminal(),
        ))
        .with_target(false)
        .without_time()
        .try_init();
}

/// Escape codes only go to an interactive stderr, and never under `NO_COLOR`.
fn use_ansi(no_color: bool, stderr_is_terminal: bool) -> bool {
    stderr_is_terminal && !no_color
}
