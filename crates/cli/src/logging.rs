//! Diagnostic logging
//!
//! Logs go to stderr so they never interleave with the task list on stdout.
//! The filter is read from `LISTR_LOG` and defaults to `warn`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LISTR_LOG";

pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
