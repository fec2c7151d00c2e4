//! Logging setup
//!
//! Logs go to stderr; stdout is reserved for receipt text.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the console logger
///
/// `RUST_LOG` wins over `level` when set. `json_format` switches to
/// line-delimited JSON for log collectors.
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_writer(std::io::stderr);
        subscriber.with(console_layer).try_init()?;
    } else {
        let console_layer = fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);
        subscriber.with(console_layer).try_init()?;
    }

    Ok(())
}
