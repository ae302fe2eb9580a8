//! Tracing setup shared by the web server, worker and one-shot commands.

use std::io::IsTerminal;

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset. Request spans from tower-http are
/// useful while serving; driver chatter from mongodb is not.
const DEFAULT_FILTER: &str = "info,sentiment_garage=debug,tower_http=debug,mongodb=warn";

/// Install the global subscriber. Safe to call more than once.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;
    let ansi = std::io::stderr().is_terminal();

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(!ansi)
        .with_file(ansi)
        .with_line_number(ansi)
        .with_filter(filter);

    tracing_subscriber::registry().with(layer).try_init()?;
    tracing::debug!(ansi, "tracing initialised");
    Ok(())
}
