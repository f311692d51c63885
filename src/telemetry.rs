//! Tracing subscriber setup for the action binary.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_FILTER: &str = "info";
const MAX_FILTER_LEN: usize = 4096;

/// Builds the log filter.
///
/// `RUST_LOG` wins over the `log_level` input. Blank, oversized or invalid
/// directives are ignored so a bad value never stops a run; the fallback is
/// `info`.
#[must_use]
pub fn filter(rust_log: Option<&str>, log_level: Option<&str>) -> EnvFilter {
    [rust_log, log_level]
        .into_iter()
        .flatten()
        .find_map(parse_directives)
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

fn parse_directives(raw: &str) -> Option<EnvFilter> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.len() > MAX_FILTER_LEN {
        return None;
    }
    EnvFilter::try_new(trimmed).ok()
}

/// Installs a stderr `fmt` layer with the given filter.
///
/// Stdout is left to workflow commands such as `::error::`. Installing twice
/// is a no-op.
pub fn init(filter: EnvFilter) {
    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
