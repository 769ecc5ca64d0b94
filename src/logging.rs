use anyhow::Result;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DIRECTIVE: &str = "info";

/// Install the process-wide subscriber. Call once, from `main`.
///
/// Single-line records go to stderr with timestamp, target, level and
/// message. `RUST_LOG` overrides the default `info` filter and
/// `LOG_FORMAT=json` switches to JSON lines.
pub fn init() -> Result<()> {
    let (filter, rejected) = env_filter(std::env::var("RUST_LOG").ok().as_deref());

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_target(true),
            )
            .try_init()?;
    }

    if let Some(reason) = rejected {
        warn!("Ignoring invalid RUST_LOG, logging at '{DEFAULT_DIRECTIVE}': {reason}");
    }

    Ok(())
}

/// Filter for a `RUST_LOG` value. An unset or blank value selects the
/// default; an unparsable one also does, and its parse error is returned.
fn env_filter(rust_log: Option<&str>) -> (EnvFilter, Option<String>) {
    match rust_log.filter(|v| !v.trim().is_empty()).map(EnvFilter::try_new) {
        None => (EnvFilter::new(DEFAULT_DIRECTIVE), None),
        Some(Ok(filter)) => (filter, None),
        Some(Err(e)) => (EnvFilter::new(DEFAULT_DIRECTIVE), Some(e.to_string())),
    }
}
