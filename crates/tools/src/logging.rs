use std::io;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "warn";

/// Builds the event filter. An explicit directive beats `RUST_LOG`.
pub fn build_filter(directive: Option<&str>) -> Result<EnvFilter> {
    match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log filter '{directive}'")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Installs a stderr fmt subscriber so stdout stays reserved for the level output.
pub fn init_tracing(directive: Option<&str>) -> Result<()> {
    tracing_subscriber::registry()
        .with(build_filter(directive)?)
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(())
}
