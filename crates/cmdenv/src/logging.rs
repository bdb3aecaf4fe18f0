//! Logging setup for cmdenv binaries
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: filter directives (default: `cmdenv=info`)
//! - `CMDENV_LOG_FORMAT`: `json` for structured logs, anything else for pretty
//!
//! Logs go to stderr so stdout stays free for command output.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cmdenv_core::application::constants::{DEFAULT_LOG_FILTER, LOG_FORMAT_VARIABLE};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }

    /// Read the format from the process environment
    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_FORMAT_VARIABLE).ok().as_deref())
    }
}

/// Install the global subscriber
pub fn init(format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}
