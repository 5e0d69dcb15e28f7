//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr so they never mix with report output on stdout.

use std::io::IsTerminal;

use anyhow::Result;
use clap::ValueEnum;
use tracing::metadata::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
}

/// Level used when neither `--log-level` nor `RUST_LOG` is given.
pub const DEFAULT_LOG_LEVEL: Level = Level::WARN;

fn default_filter(level: Level) -> Result<EnvFilter> {
    let directive = level.to_string().to_ascii_lowercase();
    Ok(EnvFilter::builder()
        .with_default_directive(level.into())
        .parse(directive)?)
}

/// Build the filter: a valid `RUST_LOG` wins, otherwise `log_level`.
pub fn env_filter(log_level: Option<Level>) -> Result<EnvFilter> {
    let fallback = default_filter(log_level.unwrap_or(DEFAULT_LOG_LEVEL))?;
    let Ok(directive) = std::env::var("RUST_LOG") else {
        return Ok(fallback);
    };
    match EnvFilter::builder().parse(&directive) {
        Ok(filter) => Ok(filter),
        Err(err) => {
            eprintln!("invalid log filter: {err}");
            eprintln!("falling back to default logging");
            Ok(fallback)
        }
    }
}

fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}

pub fn setup_logging(log_level: Option<Level>, log_format: LogFormat) -> Result<()> {
    let env_filter = env_filter(log_level)?;
    let use_color = use_color();

    let compact = tracing_subscriber::fmt::Layer::new()
        .compact()
        .without_time()
        .with_target(false)
        .with_ansi(use_color)
        .with_writer(std::io::stderr);
    let pretty = tracing_subscriber::fmt::Layer::new()
        .pretty()
        .without_time()
        .with_ansi(use_color)
        .with_writer(std::io::stderr);

    let subscriber = tracing_subscriber::registry()
        .with((log_format == LogFormat::Compact).then_some(compact))
        .with((log_format == LogFormat::Pretty).then_some(pretty))
        .with(env_filter);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
