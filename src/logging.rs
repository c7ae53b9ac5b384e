use std::{env::var, path::PathBuf};

use eyre::WrapErr;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

pub const DEFAULT_FILTER: &str = "info,crossthrow=debug";
pub const LOG_FILE_NAME: &str = "crossthrow.log";

/// Logging settings, normally taken from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directives applied to every layer.
    pub filter: String,
    /// Also write a daily rolling log file here when set.
    pub directory: Option<PathBuf>,
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            directory: None,
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Reads `CROSSTHROW_LOG` (falling back to `RUST_LOG`), `CROSSTHROW_LOG_DIR` and
    /// `CROSSTHROW_LOG_ANSI`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        if let Some(filter) = non_empty("CROSSTHROW_LOG").or_else(|| non_empty("RUST_LOG")) {
            config.filter = filter;
        }
        config.directory = non_empty("CROSSTHROW_LOG_DIR").map(PathBuf::from);
        if let Some(ansi) = non_empty("CROSSTHROW_LOG_ANSI") {
            config.ansi = !matches!(
                ansi.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }
        config
    }
}

/// Installs the global subscriber and routes panics through it.
///
/// Logs go to stderr, plus the rolling file when a directory is configured. Stdout is left
/// alone since caught signals are reported there.
pub fn init(config: &LogConfig) -> eyre::Result<()> {
    let stderr_filter = EnvFilter::try_new(&config.filter)
        .wrap_err_with(|| format!("invalid log filter {:?}", config.filter))?;

    let file_layer = match &config.directory {
        Some(directory) => {
            let file_filter = EnvFilter::try_new(&config.filter)
                .wrap_err_with(|| format!("invalid log filter {:?}", config.filter))?;
            let file_appender = tracing_appender::rolling::daily(directory, LOG_FILE_NAME);
            let (nb_file, guard) = tracing_appender::non_blocking(file_appender);
            // the library has no teardown hook to flush from
            std::mem::forget(guard);
            Some(
                fmt::Layer::default()
                    .with_level(true)
                    .with_ansi(false)
                    .with_writer(nb_file)
                    .with_filter(file_filter),
            )
        }
        None => None,
    };

    Registry::default()
        .with(
            fmt::Layer::default()
                .with_level(true)
                .with_ansi(config.ansi)
                .with_writer(std::io::stderr)
                .with_filter(stderr_filter),
        )
        .with(file_layer)
        .try_init()
        .wrap_err("cannot install tracing subscriber")?;

    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        tracing_panic::panic_hook(panic_info);
        prev_hook(panic_info);
    }));

    Ok(())
}
