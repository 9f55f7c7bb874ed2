use std::{fs::File, io, path::PathBuf, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LogArg {
    /// Write log output to this file
    #[clap(long, global = true)]
    pub(crate) log_file: Option<PathBuf>,
    /// Log filter used when RUST_LOG is not set
    #[clap(long, global = true, default_value = "info")]
    pub(crate) log_level: String,
}

/// Where log output goes when no log file is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LogFallback {
    /// Write to stderr.
    Stderr,
    /// Do not install a logger. Used while the terminal is owned by the TUI.
    Discard,
}

pub(crate) fn init_logging(arg: &LogArg, fallback: LogFallback) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&arg.log_level)
            .with_context(|| format!("invalid log level: {}", arg.log_level))?,
    };
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match (&arg.log_file, fallback) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file: {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        (None, LogFallback::Stderr) => builder.with_writer(io::stderr).try_init(),
        (None, LogFallback::Discard) => return Ok(()),
    };
    result.map_err(|err| anyhow::anyhow!("failed to install logger: {err}"))
}
