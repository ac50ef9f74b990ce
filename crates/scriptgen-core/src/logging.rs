//! Tracing setup: append to a log file under the XDG state dir, or to stderr.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or invalid.
const DEFAULT_FILTER: &str = "info,scriptgen=debug,scriptgen_core=debug";

/// `~/.local/state/scriptgen/scriptgen.log`.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("scriptgen")?;
    Ok(xdg_dirs.get_state_home().join("scriptgen.log"))
}

fn install<W>(writer: W) -> Result<()>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))
}

/// Log to the XDG state file. Returns Err (nothing installed) when the file
/// cannot be opened, so the caller can fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;

    install(Mutex::new(file))?;
    tracing::info!("scriptgen logging initialized at {}", path.display());
    Ok(())
}

/// Log to stderr only.
pub fn init_logging_stderr() -> Result<()> {
    install(std::io::stderr)
}
