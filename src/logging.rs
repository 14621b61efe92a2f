// File-based logging, enabled with --debug
// Stderr is unusable while the TUI owns the terminal, so events go to a file

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;

use anyhow::Context;

/// Where `--debug` writes its log
pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("duopong-debug.log")
}

/// Install the tracing subscriber.
///
/// With `enabled == false` nothing is installed and every `tracing` macro is
/// a no-op. Otherwise the log file is truncated, a short header is written
/// and all events up to DEBUG are appended to it.
pub fn init(enabled: bool) -> anyhow::Result<Option<PathBuf>> {
    if !enabled {
        return Ok(None);
    }

    let path = log_file_path();
    init_at(&path)?;
    Ok(Some(path))
}

fn init_at(path: &Path) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    writeln!(file, "=== duopong debug log ===")?;
    writeln!(file, "Session started: {:?}", SystemTime::now())?;
    writeln!(file, "To monitor: tail -f {}", path.display())?;
    writeln!(file)?;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))?;

    Ok(())
}
