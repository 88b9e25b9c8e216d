use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[allow(dead_code)]
pub struct LogGuard(tracing_appender::non_blocking::WorkerGuard);

/// Initialize debug logging.
///
/// When `debug` is enabled, logs are appended to
/// `~/.config/whoseek/whoseek-debug.log` (or `debug_log_path`).
/// When `debug` is disabled, this is a no-op.
pub fn init(config: &crate::config::Config) -> Result<Option<LogGuard>> {
    if !config.debug {
        return Ok(None);
    }

    let log_path = resolve_log_path(config.debug_log_path.as_deref())?;
    ensure_parent_dir(&log_path)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);

    // Default: debug our crate, warn for everything else.
    let filter =
        EnvFilter::try_new("whoseek=debug,warn").unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(writer)
        .try_init()
        .ok(); // If already initialized (e.g., in tests), don't crash.

    tracing::info!(log_file = %log_path.display(), "debug logging enabled");

    Ok(Some(LogGuard(guard)))
}

fn default_log_path() -> Result<PathBuf> {
    let config_path = crate::config::config_path()?;
    Ok(config_path.with_file_name("whoseek-debug.log"))
}

fn resolve_log_path(config_value: Option<&str>) -> Result<PathBuf> {
    let Some(raw) = config_value else {
        return default_log_path();
    };

    let expanded = expand_tilde(raw);
    let path = PathBuf::from(expanded);

    // A trailing separator or an existing directory means "put the
    // default file name in there"; anything else is the file itself.
    if raw.ends_with(std::path::MAIN_SEPARATOR) || path.is_dir() {
        return Ok(path.join("whoseek-debug.log"));
    }

    Ok(path)
}

fn expand_tilde(raw: &str) -> String {
    if raw == "~" || raw.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            let suffix = raw.strip_prefix('~').unwrap_or("");
            return format!("{}{}", home.display(), suffix);
        }
    }
    raw.to_string()
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_file_path_is_used_verbatim() {
        let path = resolve_log_path(Some("/tmp/whoseek-test.log")).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/whoseek-test.log"));
    }

    #[test]
    fn directory_path_gets_default_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let raw = dir.path().to_str().unwrap().to_string();
        let path = resolve_log_path(Some(&raw)).unwrap();
        assert_eq!(path, dir.path().join("whoseek-debug.log"));
    }
}
