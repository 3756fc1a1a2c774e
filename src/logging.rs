use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[allow(dead_code)]
pub struct LogGuard(tracing_appender::non_blocking::WorkerGuard);

/// Initialize debug logging.
///
/// When `debug` is enabled, logs are appended to
/// `~/.config/oppfinder/oppfinder-debug.log` unless `debug_log_path`
/// overrides it. When disabled, this is a no-op. Logging to stderr is never
/// used: the terminal is owned by the TUI.
pub fn init(config: &crate::config::Config) -> Result<Option<LogGuard>> {
    if !config.debug {
        return Ok(None);
    }

    let log_path = resolve_log_path(config.debug_log_path.as_deref())?;
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);

    // Default: debug our crate, warn for everything else.
    let filter =
        EnvFilter::try_new("oppfinder=debug,warn").unwrap_or_else(|_| EnvFilter::new("debug"));

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

fn resolve_log_path(config_value: Option<&str>) -> Result<PathBuf> {
    let Some(raw) = config_value else {
        let config_path = crate::config::config_path()?;
        return Ok(config_path.with_file_name("oppfinder-debug.log"));
    };

    let path = PathBuf::from(expand_tilde(raw));
    if path.is_dir() {
        return Ok(path.join("oppfinder-debug.log"));
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

/// Best-effort redaction for Google API key patterns (`AIza` followed by a
/// long key body) before error bodies reach the log file.
pub fn redact_secrets(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut last = 0usize;
    let mut i = 0usize;

    while i < input.len() {
        if input[i..].starts_with("AIza") {
            let mut j = i + 4;
            while j < input.len() {
                match bytes[j] {
                    b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' => j += 1,
                    _ => break,
                }
            }

            // Require a minimum length to reduce false positives.
            if j.saturating_sub(i + 4) >= 16 {
                out.push_str(&input[last..i]);
                out.push_str("AIza***REDACTED***");
                last = j;
                i = j;
                continue;
            }
        }

        let ch = input[i..].chars().next().unwrap();
        i += ch.len_utf8();
    }

    out.push_str(&input[last..]);
    out
}
