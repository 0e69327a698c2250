//! Per-run file logging.
//!
//! One log file per process run, written next to the executable, with
//! `timestamp | LEVEL | stage | action | detail` lines. Error lines are
//! flushed eagerly. Image bytes, previews, and form values are never logged.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use time::OffsetDateTime;

static RUN_LOGGER: OnceLock<RunLogger> = OnceLock::new();

/// Append-only per-run log file.
pub struct RunLogger {
    file: Mutex<File>,
    path: PathBuf,
}

impl RunLogger {
    fn new() -> Result<Self, String> {
        let exe_path = std::env::current_exe()
            .map_err(|error| format!("unable to resolve executable path: {error}"))?;
        let exe_dir = exe_path
            .parent()
            .ok_or_else(|| "executable parent directory is missing".to_string())?
            .to_path_buf();

        let timestamp = timestamp_compact_utc();
        let path = exe_dir.join(format!("{timestamp}_log.txt"));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|error| format!("unable to create log file '{}': {error}", path.display()))?;

        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    fn write_line(&self, level: &str, stage: &str, action: &str, detail: &str) {
        let timestamp = timestamp_compact_utc();
        let line = format!("{timestamp} | {level} | {stage} | {action} | {detail}\n");

        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(line.as_bytes());
            if level == "ERROR" {
                let _ = file.flush();
            }
        }
    }
}

/// Creates the per-run log file. Idempotent.
///
/// # Errors
/// Returns a human-readable message when the log file cannot be created.
pub fn initialize_logger() -> Result<(), String> {
    if RUN_LOGGER.get().is_some() {
        return Ok(());
    }

    let logger = RunLogger::new()?;
    let path = logger.path.display().to_string();
    let _ = RUN_LOGGER.set(logger);
    log_info("logging", "file_created", &format!("log_file={path}"));
    Ok(())
}

/// Writes one INFO line when the logger is initialized.
pub fn log_info(stage: &str, action: &str, detail: &str) {
    if let Some(logger) = RUN_LOGGER.get() {
        logger.write_line("INFO", stage, action, detail);
    }
}

/// Writes one ERROR line (flushed eagerly) when the logger is initialized.
pub fn log_error(stage: &str, action: &str, detail: &str) {
    if let Some(logger) = RUN_LOGGER.get() {
        logger.write_line("ERROR", stage, action, detail);
    }
}

fn timestamp_compact_utc() -> String {
    let now = OffsetDateTime::now_utc();
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        now.year(),
        now.month() as u8,
        now.day(),
        now.hour(),
        now.minute(),
        now.second()
    )
}
