//! Request log
//!
//! Appends one NDJSON line per executed route, containing the full
//! response envelope. Logging is best-effort: the runner reports write
//! failures as warnings and keeps going.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use tracing::debug;

use crate::chain::store::ResponseEnvelope;
use crate::error::ApiCheckError;

/// A single request log entry.
#[derive(Debug, Serialize)]
struct LogEntry<'a> {
    /// ISO 8601 timestamp.
    timestamp: String,
    /// The captured response envelope.
    envelope: &'a ResponseEnvelope,
}

/// Writer for the per-route request log.
///
/// Writes NDJSON (newline-delimited JSON) lines to the configured file.
/// Thread-safe via internal `Mutex`.
pub struct RequestLog {
    // std::sync::Mutex is intentional: held briefly for buffered write +
    // flush, never across .await points.
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl RequestLog {
    /// Opens the log file in append mode, creating parent directories as
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be opened.
    pub fn create(path: &Path) -> Result<Self, ApiCheckError> {
        if path.as_os_str().is_empty() {
            return Err(ApiCheckError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "request log path is empty",
            )));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        debug!(path = %path.display(), "request log opened");

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Records one executed route's envelope as a single NDJSON line.
    ///
    /// A poisoned lock is recovered rather than propagated: the log must
    /// never take down a run.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or I/O fails.
    pub fn record(&self, envelope: &ResponseEnvelope) -> Result<(), ApiCheckError> {
        let entry = LogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            envelope,
        };

        let line = serde_json::to_string(&entry)?;
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        writeln!(writer, "{line}")?;
        writer.flush()?;
        drop(writer);

        Ok(())
    }

    /// Returns the path to the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for RequestLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLog")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
