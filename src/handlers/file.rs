//! File sink for per-channel local debug logs

use crate::core::{Handler, LogRecord, RecordFormat, Result, RouterError, Severity};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Appends line-formatted records to a single file, with a per-sink minimum
/// severity so e.g. a `redis` channel file can carry warnings only.
pub struct FileHandler {
    writer: Mutex<BufWriter<File>>,
    threshold: Severity,
    name: String,
}

impl FileHandler {
    pub fn new(path: impl Into<PathBuf>, threshold: Severity) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    RouterError::file_sink(path.display().to_string(), e.to_string())
                })?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            threshold,
            name: format!("file:{}", path.display()),
        })
    }
}

impl Handler for FileHandler {
    fn handle(&self, record: &LogRecord) -> Result<()> {
        if record.severity < self.threshold {
            return Ok(());
        }

        let mut line = RecordFormat::Line.format(record)?;
        line.push('\n');

        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for FileHandler {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
