//! Buffered CSV sink for session logs.
//!
//! One [`BufferedLogWriter`] exists per session. Opening it creates (or
//! truncates) the target file and writes the fixed 9-column header exactly
//! once. Appends go through a single exclusive lock shared with flush and
//! close, and every `flush_threshold` rows the buffer is forced down to the
//! file. Close is idempotent and best-effort: shutdown must never fail
//! outwardly.

use parking_lot::Mutex;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{RecError, RecResult};
use crate::sample_store::AxesSnapshot;

/// Column header of every session file.
pub const CSV_HEADER: [&str; 9] = [
    "timestamp",
    "acc_x",
    "acc_y",
    "acc_z",
    "gyro_x",
    "gyro_y",
    "gyro_z",
    "activity",
    "session_id",
];

/// One row of the session log, produced once per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Wall-clock capture time, milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// The six axis values snapshotted from the sample store.
    pub axes: AxesSnapshot,
    /// Activity label of the owning session.
    pub activity: String,
    /// Identifier of the owning session.
    pub session_id: String,
}

struct SinkState {
    writer: csv::Writer<File>,
    rows_since_flush: usize,
}

/// Append-only, mutex-guarded CSV writer with periodic flush.
pub struct BufferedLogWriter {
    path: PathBuf,
    flush_threshold: usize,
    // The sink and its flush counter are owned here exclusively; all access
    // goes through this lock.
    sink: Mutex<Option<SinkState>>,
}

impl BufferedLogWriter {
    /// Create or truncate the file at `path`, write the header, flush once.
    ///
    /// The parent directory is created if missing. Any failure here aborts
    /// the whole session start.
    pub fn open(path: &Path, flush_threshold: usize) -> RecResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(CSV_HEADER)?;
        writer.flush()?;

        debug!(path = %path.display(), "session log opened");
        Ok(Self {
            path: path.to_path_buf(),
            flush_threshold,
            sink: Mutex::new(Some(SinkState {
                writer,
                rows_since_flush: 0,
            })),
        })
    }

    /// Path of the underlying session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `record` as one CSV row and count it toward the next flush.
    pub fn append(&self, record: &LogRecord) -> RecResult<()> {
        let mut guard = self.sink.lock();
        let state = guard.as_mut().ok_or(RecError::WriterClosed)?;

        let axes = &record.axes;
        state.writer.write_record([
            record.timestamp_ms.to_string(),
            axes.acc_x.to_string(),
            axes.acc_y.to_string(),
            axes.acc_z.to_string(),
            axes.gyro_x.to_string(),
            axes.gyro_y.to_string(),
            axes.gyro_z.to_string(),
            record.activity.clone(),
            record.session_id.clone(),
        ])?;

        state.rows_since_flush += 1;
        if state.rows_since_flush >= self.flush_threshold {
            state.writer.flush()?;
            state.rows_since_flush = 0;
        }
        Ok(())
    }

    /// Force buffered rows down to the file.
    pub fn flush(&self) -> RecResult<()> {
        if let Some(state) = self.sink.lock().as_mut() {
            state.writer.flush()?;
            state.rows_since_flush = 0;
        }
        Ok(())
    }

    /// Flush and release the sink. Safe to call multiple times; errors are
    /// logged and swallowed so shutdown always completes.
    pub fn close(&self) {
        let mut guard = self.sink.lock();
        if let Some(mut state) = guard.take() {
            if let Err(e) = state.writer.flush() {
                warn!(path = %self.path.display(), error = %e, "flush on close failed");
            }
            debug!(path = %self.path.display(), "session log closed");
        }
    }
}

impl Drop for BufferedLogWriter {
    fn drop(&mut self) {
        self.close();
    }
}
