//! Fixed-rate recording tick.
//!
//! [`PeriodicRecorder`] owns the task that, every tick, stamps a wall-clock
//! timestamp, snapshots the [`SampleStore`], and appends one
//! [`LogRecord`] through the session's [`BufferedLogWriter`]. Ticks fire at
//! fixed intervals and are dropped if a tick runs long; there is no
//! catch-up burst after a stall.
//!
//! `stop` is a hard synchronization point: once it returns, no tick is in
//! flight and none will start, so the caller may close the writer
//! immediately.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::log_writer::{BufferedLogWriter, LogRecord};
use crate::sample_store::SampleStore;

/// The fixed-rate ticker of an active session.
pub struct PeriodicRecorder {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PeriodicRecorder {
    /// Spawn the tick task. The first tick fires immediately.
    pub fn start(
        period: Duration,
        store: Arc<SampleStore>,
        writer: Arc<BufferedLogWriter>,
        activity: String,
        session_id: String,
    ) -> Self {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        let record = LogRecord {
                            timestamp_ms: Utc::now().timestamp_millis(),
                            axes: store.snapshot(),
                            activity: activity.clone(),
                            session_id: session_id.clone(),
                        };
                        // No retry policy: a failed append is logged and the
                        // next tick proceeds.
                        if let Err(e) = writer.append(&record) {
                            warn!(error = %e, "failed to append record");
                        }
                    }
                }
            }
            debug!("recorder tick loop exited");
        });

        Self {
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Cancel future ticks and wait for any in-flight tick to finish.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn open_writer(dir: &std::path::Path) -> Arc<BufferedLogWriter> {
        Arc::new(BufferedLogWriter::open(&dir.join("tick.csv"), 1).expect("open writer"))
    }

    #[tokio::test]
    async fn appends_about_one_row_per_period() {
        let dir = tempdir().expect("tempdir");
        let store = Arc::new(SampleStore::new());
        let writer = open_writer(dir.path());

        let recorder = PeriodicRecorder::start(
            Duration::from_millis(10),
            Arc::clone(&store),
            Arc::clone(&writer),
            "WALKING".to_string(),
            "s1".to_string(),
        );
        tokio::time::sleep(Duration::from_millis(105)).await;
        recorder.stop().await;

        let contents = std::fs::read_to_string(writer.path()).expect("read file");
        let rows = contents.lines().count() - 1;
        // ~100ms at 10ms period, immediate first tick: expect 9..=13 rows.
        assert!((9..=13).contains(&rows), "unexpected row count {rows}");
    }

    #[tokio::test]
    async fn no_append_after_stop_returns() {
        let dir = tempdir().expect("tempdir");
        let store = Arc::new(SampleStore::new());
        let writer = open_writer(dir.path());

        let recorder = PeriodicRecorder::start(
            Duration::from_millis(5),
            Arc::clone(&store),
            Arc::clone(&writer),
            "WALKING".to_string(),
            "s1".to_string(),
        );
        tokio::time::sleep(Duration::from_millis(30)).await;
        recorder.stop().await;

        let before = std::fs::read_to_string(writer.path()).expect("read file");
        tokio::time::sleep(Duration::from_millis(30)).await;
        let after = std::fs::read_to_string(writer.path()).expect("read file");
        assert_eq!(before, after);
    }
}
