//! Session lifecycle state machine.
//!
//! [`SessionController`] is the control surface exposed to the external
//! bridge: `start` and `stop` drive the `{Idle, Recording}` state machine
//! and own the lifecycle of every other engine component: the sample
//! store, the session log writer, the fixed-rate recorder, the sensor
//! source, and the power keep-alive hold.
//!
//! All transitions run under one async mutex, so overlapping `start` calls
//! can never open two writers and `stop` never races a half-finished
//! `start`.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::RecordingSettings;
use crate::error::RecResult;
use crate::log_writer::BufferedLogWriter;
use crate::recorder::PeriodicRecorder;
use crate::sample_store::SampleStore;
use crate::sensors::SensorSource;
use crate::session::{session_path, SessionInfo, StopSummary, DEFAULT_ACTIVITY, UNKNOWN_SESSION_ID};
use crate::wake::{ResourceHold, WakeLock};

/// The two lifecycle states of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No session active; all resources released.
    Idle,
    /// A session is recording; the wake lock is held.
    Recording,
}

struct ControllerInner {
    state: EngineState,
    source: Box<dyn SensorSource>,
    writer: Option<Arc<BufferedLogWriter>>,
    recorder: Option<PeriodicRecorder>,
    current: Option<SessionInfo>,
    last_summary: Option<StopSummary>,
}

/// Top-level state machine governing start/stop of a recording session.
pub struct SessionController {
    settings: RecordingSettings,
    store: Arc<SampleStore>,
    hold: ResourceHold,
    inner: Mutex<ControllerInner>,
}

impl SessionController {
    /// Build an idle controller around a sensor source and a wake lock.
    pub fn new(
        settings: RecordingSettings,
        source: Box<dyn SensorSource>,
        wake_lock: Arc<dyn WakeLock>,
    ) -> Self {
        Self {
            settings,
            store: Arc::new(SampleStore::new()),
            hold: ResourceHold::new(wake_lock),
            inner: Mutex::new(ControllerInner {
                state: EngineState::Idle,
                source,
                writer: None,
                recorder: None,
                current: None,
                last_summary: None,
            }),
        }
    }

    /// Start a recording session.
    ///
    /// A no-op returning `Ok(true)` while already recording; the new
    /// parameters are ignored and the active session is untouched. From
    /// idle, opens the session log (a failure here aborts the start and
    /// leaves no partial session), acquires the wake lock, registers the
    /// sensor source, and spawns the recorder. Empty `activity` or
    /// `session_id` fall back to their defaults.
    pub async fn start(&self, activity: &str, session_id: &str) -> RecResult<bool> {
        let mut inner = self.inner.lock().await;
        if inner.state == EngineState::Recording {
            debug!("start ignored: session already recording");
            return Ok(true);
        }

        let activity = if activity.is_empty() {
            DEFAULT_ACTIVITY
        } else {
            activity
        }
        .to_string();
        let session_id = if session_id.is_empty() {
            UNKNOWN_SESSION_ID
        } else {
            session_id
        }
        .to_string();

        let path = session_path(&self.settings.output_dir, &session_id);
        // Nothing is registered or held yet, so a failed open aborts the
        // whole start cleanly.
        let writer = Arc::new(BufferedLogWriter::open(&path, self.settings.flush_threshold)?);

        if let Err(e) = self.hold.acquire() {
            writer.close();
            return Err(e);
        }

        // A source missing one of its sensors is tolerated: those axes stay
        // at zero and recording proceeds.
        if let Err(e) = inner.source.start(Arc::clone(&self.store)).await {
            warn!(error = %e, "sensor source failed to start; recording proceeds");
        }

        let recorder = PeriodicRecorder::start(
            self.settings.tick_period(),
            Arc::clone(&self.store),
            Arc::clone(&writer),
            activity.clone(),
            session_id.clone(),
        );

        inner.writer = Some(writer);
        inner.recorder = Some(recorder);
        inner.current = Some(SessionInfo {
            id: session_id.clone(),
            activity: activity.clone(),
            started_at: Utc::now(),
        });
        inner.state = EngineState::Recording;

        info!(session_id = %session_id, activity = %activity, "recording started");
        Ok(true)
    }

    /// Stop the active session.
    ///
    /// Never fails outwardly. From idle, a no-op returning the last-known
    /// session identity (or the `session_unknown` sentinel). From
    /// recording: stops the ticker (waiting out any in-flight tick),
    /// unregisters the sensor source, flushes and closes the log
    /// (best-effort), releases the wake lock, and transitions to idle.
    pub async fn stop(&self) -> StopSummary {
        let mut inner = self.inner.lock().await;
        if inner.state == EngineState::Idle {
            return inner
                .last_summary
                .clone()
                .unwrap_or_else(|| self.sentinel_summary());
        }

        // Order matters: the ticker must be fully stopped before the writer
        // closes, so no tick can append into a closed sink.
        if let Some(recorder) = inner.recorder.take() {
            recorder.stop().await;
        }
        inner.source.stop().await;
        if let Some(writer) = inner.writer.take() {
            writer.close();
        }
        self.hold.release();
        inner.state = EngineState::Idle;

        let summary = match inner.current.take() {
            Some(session) => StopSummary {
                file_path: session_path(&self.settings.output_dir, &session.id),
                session_id: session.id,
            },
            None => self.sentinel_summary(),
        };
        inner.last_summary = Some(summary.clone());

        info!(
            session_id = %summary.session_id,
            path = %summary.file_path.display(),
            "recording stopped"
        );
        summary
    }

    /// Whether a session is currently recording.
    pub async fn is_recording(&self) -> bool {
        self.inner.lock().await.state == EngineState::Recording
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> EngineState {
        self.inner.lock().await.state
    }

    fn sentinel_summary(&self) -> StopSummary {
        StopSummary {
            file_path: session_path(&self.settings.output_dir, UNKNOWN_SESSION_ID),
            session_id: UNKNOWN_SESSION_ID.to_string(),
        }
    }
}
