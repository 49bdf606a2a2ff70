//! # Sensor Session Recording Engine
//!
//! Continuously samples two motion-sensor streams (accelerometer and
//! gyroscope) and persists fixed-rate snapshots to a durable, per-session
//! CSV log, independent of any foreground UI.
//!
//! The engine coordinates two independently-scheduled producers (an
//! asynchronous sensor-event source and a fixed-period ticker) against a
//! single ordered output stream:
//!
//! - [`SampleStore`]: lock-free cache of the latest reading per axis.
//! - [`BufferedLogWriter`]: mutex-guarded CSV sink with periodic flush.
//! - [`PeriodicRecorder`]: fixed-rate ticker snapshotting the store into
//!   the sink.
//! - [`ResourceHold`]: power keep-alive bracket around the Recording
//!   state.
//! - [`SessionController`]: the `{Idle, Recording}` state machine owning
//!   all of the above.
//!
//! # Example
//!
//! ```no_run
//! use sensor_rec::{MockImu, NoopWakeLock, SessionController, Settings};
//! use std::sync::Arc;
//!
//! # async fn run() -> sensor_rec::RecResult<()> {
//! let settings = Settings::default();
//! let controller = SessionController::new(
//!     settings.recording,
//!     Box::new(MockImu::new(50)),
//!     Arc::new(NoopWakeLock),
//! );
//!
//! controller.start("WALKING", "s1").await?;
//! tokio::time::sleep(std::time::Duration::from_secs(2)).await;
//! let summary = controller.stop().await;
//! println!("wrote {}", summary.file_path.display());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod log_writer;
pub mod logging;
pub mod recorder;
pub mod sample_store;
pub mod sensors;
pub mod session;
pub mod wake;

pub use config::{ApplicationSettings, RecordingSettings, Settings};
pub use controller::{EngineState, SessionController};
pub use error::{RecError, RecResult};
pub use log_writer::{BufferedLogWriter, LogRecord, CSV_HEADER};
pub use recorder::PeriodicRecorder;
pub use sample_store::{AxesSnapshot, SampleStore, SensorKind};
pub use sensors::{MockImu, SensorSource};
pub use session::{session_path, SessionInfo, StopSummary, DEFAULT_ACTIVITY, UNKNOWN_SESSION_ID};
pub use wake::{MockWakeLock, NoopWakeLock, ResourceHold, WakeLock};
