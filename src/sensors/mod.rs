//! Sensor-event producer seam.
//!
//! The engine never talks to platform sensor APIs directly; it registers a
//! [`SensorSource`] against the shared [`SampleStore`](crate::SampleStore)
//! when a session starts and unregisters it on stop. A source that cannot
//! provide one of the sensors simply never updates those axes; they stay
//! at zero and recording proceeds.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::RecResult;
use crate::sample_store::SampleStore;

pub mod mock;

pub use mock::MockImu;

/// A producer of accelerometer/gyroscope events.
///
/// `start` and `stop` bracket one recording session. `stop` must leave no
/// producer context still writing into the store it was started with.
#[async_trait]
pub trait SensorSource: Send {
    /// Begin delivering sensor events into `store`.
    async fn start(&mut self, store: Arc<SampleStore>) -> RecResult<()>;

    /// Stop delivering events and wait for the producer to wind down.
    async fn stop(&mut self);
}
