//! Mock IMU producer.
//!
//! Simulates a phone-grade accelerometer and gyroscope for testing and
//! headless runs without physical hardware: gravity on the accelerometer Z
//! axis with small jitter, near-zero angular rates on the gyroscope.

use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::RecResult;
use crate::sample_store::{SampleStore, SensorKind};
use crate::sensors::SensorSource;

/// Standard gravity, m/s^2.
const GRAVITY: f64 = 9.81;

/// Simulated IMU pushing updates into a [`SampleStore`] at a fixed rate.
pub struct MockImu {
    event_rate_hz: u32,
    with_gyro: bool,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl MockImu {
    /// Create a mock IMU delivering both sensors at `event_rate_hz`.
    pub fn new(event_rate_hz: u32) -> Self {
        Self {
            event_rate_hz: event_rate_hz.max(1),
            with_gyro: true,
            shutdown_tx: None,
            task: None,
        }
    }

    /// Create a mock device whose gyroscope is absent. Gyro axes in the
    /// store stay at their zero defaults.
    pub fn accel_only(event_rate_hz: u32) -> Self {
        Self {
            with_gyro: false,
            ..Self::new(event_rate_hz)
        }
    }
}

#[async_trait]
impl SensorSource for MockImu {
    async fn start(&mut self, store: Arc<SampleStore>) -> RecResult<()> {
        let period = Duration::from_secs_f64(1.0 / f64::from(self.event_rate_hz));
        let with_gyro = self.with_gyro;
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        let (acc, gyro) = {
                            let mut rng = rand::thread_rng();
                            (
                                (
                                    rng.gen_range(-0.3..0.3),
                                    rng.gen_range(-0.3..0.3),
                                    GRAVITY + rng.gen_range(-0.1..0.1),
                                ),
                                (
                                    rng.gen_range(-0.05..0.05),
                                    rng.gen_range(-0.05..0.05),
                                    rng.gen_range(-0.05..0.05),
                                ),
                            )
                        };
                        store.update(SensorKind::Accelerometer, acc.0, acc.1, acc.2);
                        if with_gyro {
                            store.update(SensorKind::Gyroscope, gyro.0, gyro.1, gyro.2);
                        }
                    }
                }
            }
            debug!("mock IMU stopped");
        }));

        debug!(rate_hz = self.event_rate_hz, "mock IMU started");
        Ok(())
    }

    async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}
