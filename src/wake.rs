//! Power keep-alive resource for the duration of a session.
//!
//! The platform's wake-lock facility sits behind the [`WakeLock`] trait so
//! the engine can run on hosts with no such facility ([`NoopWakeLock`]) and
//! tests can observe acquisition discipline ([`MockWakeLock`]).
//! [`ResourceHold`] wraps a lock with an idempotent held-flag: release is
//! safe to call at any time and happens on every exit path from Recording,
//! including drop.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::error::RecResult;

/// Platform seam for an exclusive power-relevant resource.
pub trait WakeLock: Send + Sync {
    /// Acquire the resource. Called once per session start.
    fn acquire(&self) -> RecResult<()>;
    /// Release the resource. Called at most once per acquire.
    fn release(&self);
}

/// Wake lock for hosts without a power-management facility.
#[derive(Debug, Default)]
pub struct NoopWakeLock;

impl WakeLock for NoopWakeLock {
    fn acquire(&self) -> RecResult<()> {
        Ok(())
    }

    fn release(&self) {}
}

/// Counting wake lock for tests.
#[derive(Debug, Default)]
pub struct MockWakeLock {
    acquired: AtomicUsize,
    released: AtomicUsize,
}

impl MockWakeLock {
    /// Create a lock with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `acquire` calls.
    pub fn acquire_count(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    /// Number of `release` calls that reached the platform.
    pub fn release_count(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// True while acquires outnumber releases.
    pub fn is_held(&self) -> bool {
        self.acquire_count() > self.release_count()
    }
}

impl WakeLock for MockWakeLock {
    fn acquire(&self) -> RecResult<()> {
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn release(&self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Guard pairing a [`WakeLock`] with an idempotent held-flag.
pub struct ResourceHold {
    lock: Arc<dyn WakeLock>,
    held: AtomicBool,
}

impl ResourceHold {
    /// Wrap `lock`; nothing is acquired yet.
    pub fn new(lock: Arc<dyn WakeLock>) -> Self {
        Self {
            lock,
            held: AtomicBool::new(false),
        }
    }

    /// Acquire the underlying lock unless already held.
    pub fn acquire(&self) -> RecResult<()> {
        if self.held.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        if let Err(e) = self.lock.acquire() {
            self.held.store(false, Ordering::SeqCst);
            return Err(e);
        }
        debug!("wake lock acquired");
        Ok(())
    }

    /// Release the underlying lock if held. Idempotent; safe to call even if
    /// never acquired.
    pub fn release(&self) {
        if self.held.swap(false, Ordering::SeqCst) {
            self.lock.release();
            debug!("wake lock released");
        }
    }

    /// Whether the hold is currently active.
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::SeqCst)
    }
}

impl Drop for ResourceHold {
    fn drop(&mut self) {
        self.release();
    }
}
