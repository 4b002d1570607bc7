//! Cancellable per-refresh scheduling
//!
//! The flight advances one tick per display refresh. `FrameLoop` keeps at most
//! one outstanding frame request and refuses callbacks for requests it no
//! longer owns, so a reset can never be followed by a tick that was scheduled
//! before it.

use crate::error::SchedulerError;

/// Identifier handed out by the host for a pending frame request
pub type FrameId = i32;

/// Host that can call back once on the next display refresh
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Result<FrameId, SchedulerError>;
    fn cancel_frame(&mut self, id: FrameId);
}

/// Owns the scheduler and the single pending request
#[derive(Debug)]
pub struct FrameLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameId>,
}

impl<S: FrameScheduler> FrameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
        }
    }

    /// Request the next frame unless one is already pending
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame()?);
        }
        Ok(())
    }

    /// Drop the pending request, if any
    pub fn cancel(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
            log::debug!("Cancelled frame {}", id);
        }
    }

    /// Claim a delivered frame. Returns false for stale or unknown ids.
    pub fn accept(&mut self, id: FrameId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            log::debug!("Ignoring stale frame {} (pending {:?})", id, self.pending);
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// Scheduler driven by hand: records requests and lets the caller decide
/// when frames fire. Used by the native build and in tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: FrameId,
    requested: Vec<FrameId>,
    cancelled: Vec<FrameId>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent request that has not been cancelled
    pub fn latest(&self) -> Option<FrameId> {
        self.requested
            .iter()
            .rev()
            .find(|id| !self.cancelled.contains(id))
            .copied()
    }

    pub fn requested(&self) -> &[FrameId] {
        &self.requested
    }

    pub fn cancelled(&self) -> &[FrameId] {
        &self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> Result<FrameId, SchedulerError> {
        self.next_id += 1;
        self.requested.push(self.next_id);
        Ok(self.next_id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        self.cancelled.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_requests_once() {
        let mut frames = FrameLoop::new(ManualScheduler::new());
        frames.start().unwrap();
        frames.start().unwrap();
        assert_eq!(frames.scheduler().requested(), &[1]);
        assert_eq!(frames.pending(), Some(1));
    }

    #[test]
    fn test_accept_consumes_pending() {
        let mut frames = FrameLoop::new(ManualScheduler::new());
        frames.start().unwrap();
        assert!(frames.accept(1));
        assert!(!frames.is_pending());
        // Same id twice is stale
        assert!(!frames.accept(1));
    }

    #[test]
    fn test_cancel_then_stale_delivery_is_refused() {
        let mut frames = FrameLoop::new(ManualScheduler::new());
        frames.start().unwrap();
        frames.cancel();
        assert_eq!(frames.scheduler().cancelled(), &[1]);
        assert!(!frames.accept(1));

        // A fresh request gets a new id; the old one stays stale
        frames.start().unwrap();
        assert_eq!(frames.pending(), Some(2));
        assert!(!frames.accept(1));
        assert!(frames.accept(2));
    }

    #[test]
    fn test_cancel_without_pending_is_noop() {
        let mut frames = FrameLoop::new(ManualScheduler::new());
        frames.cancel();
        assert!(frames.scheduler().cancelled().is_empty());
    }

    #[test]
    fn test_manual_latest_skips_cancelled() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.request_frame().unwrap();
        let second = scheduler.request_frame().unwrap();
        scheduler.cancel_frame(second);
        assert_eq!(scheduler.latest(), Some(first));
    }
}
