//! Display-refresh scheduling
//!
//! One pending frame request at a time drives either the start-screen star
//! field or the running game, never both. Requests can always be cancelled;
//! cancelling when nothing is pending does nothing.

/// Handle returned by the platform for a pending frame request
pub type FrameId = i32;

/// "Run the frame callback on the next display refresh"
pub trait FrameScheduler {
    fn request_frame(&mut self) -> Option<FrameId>;
    fn cancel_frame(&mut self, id: FrameId);
}

/// What the pending frame will drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopMode {
    /// Start screen star field
    Starfield,
    /// Running game
    Game,
}

/// Tracks the single outstanding frame request
#[derive(Debug, Default)]
pub struct FrameLoop {
    pending: Option<FrameId>,
    mode: Option<LoopMode>,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to `mode`, replacing whatever was scheduled
    pub fn start<S: FrameScheduler>(&mut self, scheduler: &mut S, mode: LoopMode) {
        self.stop(scheduler);
        self.mode = Some(mode);
        self.pending = scheduler.request_frame();
    }

    /// Cancel the pending request, if any
    pub fn stop<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        if let Some(id) = self.pending.take() {
            scheduler.cancel_frame(id);
        }
        self.mode = None;
    }

    /// Mark the pending request as delivered; returns the mode to run
    pub fn fired(&mut self) -> Option<LoopMode> {
        self.pending = None;
        self.mode
    }

    /// Request the next frame in the current mode
    pub fn schedule_next<S: FrameScheduler>(&mut self, scheduler: &mut S) {
        if self.mode.is_some() && self.pending.is_none() {
            self.pending = scheduler.request_frame();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Scheduler that records requests and cancellations
    #[derive(Debug, Default)]
    pub(crate) struct FakeScheduler {
        pub next_id: FrameId,
        pub requested: Vec<FrameId>,
        pub cancelled: Vec<FrameId>,
    }

    impl FrameScheduler for FakeScheduler {
        fn request_frame(&mut self) -> Option<FrameId> {
            self.next_id += 1;
            self.requested.push(self.next_id);
            Some(self.next_id)
        }

        fn cancel_frame(&mut self, id: FrameId) {
            self.cancelled.push(id);
        }
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut scheduler = FakeScheduler::default();
        let mut frames = FrameLoop::new();
        frames.stop(&mut scheduler);
        assert!(scheduler.cancelled.is_empty());

        frames.start(&mut scheduler, LoopMode::Game);
        frames.stop(&mut scheduler);
        frames.stop(&mut scheduler);
        assert_eq!(scheduler.cancelled, vec![1]);
        assert_eq!(frames.fired(), None);
    }

    #[test]
    fn test_switching_modes_cancels_previous() {
        let mut scheduler = FakeScheduler::default();
        let mut frames = FrameLoop::new();
        frames.start(&mut scheduler, LoopMode::Starfield);
        frames.start(&mut scheduler, LoopMode::Game);
        assert_eq!(scheduler.cancelled, vec![1]);
        assert_eq!(scheduler.requested, vec![1, 2]);
        assert_eq!(frames.fired(), Some(LoopMode::Game));
    }

    #[test]
    fn test_fired_then_reschedule() {
        let mut scheduler = FakeScheduler::default();
        let mut frames = FrameLoop::new();
        frames.start(&mut scheduler, LoopMode::Starfield);
        assert_eq!(frames.fired(), Some(LoopMode::Starfield));

        // Stopping after delivery has nothing to cancel
        frames.stop(&mut scheduler);
        assert!(scheduler.cancelled.is_empty());

        // A stopped loop does not reschedule
        frames.schedule_next(&mut scheduler);
        assert_eq!(scheduler.requested, vec![1]);

        frames.start(&mut scheduler, LoopMode::Game);
        frames.fired();
        frames.schedule_next(&mut scheduler);
        frames.schedule_next(&mut scheduler);
        assert_eq!(scheduler.requested, vec![1, 2, 3]);
    }
}
