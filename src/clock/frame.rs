/// Identifies one outstanding next-frame registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

/// The platform's next-frame primitive, injected into [`ClockEngine`] so the
/// frame loop can be driven deterministically under test.
///
/// A registration covers a single upcoming frame; the engine re-requests on
/// every tick rather than holding a persistent interval.
///
/// [`ClockEngine`]: crate::clock::ClockEngine
pub trait FrameScheduler {
    fn request_frame(&mut self) -> TickHandle;
    fn cancel_frame(&mut self, handle: TickHandle);
}

/// Frame scheduler for embedders that pump frames themselves.
///
/// Only records registration bookkeeping; the embedder delivers frames by
/// calling [`ClockEngine::tick`] with its own timestamps. An engine holds at
/// most one registration, so a new request supersedes the previous one.
///
/// [`ClockEngine::tick`]: crate::clock::ClockEngine::tick
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    next_handle: u64,
    pending: Option<TickHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualFrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a frame registration is currently outstanding.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn requested_count(&self) -> u64 {
        self.requested
    }

    pub fn cancelled_count(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self) -> TickHandle {
        let handle = TickHandle(self.next_handle);
        self.next_handle += 1;
        self.requested += 1;
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: TickHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled += 1;
    }
}
