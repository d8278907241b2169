use async_trait::async_trait;
use tokio::time::{Duration, Instant, Interval, MissedTickBehavior, interval_at};
use tracing::trace;

use crate::clock::{ClockEngine, FrameScheduler, Millis};

/// Produces the frame timestamps that drive a [`ClockEngine`].
#[async_trait]
pub trait FrameSource: Send {
    /// Waits for the next frame and returns its timestamp.
    async fn next_frame(&mut self) -> Millis;
}

/// Frame source ticking at a fixed period on the tokio timer.
///
/// Timestamps are milliseconds since construction, so the first frame lands
/// at (or near) zero.
pub struct IntervalFrames {
    interval: Interval,
    origin: Instant,
}

impl IntervalFrames {
    pub fn new(period: Duration) -> Self {
        let origin = Instant::now();
        let mut interval = interval_at(origin, period);
        // A stalled consumer gets truthful timestamps, not a burst of
        // catch-up frames.
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval, origin }
    }

    /// Convenience constructor for a nominal frames-per-second rate.
    pub fn at_fps(fps: u32) -> Self {
        let fps = fps.max(1);
        Self::new(Duration::from_secs(1) / fps)
    }
}

#[async_trait]
impl FrameSource for IntervalFrames {
    async fn next_frame(&mut self) -> Millis {
        let at = self.interval.tick().await;
        at.duration_since(self.origin).as_millis() as Millis
    }
}

/// Pumps frames into the engine until its registration is released.
///
/// Returns immediately if the engine was never started, and after the tick
/// that observes a `stop`. The engine borrow is exclusive for the duration,
/// so commands issued concurrently belong in event callbacks or in a
/// `select!` arm racing this future.
pub async fn drive<S, F>(engine: &mut ClockEngine<S>, frames: &mut F)
where
    S: FrameScheduler + Send,
    F: FrameSource + ?Sized,
{
    while engine.is_scheduled() {
        let timestamp = frames.next_frame().await;
        trace!(timestamp, "frame");
        engine.tick(timestamp);
    }
}
