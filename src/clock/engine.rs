use async_channel::Receiver;
use tracing::{debug, trace};

use crate::{
    alarm::{AlarmKind, AlarmScheduler},
    clock::{FrameScheduler, Millis, TickHandle},
    event::{ClockEvent, EventBus, EventKind, ListenerId, stream},
};

/// Frame-synchronized stopwatch.
///
/// Elapsed time is derived from the timestamps the frame scheduler delivers,
/// not from a wall clock of its own. Pausing does not cancel the frame
/// registration; instead each paused tick shifts the start reference forward
/// by the frame gap, so elapsed time stays frozen and resumes seamlessly
/// without a separate pause accumulator.
pub struct ClockEngine<S: FrameScheduler> {
    scheduler: S,
    events: EventBus,
    alarms: AlarmScheduler,
    start_reference: Option<Millis>,
    last_frame: Millis,
    elapsed: Millis,
    paused: bool,
    tick_handle: Option<TickHandle>,
}

impl<S: FrameScheduler> ClockEngine<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            events: EventBus::new(),
            alarms: AlarmScheduler::new(),
            start_reference: None,
            last_frame: 0,
            elapsed: 0,
            paused: false,
            tick_handle: None,
        }
    }

    /// Starts the stopwatch, or resumes it when paused.
    ///
    /// Returns false when already running un-paused: at most one frame
    /// registration exists per engine, so a second start is a no-op.
    pub fn start(&mut self) -> bool {
        if self.paused {
            self.paused = false;
            debug!("clock resumed");
            return true;
        }
        if self.tick_handle.is_some() {
            return false;
        }
        self.tick_handle = Some(self.scheduler.request_frame());
        debug!("clock started");
        true
    }

    /// Freezes elapsed time. Fails when not running or already paused.
    ///
    /// The frame registration stays live; ticks keep arriving and absorb the
    /// paused wall-clock gap into the start reference.
    pub fn pause(&mut self) -> bool {
        if self.start_reference.is_none() || self.paused {
            return false;
        }
        self.paused = true;
        debug!(elapsed = self.elapsed, "clock paused");
        true
    }

    /// Cancels the frame registration and resets the run. Fails when no frame
    /// has been observed since the last stop.
    ///
    /// The last elapsed value stays readable through [`ClockEngine::elapsed`]
    /// until the next start. Pending alarms survive; only the fired
    /// bookkeeping is cleared, so they are armed again for the next run.
    pub fn stop(&mut self) -> bool {
        if self.start_reference.is_none() {
            return false;
        }
        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.start_reference = None;
        self.paused = false;
        self.alarms.clear_fired();
        debug!(elapsed = self.elapsed, "clock stopped");
        true
    }

    /// Elapsed time at the most recent tick: frozen while paused, final value
    /// after stop, zero before the first frame.
    pub fn elapsed(&self) -> Millis {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.start_reference.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a frame registration is live, i.e. the frame loop is active.
    pub fn is_scheduled(&self) -> bool {
        self.tick_handle.is_some()
    }

    /// Schedules an alarm against the current elapsed time. Returns false on
    /// a zero value or an absolute deadline that is not in the future.
    pub fn set_alarm(&mut self, value: Millis, kind: AlarmKind) -> bool {
        match self.alarms.schedule(kind, value, self.elapsed) {
            Ok(_) => true,
            Err(err) => {
                debug!(%err, "alarm rejected");
                false
            }
        }
    }

    /// Schedules a relative alarm, due `value` after the current elapsed time.
    pub fn set_alarm_in(&mut self, value: Millis) -> bool {
        self.set_alarm(value, AlarmKind::Relative)
    }

    /// Scheduled deadlines in registration order. Fired deadlines stay listed
    /// until [`ClockEngine::clear_alarms`].
    pub fn alarms(&self) -> &[Millis] {
        self.alarms.list()
    }

    /// Drops every scheduled deadline along with its fired bookkeeping.
    pub fn clear_alarms(&mut self) {
        self.alarms.clear();
    }

    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> ListenerId
    where
        F: FnMut(Millis) + Send + 'static,
    {
        self.events.on(kind, callback)
    }

    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        self.events.off(kind, id)
    }

    pub fn off_event(&mut self, kind: EventKind) -> bool {
        self.events.off_event(kind)
    }

    pub fn off_all(&mut self) {
        self.events.off_all();
    }

    /// Update and alarm notifications as an async stream.
    pub fn event_stream(&mut self) -> Receiver<ClockEvent> {
        stream::attach(&mut self.events)
    }

    /// One frame of the clock loop; `frame_timestamp` must be monotonically
    /// non-decreasing across calls.
    ///
    /// Invoked by whatever drives the frame scheduler, not part of the
    /// command surface. A frame delivered after stop released the
    /// registration is ignored.
    pub fn tick(&mut self, frame_timestamp: Millis) {
        if self.tick_handle.is_none() {
            trace!(frame_timestamp, "stale frame ignored");
            return;
        }
        self.tick_handle = Some(self.scheduler.request_frame());

        let start = match self.start_reference {
            None => {
                // First frame of the run anchors the timeline.
                self.start_reference = Some(frame_timestamp);
                frame_timestamp
            }
            Some(start) if self.paused => {
                let gap = frame_timestamp.saturating_sub(self.last_frame);
                let shifted = start.saturating_add(gap);
                self.start_reference = Some(shifted);
                shifted
            }
            Some(start) => start,
        };

        self.last_frame = frame_timestamp;
        self.elapsed = frame_timestamp.saturating_sub(start);
        self.events.dispatch(EventKind::Update, self.elapsed);

        if self.paused {
            return;
        }
        for deadline in self.alarms.due_at(self.elapsed) {
            self.alarms.mark_fired(deadline);
            debug!(deadline, elapsed = self.elapsed, "alarm fired");
            self.events.dispatch(EventKind::Alarm, self.elapsed);
        }
    }
}
