//! Frame-synchronized stopwatch with pause compensation and one-shot alarms.
//!
//! A [`ClockEngine`] derives elapsed time from the timestamps an injected
//! [`FrameScheduler`] delivers once per rendering frame. It dispatches an
//! `update` event every frame and an `alarm` event when a scheduled deadline
//! comes due, each deadline firing at most once per run. Pausing freezes
//! elapsed time by shifting the timeline origin, so paused wall-clock time is
//! never counted.
//!
//! Frames can be pumped deterministically (see [`ManualFrameScheduler`]) or
//! from the tokio timer via [`IntervalFrames`] and [`drive`].

pub mod alarm;
pub mod clock;
pub mod error;
pub mod event;

pub use alarm::{AlarmKind, AlarmScheduler};
pub use clock::{
    ClockEngine, FrameScheduler, FrameSource, IntervalFrames, ManualFrameScheduler, Millis,
    TickHandle, drive,
};
pub use error::AlarmError;
pub use event::{ClockEvent, EventBus, EventKind, ListenerId};
