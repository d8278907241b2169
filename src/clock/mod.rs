pub mod driver;
pub mod engine;
pub mod frame;

/// Milliseconds on the engine's elapsed-time timeline.
pub type Millis = u64;

pub use driver::{FrameSource, IntervalFrames, drive};
pub use engine::ClockEngine;
pub use frame::{FrameScheduler, ManualFrameScheduler, TickHandle};
