pub mod bus;
pub mod stream;

pub use bus::{EventBus, EventKind, ListenerId};
pub use stream::ClockEvent;
