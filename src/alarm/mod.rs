pub mod kind;
pub mod scheduler;

pub use kind::AlarmKind;
pub use scheduler::AlarmScheduler;
