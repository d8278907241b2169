use thiserror::Error;

use crate::clock::Millis;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AlarmError {
    #[error("alarm value must be greater than zero")]
    ZeroValue,
    #[error("absolute deadline {requested} is not after current elapsed time {elapsed}")]
    DeadlineInPast { requested: Millis, elapsed: Millis },
}
