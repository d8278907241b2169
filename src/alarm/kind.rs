use crate::clock::Millis;

/// How a requested alarm value maps onto the elapsed-time timeline.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AlarmKind {
    /// Deadline is the current elapsed time plus the requested offset.
    #[default]
    Relative,
    /// Deadline is the requested elapsed-time value itself.
    Absolute,
}

impl AlarmKind {
    pub fn compute_deadline(&self, current_elapsed: Millis, requested: Millis) -> Millis {
        match self {
            AlarmKind::Relative => current_elapsed.saturating_add(requested),
            AlarmKind::Absolute => requested,
        }
    }
}
