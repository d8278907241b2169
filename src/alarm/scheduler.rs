use std::collections::HashSet;

use tracing::trace;

use crate::{alarm::AlarmKind, clock::Millis, error::AlarmError};

/// Deadline bookkeeping for one clock engine instance.
///
/// `pending` keeps every scheduled deadline in insertion order; firing a
/// deadline only shadows it through `fired`, it does not remove it, so a
/// fired alarm stays visible in [`AlarmScheduler::list`] until `clear`.
#[derive(Default)]
pub struct AlarmScheduler {
    pending: Vec<Millis>,
    fired: HashSet<Millis>,
}

impl AlarmScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the request and adds the computed deadline to `pending`.
    ///
    /// Rejects a zero value for either kind, and an absolute value that is
    /// not strictly after `current_elapsed`.
    pub fn schedule(
        &mut self,
        kind: AlarmKind,
        value: Millis,
        current_elapsed: Millis,
    ) -> Result<Millis, AlarmError> {
        if value == 0 {
            return Err(AlarmError::ZeroValue);
        }
        if kind == AlarmKind::Absolute && value <= current_elapsed {
            return Err(AlarmError::DeadlineInPast {
                requested: value,
                elapsed: current_elapsed,
            });
        }

        let deadline = kind.compute_deadline(current_elapsed, value);
        self.pending.push(deadline);
        trace!(deadline, ?kind, "alarm scheduled");
        Ok(deadline)
    }

    /// Every pending deadline due at `elapsed` that has not fired yet, in
    /// insertion order. Scanned fresh on every call; a deadline scheduled
    /// more than once is yielded once per scan.
    pub fn due_at(&self, elapsed: Millis) -> Vec<Millis> {
        let mut seen = HashSet::new();
        self.pending
            .iter()
            .copied()
            .filter(|d| *d <= elapsed && !self.fired.contains(d) && seen.insert(*d))
            .collect()
    }

    /// Shadows a deadline so it is never dispatched again this run.
    pub fn mark_fired(&mut self, deadline: Millis) {
        self.fired.insert(deadline);
    }

    /// Pending deadlines in insertion order, fired ones included.
    pub fn list(&self) -> &[Millis] {
        &self.pending
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.fired.clear();
    }

    /// Forgets which deadlines have fired but keeps them scheduled.
    pub(crate) fn clear_fired(&mut self) {
        self.fired.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_rejects_zero_value() {
        let mut sched = AlarmScheduler::new();
        assert_eq!(
            sched.schedule(AlarmKind::Relative, 0, 100),
            Err(AlarmError::ZeroValue)
        );
        assert_eq!(
            sched.schedule(AlarmKind::Absolute, 0, 100),
            Err(AlarmError::ZeroValue)
        );
        assert!(sched.list().is_empty());
    }

    #[test]
    fn test_schedule_rejects_absolute_deadline_in_past() {
        let mut sched = AlarmScheduler::new();
        assert_eq!(
            sched.schedule(AlarmKind::Absolute, 500, 500),
            Err(AlarmError::DeadlineInPast {
                requested: 500,
                elapsed: 500
            })
        );
        assert_eq!(
            sched.schedule(AlarmKind::Absolute, 400, 500),
            Err(AlarmError::DeadlineInPast {
                requested: 400,
                elapsed: 500
            })
        );
        // Strictly after now is fine.
        assert_eq!(sched.schedule(AlarmKind::Absolute, 501, 500), Ok(501));
    }

    #[test]
    fn test_relative_deadline_offsets_from_current_elapsed() {
        let mut sched = AlarmScheduler::new();
        assert_eq!(sched.schedule(AlarmKind::Relative, 3000, 1200), Ok(4200));
        assert_eq!(sched.list(), &[4200]);
    }

    #[test]
    fn test_due_at_returns_insertion_order() {
        let mut sched = AlarmScheduler::new();
        sched.schedule(AlarmKind::Absolute, 900, 0).unwrap();
        sched.schedule(AlarmKind::Absolute, 300, 0).unwrap();
        sched.schedule(AlarmKind::Absolute, 600, 0).unwrap();

        // Not sorted by deadline, ordered by registration.
        assert_eq!(sched.due_at(1000), vec![900, 300, 600]);
        assert_eq!(sched.due_at(600), vec![300, 600]);
        assert_eq!(sched.due_at(299), Vec::<Millis>::new());
    }

    #[test]
    fn test_fired_deadline_is_shadowed_but_still_listed() {
        let mut sched = AlarmScheduler::new();
        sched.schedule(AlarmKind::Absolute, 300, 0).unwrap();
        sched.schedule(AlarmKind::Absolute, 600, 0).unwrap();

        sched.mark_fired(300);
        assert_eq!(sched.due_at(1000), vec![600]);
        // mark_fired does not evict from pending.
        assert_eq!(sched.list(), &[300, 600]);
    }

    #[test]
    fn test_duplicate_deadline_yielded_once_per_scan() {
        let mut sched = AlarmScheduler::new();
        sched.schedule(AlarmKind::Absolute, 300, 0).unwrap();
        sched.schedule(AlarmKind::Absolute, 300, 0).unwrap();

        assert_eq!(sched.due_at(500), vec![300]);
        assert_eq!(sched.list(), &[300, 300]);
    }

    #[test]
    fn test_clear_empties_both_sets() {
        let mut sched = AlarmScheduler::new();
        sched.schedule(AlarmKind::Absolute, 300, 0).unwrap();
        sched.mark_fired(300);
        sched.clear();

        assert!(sched.list().is_empty());
        // A re-registered deadline can fire again.
        sched.schedule(AlarmKind::Absolute, 300, 0).unwrap();
        assert_eq!(sched.due_at(300), vec![300]);
    }

    #[test]
    fn test_clear_fired_keeps_pending() {
        let mut sched = AlarmScheduler::new();
        sched.schedule(AlarmKind::Absolute, 300, 0).unwrap();
        sched.mark_fired(300);
        assert!(sched.due_at(300).is_empty());

        sched.clear_fired();
        assert_eq!(sched.list(), &[300]);
        assert_eq!(sched.due_at(300), vec![300]);
    }
}
