#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    LongPress,
    TwoFingerLongPress,
}

/// Identifies one scheduled timer. A token whose generation no longer
/// matches the live slot refers to a cancelled or already fired timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub deadline_ms: u64,
    generation: u32,
}

#[derive(Clone, Copy, Debug)]
struct ArmedTimer {
    deadline_ms: u64,
    generation: u32,
}

/// A single-occupancy deadline slot.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TimerSlot {
    kind: TimerKind,
    armed: Option<ArmedTimer>,
    next_generation: u32,
}

impl TimerSlot {
    pub(crate) const fn new(kind: TimerKind) -> Self {
        Self {
            kind,
            armed: None,
            next_generation: 1,
        }
    }

    /// The slot must be cancelled (or have fired) before rescheduling.
    pub(crate) fn schedule(&mut self, now_ms: u64, delay_ms: u64) -> TimerToken {
        debug_assert!(
            self.armed.is_none(),
            "{:?} timer rescheduled while still armed",
            self.kind
        );
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1).max(1);
        let deadline_ms = now_ms.saturating_add(delay_ms);
        self.armed = Some(ArmedTimer {
            deadline_ms,
            generation,
        });
        TimerToken {
            kind: self.kind,
            deadline_ms,
            generation,
        }
    }

    /// Idempotent; returns whether a live timer was cleared.
    pub(crate) fn cancel(&mut self) -> bool {
        self.armed.take().is_some()
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub(crate) fn token(&self) -> Option<TimerToken> {
        self.armed.map(|armed| TimerToken {
            kind: self.kind,
            deadline_ms: armed.deadline_ms,
            generation: armed.generation,
        })
    }

    pub(crate) fn deadline_ms(&self) -> Option<u64> {
        self.armed.map(|armed| armed.deadline_ms)
    }

    /// Disarms and returns true when the deadline has passed.
    pub(crate) fn take_due(&mut self, now_ms: u64) -> bool {
        match self.armed {
            Some(armed) if now_ms >= armed.deadline_ms => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }

    /// Disarms and returns true when `token` names the live timer.
    pub(crate) fn take_matching(&mut self, token: TimerToken) -> bool {
        match self.armed {
            Some(armed) if token.kind == self.kind && token.generation == armed.generation => {
                self.armed = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_idempotent() {
        let mut slot = TimerSlot::new(TimerKind::LongPress);
        slot.schedule(0, 500);
        assert!(slot.cancel());
        assert!(!slot.cancel());
        assert!(!slot.is_armed());
    }

    #[test]
    fn take_due_fires_once_at_deadline() {
        let mut slot = TimerSlot::new(TimerKind::LongPress);
        slot.schedule(100, 500);

        assert!(!slot.take_due(599));
        assert!(slot.take_due(600));
        assert!(!slot.take_due(700));
    }

    #[test]
    fn stale_token_is_rejected_after_reschedule() {
        let mut slot = TimerSlot::new(TimerKind::TwoFingerLongPress);
        let stale = slot.schedule(0, 500);
        slot.cancel();
        let live = slot.schedule(10, 500);

        assert_ne!(stale, live);
        assert!(!slot.take_matching(stale));
        assert!(slot.is_armed());
        assert!(slot.take_matching(live));
        assert!(!slot.take_matching(live));
    }

    #[test]
    fn token_of_other_kind_never_matches() {
        let mut long_press = TimerSlot::new(TimerKind::LongPress);
        let mut two_finger = TimerSlot::new(TimerKind::TwoFingerLongPress);
        let token = two_finger.schedule(0, 500);
        long_press.schedule(0, 500);

        assert!(!long_press.take_matching(token));
        assert_eq!(long_press.deadline_ms(), Some(500));
    }
}
