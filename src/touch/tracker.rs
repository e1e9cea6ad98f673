use super::types::{ContactId, ContactSample, TouchPoint};

pub const MAX_TRACKED_CONTACTS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TouchContact {
    pub id: ContactId,
    pub start: TouchPoint,
    pub current: TouchPoint,
    pub start_ms: u64,
}

impl TouchContact {
    pub fn delta(&self) -> (i32, i32) {
        (
            self.current.x.saturating_sub(self.start.x),
            self.current.y.saturating_sub(self.start.y),
        )
    }
}

/// Read-only copy of the tracker handed to the classifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContactSnapshot {
    pub count: usize,
    pub primary: Option<TouchContact>,
    pub secondary: Option<TouchContact>,
}

impl ContactSnapshot {
    pub fn pair(&self) -> Option<(TouchContact, TouchContact)> {
        match (self.primary, self.secondary) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }
}

pub type ActiveTouchSet = heapless::Vec<TouchContact, MAX_TRACKED_CONTACTS>;

/// Result of an end event: contacts removed from the active set.
#[derive(Clone, Debug, Default)]
pub struct Released {
    pub contacts: ActiveTouchSet,
}

impl Released {
    pub fn count(&self) -> usize {
        self.contacts.len()
    }

    /// The lifted contact when exactly one ended.
    pub fn single(&self) -> Option<TouchContact> {
        match self.contacts.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TouchTracker {
    contacts: ActiveTouchSet,
    ignored: u32,
}

impl TouchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn contacts(&self) -> &[TouchContact] {
        &self.contacts
    }

    pub fn get(&self, id: ContactId) -> Option<&TouchContact> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    /// Samples dropped so far: unknown ids, duplicates and capacity overflow.
    pub fn ignored(&self) -> u32 {
        self.ignored
    }

    pub fn snapshot(&self) -> ContactSnapshot {
        ContactSnapshot {
            count: self.contacts.len(),
            primary: self.contacts.first().copied(),
            secondary: self.contacts.get(1).copied(),
        }
    }

    /// Inserts contacts from `changed` and any pressed contact the tracker
    /// missed. Returns how many were inserted.
    pub fn begin(
        &mut self,
        now_ms: u64,
        touches: &[ContactSample],
        changed: &[ContactSample],
    ) -> usize {
        let mut inserted = 0;
        for (index, sample) in changed.iter().chain(touches.iter()).enumerate() {
            let seen = changed
                .iter()
                .chain(touches.iter())
                .take(index)
                .any(|earlier| earlier.id == sample.id);
            if seen || self.get(sample.id).is_some() {
                continue;
            }
            let contact = TouchContact {
                id: sample.id,
                start: sample.point,
                current: sample.point,
                start_ms: now_ms,
            };
            if self.contacts.push(contact).is_err() {
                self.ignored = self.ignored.saturating_add(1);
                log::warn!("touch: contact set full; dropping id={}", sample.id.0);
                continue;
            }
            inserted += 1;
        }
        inserted
    }

    /// Moves tracked contacts; unknown ids and repeated ids are ignored.
    pub fn update(&mut self, touches: &[ContactSample]) -> usize {
        let mut updated = 0;
        for (index, sample) in touches.iter().enumerate() {
            if is_repeat(touches, index) {
                self.ignored = self.ignored.saturating_add(1);
                continue;
            }
            match self.contacts.iter_mut().find(|c| c.id == sample.id) {
                Some(contact) => {
                    contact.current = sample.point;
                    updated += 1;
                }
                None => {
                    self.ignored = self.ignored.saturating_add(1);
                }
            }
        }
        updated
    }

    /// Removes lifted contacts plus anything no longer listed as pressed.
    pub fn release(&mut self, touches: &[ContactSample], changed: &[ContactSample]) -> Released {
        let mut released = Released::default();

        for (index, sample) in changed.iter().enumerate() {
            if is_repeat(changed, index) {
                continue;
            }
            match self.remove(sample.id) {
                Some(mut contact) => {
                    contact.current = sample.point;
                    let _ = released.contacts.push(contact);
                }
                None => {
                    self.ignored = self.ignored.saturating_add(1);
                }
            }
        }

        let mut index = 0;
        while index < self.contacts.len() {
            let id = self.contacts[index].id;
            if touches.iter().any(|sample| sample.id == id) {
                index += 1;
            } else {
                let contact = self.contacts.remove(index);
                let _ = released.contacts.push(contact);
            }
        }

        released
    }

    pub fn clear(&mut self) -> usize {
        let dropped = self.contacts.len();
        self.contacts.clear();
        dropped
    }

    fn remove(&mut self, id: ContactId) -> Option<TouchContact> {
        let index = self.contacts.iter().position(|c| c.id == id)?;
        Some(self.contacts.remove(index))
    }
}

fn is_repeat(samples: &[ContactSample], index: usize) -> bool {
    let id = samples[index].id;
    samples[..index].iter().any(|sample| sample.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(id: u32, x: i32, y: i32) -> ContactSample {
        ContactSample::new(id, x, y)
    }

    #[test]
    fn begin_ignores_duplicate_ids_in_one_event() {
        let mut tracker = TouchTracker::new();
        let touches = [s(1, 10, 10), s(1, 12, 12)];
        assert_eq!(tracker.begin(0, &touches, &touches), 1);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.get(ContactId(1)).map(|c| c.start), Some(TouchPoint::new(10, 10)));
    }

    #[test]
    fn update_moves_known_ids_and_counts_unknown() {
        let mut tracker = TouchTracker::new();
        tracker.begin(0, &[s(1, 0, 0)], &[s(1, 0, 0)]);

        assert_eq!(tracker.update(&[s(1, 30, 4), s(9, 1, 1)]), 1);

        let contact = tracker.get(ContactId(1)).copied().expect("tracked");
        assert_eq!(contact.current, TouchPoint::new(30, 4));
        assert_eq!(contact.start, TouchPoint::new(0, 0));
        assert_eq!(contact.delta(), (30, 4));
        assert_eq!(tracker.ignored(), 1);
        assert!(tracker.get(ContactId(9)).is_none());
    }

    #[test]
    fn update_keeps_first_sample_of_a_repeated_id() {
        let mut tracker = TouchTracker::new();
        tracker.begin(0, &[s(1, 0, 0)], &[s(1, 0, 0)]);

        assert_eq!(tracker.update(&[s(1, 20, 5), s(1, 90, 90)]), 1);

        let contact = tracker.get(ContactId(1)).copied().expect("tracked");
        assert_eq!(contact.current, TouchPoint::new(20, 5));
        assert_eq!(tracker.ignored(), 1);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn release_returns_lifted_contact_at_lift_position() {
        let mut tracker = TouchTracker::new();
        tracker.begin(5, &[s(1, 100, 100), s(2, 200, 100)], &[s(1, 100, 100), s(2, 200, 100)]);

        let released = tracker.release(&[s(2, 200, 100)], &[s(1, 170, 100)]);

        assert_eq!(released.count(), 1);
        let lifted = released.single().expect("one lifted");
        assert_eq!(lifted.id, ContactId(1));
        assert_eq!(lifted.current, TouchPoint::new(170, 100));
        assert_eq!(lifted.start_ms, 5);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn release_drops_contacts_missing_from_pressed_list() {
        let mut tracker = TouchTracker::new();
        tracker.begin(0, &[s(1, 0, 0), s(2, 5, 5)], &[s(1, 0, 0), s(2, 5, 5)]);

        // Host only reported id 1 lifting, but nothing remains pressed.
        let released = tracker.release(&[], &[s(1, 0, 0)]);

        assert_eq!(released.count(), 2);
        assert!(tracker.is_empty());
    }

    #[test]
    fn capacity_overflow_is_counted_not_fatal() {
        let mut tracker = TouchTracker::new();
        let many: std::vec::Vec<ContactSample> =
            (0..(MAX_TRACKED_CONTACTS as u32 + 2)).map(|id| s(id, 0, 0)).collect();

        assert_eq!(tracker.begin(0, &many, &many), MAX_TRACKED_CONTACTS);
        assert_eq!(tracker.ignored(), 2);
    }

    #[test]
    fn snapshot_exposes_first_two_contacts() {
        let mut tracker = TouchTracker::new();
        tracker.begin(0, &[s(7, 1, 2)], &[s(7, 1, 2)]);
        tracker.begin(3, &[s(7, 1, 2), s(8, 3, 4)], &[s(8, 3, 4)]);

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.count, 2);
        let (a, b) = snapshot.pair().expect("two contacts");
        assert_eq!((a.id, b.id), (ContactId(7), ContactId(8)));
        assert_eq!(b.start_ms, 3);
    }
}
