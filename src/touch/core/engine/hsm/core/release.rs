use super::*;

impl GestureHsm {
    pub(in super::super) fn finish_single(
        &mut self,
        context: &mut DispatchContext,
        now_ms: u64,
        lifted: Lifted,
    ) {
        self.long_press.cancel();

        // Pinch sessions and pans of a zoomed image never turn into swipes.
        if !self.pinch_seen && !self.panned {
            if let Some(contact) = lifted.single {
                if let Some(direction) = self.classify_swipe(now_ms, contact) {
                    context.emit(GestureAction::Swipe(direction));
                }
            }
        }

        self.reset_session();
    }

    pub(in super::super) fn classify_swipe(
        &self,
        now_ms: u64,
        contact: TouchContact,
    ) -> Option<SwipeDirection> {
        let (dx, dy) = contact.delta();
        let ax = dx.unsigned_abs();
        let ay = dy.unsigned_abs();
        if ax <= ay {
            return None;
        }

        let swipe = self.config.swipe;
        if i64::from(ax) <= i64::from(swipe.min_distance_px) {
            return None;
        }

        // velocity = ax / elapsed, compared in hundredths of a unit per ms.
        let elapsed_ms = now_ms.saturating_sub(contact.start_ms).max(1);
        let travel_x100 = u64::from(ax).saturating_mul(100);
        if travel_x100 <= u64::from(swipe.min_velocity_x100).saturating_mul(elapsed_ms) {
            return None;
        }

        Some(if dx > 0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        })
    }
}
