use super::*;

mod release;

impl GestureHsm {
    pub(crate) fn new(config: &'static GestureConfig) -> Self {
        Self {
            config,
            phase: GesturePhase::Idle,
            transform: TransformEngine::new(config),
            long_press: TimerSlot::new(TimerKind::LongPress),
            two_finger: TimerSlot::new(TimerKind::TwoFingerLongPress),
            last_tap_ms: None,
            pan_anchor: None,
            pinch: None,
            pinch_seen: false,
            panned: false,
            long_press_fired: false,
        }
    }

    /// Drops per-session state. The tap timestamp survives so the next
    /// contact can complete a double-tap.
    pub(super) fn reset_session(&mut self) {
        self.long_press.cancel();
        self.two_finger.cancel();
        self.pan_anchor = None;
        self.pinch = None;
        self.pinch_seen = false;
        self.panned = false;
        self.long_press_fired = false;
    }

    pub(super) fn abandon_session(&mut self) {
        self.reset_session();
        self.last_tap_ms = None;
        self.enter(GesturePhase::Idle);
    }

    pub(super) fn begin_single(
        &mut self,
        context: &mut DispatchContext,
        now_ms: u64,
        contact: TouchContact,
        surface_center: Option<TouchPoint>,
    ) {
        self.reset_session();

        let window_ms = self.config.double_tap.window_ms;
        let double_tap = self
            .last_tap_ms
            .is_some_and(|tap_ms| now_ms.saturating_sub(tap_ms) < window_ms);

        if double_tap {
            // Cleared so a third quick tap starts a new pair instead of retriggering.
            self.last_tap_ms = None;
            self.fire_double_tap(context, contact.start, surface_center);
        } else {
            self.last_tap_ms = Some(now_ms);
            self.long_press
                .schedule(now_ms, self.config.long_press.hold_ms);
        }

        // Anchored after a possible double-tap zoom so a follow-up drag pans
        // from the new translate.
        self.anchor_pan(contact.start);
    }

    pub(super) fn begin_pair(
        &mut self,
        context: &mut DispatchContext,
        now_ms: u64,
        contacts: &ContactSnapshot,
    ) {
        let Some((a, b)) = contacts.pair() else {
            return;
        };
        self.two_finger.cancel();
        self.pan_anchor = None;
        self.pinch = Some(PinchBaseline {
            distance: distance(a.current, b.current),
            distance_sq: squared_distance(a.current, b.current),
            scale: self.transform.state().scale,
            points: [a.current, b.current],
            engaged: false,
        });
        self.pinch_seen = true;
        self.two_finger
            .schedule(now_ms, self.config.long_press.two_finger_hold_ms);
        context.consume();
    }

    pub(super) fn anchor_pan(&mut self, point: TouchPoint) {
        let state = self.transform.state();
        self.pan_anchor = Some(PanAnchor {
            point,
            translate_x: state.translate_x,
            translate_y: state.translate_y,
        });
    }

    pub(super) fn track_single(&mut self, context: &mut DispatchContext, contact: TouchContact) {
        let jitter_sq = squared_i64(self.config.long_press.jitter_px);
        if self.long_press.is_armed()
            && squared_distance(contact.current, contact.start) > jitter_sq
        {
            self.long_press.cancel();
            log::debug!("touch: long press cancelled by movement");
        }

        if !self.transform.is_zoomed() {
            return;
        }
        let Some(anchor) = self.pan_anchor else {
            return;
        };

        context.consume();
        let dx = Fx::saturating_from_num(contact.current.x.saturating_sub(anchor.point.x));
        let dy = Fx::saturating_from_num(contact.current.y.saturating_sub(anchor.point.y));
        let state = self.transform.state();
        let step_x = anchor
            .translate_x
            .saturating_add(dx)
            .saturating_sub(state.translate_x);
        let step_y = anchor
            .translate_y
            .saturating_add(dy)
            .saturating_sub(state.translate_y);
        if self.transform.apply_pan(step_x, step_y) {
            self.panned = true;
            self.emit_transform(context);
        }
    }

    pub(super) fn track_pair(&mut self, context: &mut DispatchContext, contacts: &ContactSnapshot) {
        let (Some((a, b)), Some(mut pinch)) = (contacts.pair(), self.pinch) else {
            return;
        };
        context.consume();

        let current_sq = squared_distance(a.current, b.current);
        if !pinch.engaged {
            let current = distance(a.current, b.current);
            let threshold = self.config.long_press.pinch_threshold_px;
            let spread = current.saturating_sub(pinch.distance).saturating_abs();
            let drift_sq = squared_distance(a.current, pinch.points[0])
                .max(squared_distance(b.current, pinch.points[1]));
            if spread > threshold || drift_sq > squared_i64(threshold) {
                pinch.engaged = true;
                if self.two_finger.cancel() {
                    log::debug!("touch: two-finger long press cancelled by pinch");
                }
            }
        }

        if pinch.engaged
            && self
                .transform
                .apply_pinch(distance_ratio(current_sq, pinch.distance_sq), pinch.scale)
        {
            self.emit_transform(context);
        }
        self.pinch = Some(pinch);
    }

    pub(super) fn fire_double_tap(
        &mut self,
        context: &mut DispatchContext,
        point: TouchPoint,
        surface_center: Option<TouchPoint>,
    ) {
        let changed = if self.transform.is_zoomed() {
            context.emit(GestureAction::DoubleTapResetZoom);
            self.transform.reset()
        } else {
            let center = surface_center.unwrap_or_default();
            let offset = (
                Fx::saturating_from_num(point.x.saturating_sub(center.x)),
                Fx::saturating_from_num(point.y.saturating_sub(center.y)),
            );
            context.emit(GestureAction::DoubleTapZoom { point });
            self.transform
                .zoom_to_point(offset, fx_from_x100(self.config.double_tap.zoom_scale_x100))
        };
        if changed {
            self.emit_transform(context);
        }
    }

    pub(super) fn service_timers(&mut self, context: &mut DispatchContext, now_ms: u64) {
        if self.long_press.take_due(now_ms) {
            self.on_timer(context, TimerKind::LongPress);
        }
        if self.two_finger.take_due(now_ms) {
            self.on_timer(context, TimerKind::TwoFingerLongPress);
        }
    }

    pub(super) fn fire_token(&mut self, context: &mut DispatchContext, token: TimerToken) {
        let live = match token.kind {
            TimerKind::LongPress => self.long_press.take_matching(token),
            TimerKind::TwoFingerLongPress => self.two_finger.take_matching(token),
        };
        if live {
            self.on_timer(context, token.kind);
        } else {
            context.stale_timers = context.stale_timers.saturating_add(1);
            log::debug!("touch: ignoring stale {:?} timer", token.kind);
        }
    }

    fn on_timer(&mut self, context: &mut DispatchContext, kind: TimerKind) {
        context.timers_fired = context.timers_fired.saturating_add(1);
        match kind {
            TimerKind::LongPress => {
                if !self.long_press_fired {
                    self.long_press_fired = true;
                    context.emit(GestureAction::LongPress);
                }
            }
            TimerKind::TwoFingerLongPress => context.emit(GestureAction::TwoFingerLongPress),
        }
    }
}
