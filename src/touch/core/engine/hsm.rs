use super::utils::{distance, squared_distance, squared_i64};
use super::*;
use crate::touch::{
    timers::{TimerKind, TimerSlot},
    transform::{distance_ratio, fx_from_x100, Fx, TransformEngine},
    types::SwipeDirection,
};
use statig::prelude::*;

mod core;

#[derive(Clone, Copy, Debug)]
struct PanAnchor {
    point: TouchPoint,
    translate_x: Fx,
    translate_y: Fx,
}

#[derive(Clone, Copy, Debug)]
struct PinchBaseline {
    distance: i32,
    distance_sq: i64,
    scale: Fx,
    points: [TouchPoint; 2],
    engaged: bool,
}

pub(super) struct GestureHsm {
    config: &'static GestureConfig,
    pub(super) phase: GesturePhase,
    pub(super) transform: TransformEngine,
    pub(super) long_press: TimerSlot,
    pub(super) two_finger: TimerSlot,
    last_tap_ms: Option<u64>,
    pan_anchor: Option<PanAnchor>,
    pinch: Option<PinchBaseline>,
    pinch_seen: bool,
    panned: bool,
    long_press_fired: bool,
}

#[state_machine(initial = "State::idle()")]
impl GestureHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Start {
                now_ms,
                contacts,
                surface_center,
            } => match (contacts.count, contacts.primary) {
                (1, Some(contact)) => {
                    self.begin_single(context, *now_ms, contact, *surface_center);
                    self.enter(GesturePhase::SingleContactPending);
                    Transition(State::single_pending())
                }
                (2, _) => {
                    self.reset_session();
                    self.begin_pair(context, *now_ms, contacts);
                    self.enter(GesturePhase::TwoContactGesturing);
                    Transition(State::two_contact())
                }
                (0, _) => Handled,
                _ => {
                    self.enter_trailing();
                    Transition(State::trailing())
                }
            },
            GestureHsmEvent::Move { .. } | GestureHsmEvent::End { .. } => Handled,
            other => self.handle_common(context, other),
        }
    }

    #[state]
    fn single_pending(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Start {
                now_ms, contacts, ..
            } => match contacts.count {
                0 | 1 => Handled,
                2 => {
                    // A second finger voids every single-contact intent.
                    self.long_press.cancel();
                    self.begin_pair(context, *now_ms, contacts);
                    self.enter(GesturePhase::TwoContactGesturing);
                    Transition(State::two_contact())
                }
                _ => {
                    self.enter_trailing();
                    Transition(State::trailing())
                }
            },
            GestureHsmEvent::Move { contacts, .. } => {
                if let (1, Some(contact)) = (contacts.count, contacts.primary) {
                    self.track_single(context, contact);
                }
                Handled
            }
            GestureHsmEvent::End {
                now_ms,
                contacts,
                lifted,
            } => {
                if contacts.count == 0 {
                    self.finish_single(context, *now_ms, *lifted);
                    self.enter(GesturePhase::Idle);
                    Transition(State::idle())
                } else {
                    Handled
                }
            }
            other => self.handle_common(context, other),
        }
    }

    #[state]
    fn two_contact(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Start { contacts, .. } => {
                if contacts.count > 2 {
                    self.enter_trailing();
                    Transition(State::trailing())
                } else {
                    Handled
                }
            }
            GestureHsmEvent::Move { contacts, .. } => {
                if contacts.count == 2 {
                    self.track_pair(context, contacts);
                }
                Handled
            }
            GestureHsmEvent::End { contacts, .. } => match (contacts.count, contacts.primary) {
                (0, _) => {
                    self.reset_session();
                    self.enter(GesturePhase::Idle);
                    Transition(State::idle())
                }
                (1, Some(remaining)) => {
                    self.two_finger.cancel();
                    self.pinch = None;
                    self.anchor_pan(remaining.current);
                    self.enter(GesturePhase::Trailing);
                    Transition(State::trailing())
                }
                _ => Handled,
            },
            other => self.handle_common(context, other),
        }
    }

    /// Contacts remain after a session lost its single-contact meaning.
    /// Nothing is classified until they all lift.
    #[state]
    fn trailing(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Start { .. } => Handled,
            GestureHsmEvent::Move { contacts, .. } => {
                if let (1, Some(contact)) = (contacts.count, contacts.primary) {
                    self.track_single(context, contact);
                }
                Handled
            }
            GestureHsmEvent::End { contacts, .. } => match (contacts.count, contacts.primary) {
                (0, _) => {
                    self.reset_session();
                    self.enter(GesturePhase::Idle);
                    Transition(State::idle())
                }
                (1, Some(remaining)) => {
                    if self.pan_anchor.is_none() {
                        self.anchor_pan(remaining.current);
                    }
                    Handled
                }
                _ => Handled,
            },
            other => self.handle_common(context, other),
        }
    }
}

impl GestureHsm {
    /// Events every state treats the same way.
    fn handle_common(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Tick { now_ms } => {
                self.service_timers(context, *now_ms);
                Handled
            }
            GestureHsmEvent::TimerFired { token, .. } => {
                self.fire_token(context, *token);
                Handled
            }
            GestureHsmEvent::ResetTransform => {
                if self.transform.reset() {
                    self.emit_transform(context);
                }
                Handled
            }
            GestureHsmEvent::Cancel { .. } => {
                self.abandon_session();
                Transition(State::idle())
            }
            GestureHsmEvent::Teardown => {
                self.abandon_session();
                Transition(State::idle())
            }
            GestureHsmEvent::Start { .. }
            | GestureHsmEvent::Move { .. }
            | GestureHsmEvent::End { .. } => Handled,
        }
    }

    fn enter(&mut self, phase: GesturePhase) {
        if self.phase != phase {
            log::debug!("touch: {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn enter_trailing(&mut self) {
        self.long_press.cancel();
        self.two_finger.cancel();
        self.pinch = None;
        self.pinch_seen = true;
        self.pan_anchor = None;
        self.enter(GesturePhase::Trailing);
    }

    fn emit_transform(&self, context: &mut DispatchContext) {
        context.emit(GestureAction::VisualTransform(self.transform.state()));
    }
}
