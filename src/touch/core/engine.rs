use statig::blocking::IntoStateMachineExt as _;

mod hsm;
mod utils;

use hsm::GestureHsm;

use crate::touch::{
    config::GestureConfig,
    timers::TimerToken,
    tracker::{ContactSnapshot, Released, TouchContact},
    transform::TransformState,
    types::{GestureAction, GesturePhase, TouchPoint},
};

pub(crate) const MAX_ACTIONS: usize = 4;

pub(crate) type ActionList = heapless::Vec<GestureAction, MAX_ACTIONS>;

/// The lifted contact of an end event, when exactly one ended.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Lifted {
    pub(crate) single: Option<TouchContact>,
}

impl From<&Released> for Lifted {
    fn from(released: &Released) -> Self {
        Self {
            single: released.single(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) enum GestureHsmEvent {
    Start {
        now_ms: u64,
        contacts: ContactSnapshot,
        surface_center: Option<TouchPoint>,
    },
    Move {
        now_ms: u64,
        contacts: ContactSnapshot,
    },
    End {
        now_ms: u64,
        contacts: ContactSnapshot,
        lifted: Lifted,
    },
    Cancel {
        now_ms: u64,
    },
    Tick {
        now_ms: u64,
    },
    TimerFired {
        now_ms: u64,
        token: TimerToken,
    },
    ResetTransform,
    Teardown,
}

impl GestureHsmEvent {
    /// Input events first flush timers that came due before them.
    fn input_time_ms(&self) -> Option<u64> {
        match self {
            GestureHsmEvent::Start { now_ms, .. }
            | GestureHsmEvent::Move { now_ms, .. }
            | GestureHsmEvent::End { now_ms, .. }
            | GestureHsmEvent::Cancel { now_ms } => Some(*now_ms),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct DispatchContext {
    actions: ActionList,
    consumed: bool,
    timers_fired: u8,
    stale_timers: u8,
}

impl DispatchContext {
    fn emit(&mut self, action: GestureAction) {
        self.consumed = true;
        if self.actions.push(action).is_err() {
            log::warn!("touch: action buffer full; dropping {:?}", action);
        }
    }

    fn consume(&mut self) {
        self.consumed = true;
    }

    fn finish(self) -> CoreOutput {
        CoreOutput {
            actions: self.actions,
            consumed: self.consumed,
            timers_fired: self.timers_fired,
            stale_timers: self.stale_timers,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub(crate) struct CoreOutput {
    pub(crate) actions: ActionList,
    pub(crate) consumed: bool,
    pub(crate) timers_fired: u8,
    pub(crate) stale_timers: u8,
}

pub(crate) struct GestureCore {
    machine: statig::blocking::StateMachine<GestureHsm>,
}

impl GestureCore {
    pub(crate) fn new(config: &'static GestureConfig) -> Self {
        Self {
            machine: GestureHsm::new(config).state_machine(),
        }
    }

    pub(crate) fn handle(&mut self, event: GestureHsmEvent) -> CoreOutput {
        let mut context = DispatchContext::default();
        if let Some(now_ms) = event.input_time_ms() {
            self.machine
                .handle_with_context(&GestureHsmEvent::Tick { now_ms }, &mut context);
        }
        self.machine.handle_with_context(&event, &mut context);
        context.finish()
    }

    pub(crate) fn phase(&self) -> GesturePhase {
        self.machine.inner().phase
    }

    pub(crate) fn transform(&self) -> TransformState {
        self.machine.inner().transform.state()
    }

    pub(crate) fn is_zoomed(&self) -> bool {
        self.machine.inner().transform.is_zoomed()
    }

    pub(crate) fn pending_timers(&self) -> [Option<TimerToken>; 2] {
        let hsm = self.machine.inner();
        [hsm.long_press.token(), hsm.two_finger.token()]
    }

    pub(crate) fn next_deadline_ms(&self) -> Option<u64> {
        let hsm = self.machine.inner();
        match (hsm.long_press.deadline_ms(), hsm.two_finger.deadline_ms()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
