pub mod config;
mod core;
pub mod counters;
pub mod dispatch;
pub mod timers;
pub mod tracker;
pub mod transform;
pub mod types;

use self::config::{active_config, GestureConfig};
use self::core::{CoreOutput, GestureCore, GestureHsmEvent, Lifted};
use self::counters::GestureCounters;
use self::dispatch::{CapabilitySet, Dispatcher, GestureHost};
use self::timers::TimerToken;
use self::tracker::{TouchContact, TouchTracker};
use self::transform::TransformState;
use self::types::{GesturePhase, InputOutcome, TouchInput, TouchPhase};

/// Turns raw touch input into gestures and pan/zoom updates for a host.
///
/// All entry points run to completion. Timers are deadlines: call
/// [`tick`](Self::tick) periodically, or arm a platform timer at
/// [`next_deadline_ms`](Self::next_deadline_ms) and report it through
/// [`timer_fired`](Self::timer_fired).
pub struct GestureEngine<H: GestureHost> {
    core: GestureCore,
    tracker: TouchTracker,
    dispatcher: Dispatcher<H>,
    counters: GestureCounters,
}

impl<H: GestureHost> GestureEngine<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, active_config())
    }

    pub fn with_config(host: H, config: &'static GestureConfig) -> Self {
        Self {
            core: GestureCore::new(config),
            tracker: TouchTracker::new(),
            dispatcher: Dispatcher::new(host),
            counters: GestureCounters::default(),
        }
    }

    pub fn handle_input(&mut self, input: &TouchInput<'_>) -> InputOutcome {
        self.counters.inputs = self.counters.inputs.saturating_add(1);
        let now_ms = input.t_ms;

        if input.is_empty() && input.phase != TouchPhase::Cancel {
            log::debug!("touch: empty {:?} event treated as cancel", input.phase);
            return self.cancel(now_ms);
        }

        let ignored_before = self.tracker.ignored();
        let event = match input.phase {
            TouchPhase::Start => {
                self.tracker.begin(now_ms, input.touches, input.changed);
                GestureHsmEvent::Start {
                    now_ms,
                    contacts: self.tracker.snapshot(),
                    surface_center: self.dispatcher.host().surface_center(),
                }
            }
            TouchPhase::Move => {
                self.tracker.update(input.touches);
                GestureHsmEvent::Move {
                    now_ms,
                    contacts: self.tracker.snapshot(),
                }
            }
            TouchPhase::End => {
                let released = self.tracker.release(input.touches, input.changed);
                GestureHsmEvent::End {
                    now_ms,
                    contacts: self.tracker.snapshot(),
                    lifted: Lifted::from(&released),
                }
            }
            TouchPhase::Cancel => return self.cancel(now_ms),
        };
        let ignored = self.tracker.ignored().saturating_sub(ignored_before);
        self.counters.ignored_contacts = self.counters.ignored_contacts.saturating_add(ignored);

        let output = self.core.handle(event);
        self.deliver(output)
    }

    /// Fires every timer whose deadline is at or before `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> InputOutcome {
        let output = self.core.handle(GestureHsmEvent::Tick { now_ms });
        self.deliver(output)
    }

    /// Reports a platform timer armed from [`pending_timers`](Self::pending_timers).
    /// Tokens for timers that were cancelled or already fired are ignored.
    pub fn timer_fired(&mut self, token: TimerToken, now_ms: u64) -> InputOutcome {
        let output = self
            .core
            .handle(GestureHsmEvent::TimerFired { now_ms, token });
        self.deliver(output)
    }

    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.core.next_deadline_ms()
    }

    pub fn pending_timers(&self) -> impl Iterator<Item = TimerToken> {
        self.core.pending_timers().into_iter().flatten()
    }

    /// Explicit host reset of the pan/zoom transform.
    pub fn reset_transform(&mut self) {
        let output = self.core.handle(GestureHsmEvent::ResetTransform);
        self.deliver(output);
    }

    /// Clears live timers, the contact set and the session. The transform
    /// is kept; use [`reset_transform`](Self::reset_transform) for that.
    pub fn teardown(&mut self) {
        self.tracker.clear();
        let output = self.core.handle(GestureHsmEvent::Teardown);
        self.deliver(output);
    }

    pub fn phase(&self) -> GesturePhase {
        self.core.phase()
    }

    pub fn transform(&self) -> TransformState {
        self.core.transform()
    }

    pub fn is_zoomed(&self) -> bool {
        self.core.is_zoomed()
    }

    pub fn active_contacts(&self) -> &[TouchContact] {
        self.tracker.contacts()
    }

    pub fn counters(&self) -> GestureCounters {
        self.counters
    }

    pub fn capabilities(&self) -> CapabilitySet {
        self.dispatcher.capabilities()
    }

    pub fn host(&self) -> &H {
        self.dispatcher.host()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.dispatcher.host_mut()
    }

    pub fn into_host(self) -> H {
        self.dispatcher.into_host()
    }

    fn cancel(&mut self, now_ms: u64) -> InputOutcome {
        self.counters.cancels = self.counters.cancels.saturating_add(1);
        self.tracker.clear();
        let output = self.core.handle(GestureHsmEvent::Cancel { now_ms });
        self.deliver(output)
    }

    fn deliver(&mut self, output: CoreOutput) -> InputOutcome {
        self.counters.timers_fired = self
            .counters
            .timers_fired
            .saturating_add(u32::from(output.timers_fired));
        self.counters.stale_timer_fires = self
            .counters
            .stale_timer_fires
            .saturating_add(u32::from(output.stale_timers));

        for action in output.actions {
            self.dispatcher.dispatch(action, &mut self.counters);
        }
        InputOutcome {
            consumed: output.consumed,
        }
    }
}
