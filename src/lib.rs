#![no_std]

#[cfg(test)]
extern crate std;

pub mod touch;

pub use touch::{
    config::{active_config, GestureConfig},
    counters::GestureCounters,
    dispatch::{Capability, CapabilitySet, GestureHost, HostError, HostResult, Notification},
    timers::{TimerKind, TimerToken},
    tracker::TouchContact,
    transform::{Fx, TransformState},
    types::{
        ContactId, ContactSample, GestureAction, GesturePhase, InputOutcome, SwipeDirection,
        TouchInput, TouchPhase, TouchPoint,
    },
    GestureEngine,
};
