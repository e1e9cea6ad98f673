use core::fmt;

use super::counters::GestureCounters;
use super::types::{GestureAction, SwipeDirection, TouchPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Capability {
    SwipeLeft = 0,
    SwipeRight = 1,
    DoubleTapZoom = 2,
    DoubleTapResetZoom = 3,
    LongPress = 4,
    TwoFingerLongPress = 5,
    VisualTransform = 6,
}

impl Capability {
    pub const ALL: [Capability; 7] = [
        Capability::SwipeLeft,
        Capability::SwipeRight,
        Capability::DoubleTapZoom,
        Capability::DoubleTapResetZoom,
        Capability::LongPress,
        Capability::TwoFingerLongPress,
        Capability::VisualTransform,
    ];

    const fn bit(self) -> u8 {
        1 << self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Capability::SwipeLeft => "swipe_left",
            Capability::SwipeRight => "swipe_right",
            Capability::DoubleTapZoom => "double_tap_zoom",
            Capability::DoubleTapResetZoom => "double_tap_reset_zoom",
            Capability::LongPress => "long_press",
            Capability::TwoFingerLongPress => "two_finger_long_press",
            Capability::VisualTransform => "apply_visual_transform",
        }
    }

    pub fn for_action(action: &GestureAction) -> Self {
        match action {
            GestureAction::Swipe(SwipeDirection::Left) => Capability::SwipeLeft,
            GestureAction::Swipe(SwipeDirection::Right) => Capability::SwipeRight,
            GestureAction::DoubleTapZoom { .. } => Capability::DoubleTapZoom,
            GestureAction::DoubleTapResetZoom => Capability::DoubleTapResetZoom,
            GestureAction::LongPress => Capability::LongPress,
            GestureAction::TwoFingerLongPress => Capability::TwoFingerLongPress,
            GestureAction::VisualTransform(_) => Capability::VisualTransform,
        }
    }
}

/// Set of capabilities a host has wired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    pub const fn none() -> Self {
        Self(0)
    }

    pub const fn all() -> Self {
        Self(0b0111_1111)
    }

    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    pub const fn without(self, capability: Capability) -> Self {
        Self(self.0 & !capability.bit())
    }

    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }
}

/// Failure reported by a host capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HostError {
    pub message: &'static str,
}

impl HostError {
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// Transient, non-fatal notice for the host UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notification {
    CapabilityFailed {
        capability: Capability,
        error: HostError,
    },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::CapabilityFailed { capability, error } => {
                write!(f, "{} failed: {error}", capability.label())
            }
        }
    }
}

pub type HostResult = Result<(), HostError>;

/// Capabilities the engine drives. Every method has a no-op default; hosts
/// advertise the ones they actually wire through [`GestureHost::capabilities`],
/// which is read once when the engine is built.
pub trait GestureHost {
    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::all()
    }

    fn swipe_left(&mut self) -> HostResult {
        Ok(())
    }

    fn swipe_right(&mut self) -> HostResult {
        Ok(())
    }

    fn double_tap_zoom(&mut self, point: TouchPoint) -> HostResult {
        let _ = point;
        Ok(())
    }

    fn double_tap_reset_zoom(&mut self) -> HostResult {
        Ok(())
    }

    fn long_press(&mut self) -> HostResult {
        Ok(())
    }

    fn two_finger_long_press(&mut self) -> HostResult {
        Ok(())
    }

    fn apply_visual_transform(
        &mut self,
        scale: f32,
        translate_x: f32,
        translate_y: f32,
    ) -> HostResult {
        let _ = (scale, translate_x, translate_y);
        Ok(())
    }

    /// Center of whichever display surface is currently active, used as
    /// the reference for double-tap zoom offsets.
    fn surface_center(&self) -> Option<TouchPoint> {
        None
    }

    fn notify(&mut self, notification: Notification) {
        let _ = notification;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchStatus {
    Delivered,
    Missing(Capability),
    Faulted(Capability),
}

pub struct Dispatcher<H> {
    host: H,
    capabilities: CapabilitySet,
}

impl<H: GestureHost> Dispatcher<H> {
    pub fn new(host: H) -> Self {
        let capabilities = host.capabilities();
        for capability in Capability::ALL {
            if !capabilities.contains(capability) {
                log::debug!("dispatch: host does not wire {}", capability.label());
            }
        }
        Self { host, capabilities }
    }

    pub fn capabilities(&self) -> CapabilitySet {
        self.capabilities
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn dispatch(
        &mut self,
        action: GestureAction,
        counters: &mut GestureCounters,
    ) -> DispatchStatus {
        let capability = Capability::for_action(&action);
        if !self.capabilities.contains(capability) {
            counters.missing_capabilities = counters.missing_capabilities.saturating_add(1);
            log::warn!("dispatch: {} not wired; dropping {:?}", capability.label(), action);
            return DispatchStatus::Missing(capability);
        }

        let result = match action {
            GestureAction::Swipe(SwipeDirection::Left) => self.host.swipe_left(),
            GestureAction::Swipe(SwipeDirection::Right) => self.host.swipe_right(),
            GestureAction::DoubleTapZoom { point } => self.host.double_tap_zoom(point),
            GestureAction::DoubleTapResetZoom => self.host.double_tap_reset_zoom(),
            GestureAction::LongPress => self.host.long_press(),
            GestureAction::TwoFingerLongPress => self.host.two_finger_long_press(),
            GestureAction::VisualTransform(state) => {
                let (tx, ty) = state.translate_f32();
                self.host.apply_visual_transform(state.scale_f32(), tx, ty)
            }
        };

        match result {
            Ok(()) => {
                if !matches!(action, GestureAction::VisualTransform(_)) {
                    counters.gestures_dispatched = counters.gestures_dispatched.saturating_add(1);
                    log::info!("dispatch: {}", capability.label());
                }
                DispatchStatus::Delivered
            }
            Err(error) => {
                counters.host_faults = counters.host_faults.saturating_add(1);
                log::warn!("dispatch: {} failed: {error}", capability.label());
                self.host
                    .notify(Notification::CapabilityFailed { capability, error });
                DispatchStatus::Faulted(capability)
            }
        }
    }
}
