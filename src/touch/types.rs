use super::transform::TransformState;

/// Host coordinates. Signed because client-space touches may start off-surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TouchPoint {
    pub x: i32,
    pub y: i32,
}

impl TouchPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub u32);

/// One contact as reported by the input source in a single event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactSample {
    pub id: ContactId,
    pub point: TouchPoint,
}

impl ContactSample {
    pub const fn new(id: u32, x: i32, y: i32) -> Self {
        Self {
            id: ContactId(id),
            point: TouchPoint::new(x, y),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A raw touch event.
///
/// `touches` lists every contact still pressed after the event; `changed`
/// lists the contacts that started (for `Start`) or lifted (for `End` and
/// `Cancel`) in this event.
#[derive(Clone, Copy, Debug)]
pub struct TouchInput<'a> {
    pub phase: TouchPhase,
    pub t_ms: u64,
    pub touches: &'a [ContactSample],
    pub changed: &'a [ContactSample],
}

impl<'a> TouchInput<'a> {
    pub fn start(t_ms: u64, touches: &'a [ContactSample], changed: &'a [ContactSample]) -> Self {
        Self {
            phase: TouchPhase::Start,
            t_ms,
            touches,
            changed,
        }
    }

    pub fn moved(t_ms: u64, touches: &'a [ContactSample]) -> Self {
        Self {
            phase: TouchPhase::Move,
            t_ms,
            touches,
            changed: &[],
        }
    }

    pub fn end(t_ms: u64, touches: &'a [ContactSample], changed: &'a [ContactSample]) -> Self {
        Self {
            phase: TouchPhase::End,
            t_ms,
            touches,
            changed,
        }
    }

    pub fn cancel(t_ms: u64, changed: &'a [ContactSample]) -> Self {
        Self {
            phase: TouchPhase::Cancel,
            t_ms,
            touches: &[],
            changed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty() && self.changed.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// A confirmed gesture or transform update, in dispatch order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureAction {
    Swipe(SwipeDirection),
    DoubleTapZoom { point: TouchPoint },
    DoubleTapResetZoom,
    LongPress,
    TwoFingerLongPress,
    VisualTransform(TransformState),
}

/// Classification phase, mirrored out of the state machine for inspection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    #[default]
    Idle,
    SingleContactPending,
    TwoContactGesturing,
    Trailing,
}

/// Returned from every input entry point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputOutcome {
    /// The engine acted on this event; hosts should suppress platform
    /// default handling (scrolling, browser zoom).
    pub consumed: bool,
}
