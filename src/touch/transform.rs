use fixed::types::{I16F16, I32F32};
use fixed_sqrt::FixedSqrt;

use super::config::GestureConfig;

/// Fixed-point scale/translate unit.
pub type Fx = I16F16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransformState {
    pub scale: Fx,
    pub translate_x: Fx,
    pub translate_y: Fx,
}

impl TransformState {
    pub const IDENTITY: Self = Self {
        scale: Fx::ONE,
        translate_x: Fx::ZERO,
        translate_y: Fx::ZERO,
    };

    pub fn scale_f32(&self) -> f32 {
        self.scale.to_num::<f32>()
    }

    pub fn translate_f32(&self) -> (f32, f32) {
        (
            self.translate_x.to_num::<f32>(),
            self.translate_y.to_num::<f32>(),
        )
    }
}

impl Default for TransformState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

pub(crate) fn fx_from_x100(value_x100: u16) -> Fx {
    Fx::saturating_from_num(I32F32::from_num(value_x100) / I32F32::from_num(100))
}

/// Scale ratio `sqrt(current_sq / baseline_sq)` from squared contact
/// distances. A zero baseline (coincident contacts) counts as one unit.
pub(crate) fn distance_ratio(current_sq: i64, baseline_sq: i64) -> Fx {
    let current = I32F32::saturating_from_num(current_sq.max(0));
    let baseline = I32F32::saturating_from_num(baseline_sq.max(1));
    let ratio_sq = Fx::saturating_from_num(current.saturating_div(baseline));
    FixedSqrt::sqrt(ratio_sq.max(Fx::ZERO))
}

/// Owns the bounded pan/zoom transform. Every operation clamps silently and
/// reports whether the visible state changed.
#[derive(Clone, Copy, Debug)]
pub struct TransformEngine {
    state: TransformState,
    min_scale: Fx,
    max_scale: Fx,
    recenter_damping: Fx,
}

impl TransformEngine {
    /// Bounds are ordered here, so a hand-built config with `min > max`
    /// still clamps instead of panicking.
    pub fn new(config: &GestureConfig) -> Self {
        let lower = fx_from_x100(config.zoom.min_scale_x100);
        let upper = fx_from_x100(config.zoom.max_scale_x100);
        let min_scale = lower.min(upper);
        Self {
            state: TransformState {
                scale: min_scale,
                ..TransformState::IDENTITY
            },
            min_scale,
            max_scale: upper.max(lower),
            recenter_damping: fx_from_x100(config.double_tap.recenter_damping_x100),
        }
    }

    pub fn state(&self) -> TransformState {
        self.state
    }

    pub fn is_zoomed(&self) -> bool {
        self.state.scale > self.min_scale
    }

    pub fn clamp_scale(&self, scale: Fx) -> Fx {
        scale.clamp(self.min_scale, self.max_scale)
    }

    pub fn apply_pinch(&mut self, distance_ratio: Fx, baseline_scale: Fx) -> bool {
        let scale = self.clamp_scale(distance_ratio.saturating_mul(baseline_scale));
        self.commit(TransformState {
            scale,
            ..self.state
        })
    }

    /// Adds `(dx, dy)` to the translate. Ignored unless zoomed.
    pub fn apply_pan(&mut self, dx: Fx, dy: Fx) -> bool {
        if !self.is_zoomed() {
            return false;
        }
        self.commit(TransformState {
            translate_x: self.state.translate_x.saturating_add(dx),
            translate_y: self.state.translate_y.saturating_add(dy),
            ..self.state
        })
    }

    /// Zooms to `target_scale` and counter-translates by a damped fraction of
    /// `offset` (tap position relative to the surface center), pulling the
    /// tapped region toward the middle without fully recentering it.
    pub fn zoom_to_point(&mut self, offset: (Fx, Fx), target_scale: Fx) -> bool {
        let (ox, oy) = offset;
        self.commit(TransformState {
            scale: self.clamp_scale(target_scale),
            translate_x: ox.saturating_mul(self.recenter_damping).saturating_neg(),
            translate_y: oy.saturating_mul(self.recenter_damping).saturating_neg(),
        })
    }

    pub fn reset(&mut self) -> bool {
        self.commit(TransformState {
            scale: self.min_scale,
            ..TransformState::IDENTITY
        })
    }

    fn commit(&mut self, next: TransformState) -> bool {
        if next == self.state {
            return false;
        }
        self.state = next;
        true
    }
}
