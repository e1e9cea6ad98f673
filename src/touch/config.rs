#[derive(Clone, Copy, Debug)]
pub struct DoubleTapConfig {
    pub window_ms: u64,
    pub zoom_scale_x100: u16,
    pub recenter_damping_x100: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct LongPressConfig {
    pub hold_ms: u64,
    pub jitter_px: i32,
    pub two_finger_hold_ms: u64,
    pub pinch_threshold_px: i32,
}

#[derive(Clone, Copy, Debug)]
pub struct SwipeConfig {
    pub min_distance_px: i32,
    pub min_velocity_x100: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct ZoomConfig {
    pub min_scale_x100: u16,
    pub max_scale_x100: u16,
}

#[derive(Clone, Copy, Debug)]
pub struct GestureConfig {
    pub double_tap: DoubleTapConfig,
    pub long_press: LongPressConfig,
    pub swipe: SwipeConfig,
    pub zoom: ZoomConfig,
}

include!(concat!(env!("OUT_DIR"), "/gesture_config.rs"));

pub fn active_config() -> &'static GestureConfig {
    &GESTURE_CONFIG
}
