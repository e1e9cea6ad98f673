//! Compiles `config/gestures.toml` into the static `GESTURE_CONFIG` item that
//! `pinchframe::touch::config` includes from `OUT_DIR`.

use std::{fmt, fs, path::Path};

use serde::Deserialize;

#[derive(Debug)]
pub enum ConfigCompilerError {
    Io(String),
    Parse(String),
    Validation(String),
}

impl fmt::Display for ConfigCompilerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigCompilerError::Io(msg) => write!(f, "io error: {msg}"),
            ConfigCompilerError::Parse(msg) => write!(f, "parse error: {msg}"),
            ConfigCompilerError::Validation(msg) => write!(f, "validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigCompilerError {}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DoubleTapSection {
    pub window_ms: u64,
    pub zoom_scale_x100: u16,
    pub recenter_damping_x100: u16,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LongPressSection {
    pub hold_ms: u64,
    pub jitter_px: i32,
    pub two_finger_hold_ms: u64,
    pub pinch_threshold_px: i32,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SwipeSection {
    pub min_distance_px: i32,
    pub min_velocity_x100: u32,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ZoomSection {
    pub min_scale_x100: u16,
    pub max_scale_x100: u16,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GesturesFile {
    pub double_tap: DoubleTapSection,
    pub long_press: LongPressSection,
    pub swipe: SwipeSection,
    pub zoom: ZoomSection,
}

pub fn parse_gestures_str(source: &str) -> Result<GesturesFile, ConfigCompilerError> {
    toml::from_str(source).map_err(|e| ConfigCompilerError::Parse(e.to_string()))
}

pub fn parse_gestures_file(path: &Path) -> Result<GesturesFile, ConfigCompilerError> {
    let source = fs::read_to_string(path)
        .map_err(|e| ConfigCompilerError::Io(format!("{}: {e}", path.display())))?;
    parse_gestures_str(&source)
}

pub fn validate_config(config: &GesturesFile) -> Result<(), ConfigCompilerError> {
    let fail = |msg: &str| Err(ConfigCompilerError::Validation(msg.to_string()));

    if config.double_tap.window_ms == 0 {
        return fail("double_tap.window_ms must be > 0");
    }
    if config.double_tap.recenter_damping_x100 > 100 {
        return fail("double_tap.recenter_damping_x100 must be <= 100");
    }
    if config.long_press.hold_ms == 0 || config.long_press.two_finger_hold_ms == 0 {
        return fail("long_press hold windows must be > 0");
    }
    if config.long_press.jitter_px <= 0 || config.long_press.pinch_threshold_px <= 0 {
        return fail("long_press movement thresholds must be positive integers");
    }
    if config.swipe.min_distance_px <= 0 || config.swipe.min_velocity_x100 == 0 {
        return fail("swipe thresholds must be positive integers");
    }
    if config.zoom.min_scale_x100 < 100 {
        return fail("zoom.min_scale_x100 must be >= 100");
    }
    if config.zoom.max_scale_x100 < config.zoom.min_scale_x100 {
        return fail("zoom.max_scale_x100 must be >= zoom.min_scale_x100");
    }
    // I16F16 scale storage.
    if config.zoom.max_scale_x100 > 10_000 {
        return fail("zoom.max_scale_x100 must be <= 10000");
    }
    let zoom = config.double_tap.zoom_scale_x100;
    if zoom < config.zoom.min_scale_x100 || zoom > config.zoom.max_scale_x100 {
        return fail("double_tap.zoom_scale_x100 must lie within the zoom range");
    }
    Ok(())
}

pub fn render_generated_config(config: &GesturesFile) -> String {
    let mut out = String::new();
    out.push_str("// @generated by gesture_config_compiler. Do not edit.\n");
    out.push_str("pub static GESTURE_CONFIG: GestureConfig = GestureConfig {\n");
    out.push_str("    double_tap: DoubleTapConfig {\n");
    out.push_str(&format!(
        "        window_ms: {},\n",
        config.double_tap.window_ms
    ));
    out.push_str(&format!(
        "        zoom_scale_x100: {},\n",
        config.double_tap.zoom_scale_x100
    ));
    out.push_str(&format!(
        "        recenter_damping_x100: {},\n",
        config.double_tap.recenter_damping_x100
    ));
    out.push_str("    },\n");
    out.push_str("    long_press: LongPressConfig {\n");
    out.push_str(&format!("        hold_ms: {},\n", config.long_press.hold_ms));
    out.push_str(&format!(
        "        jitter_px: {},\n",
        config.long_press.jitter_px
    ));
    out.push_str(&format!(
        "        two_finger_hold_ms: {},\n",
        config.long_press.two_finger_hold_ms
    ));
    out.push_str(&format!(
        "        pinch_threshold_px: {},\n",
        config.long_press.pinch_threshold_px
    ));
    out.push_str("    },\n");
    out.push_str("    swipe: SwipeConfig {\n");
    out.push_str(&format!(
        "        min_distance_px: {},\n",
        config.swipe.min_distance_px
    ));
    out.push_str(&format!(
        "        min_velocity_x100: {},\n",
        config.swipe.min_velocity_x100
    ));
    out.push_str("    },\n");
    out.push_str("    zoom: ZoomConfig {\n");
    out.push_str(&format!(
        "        min_scale_x100: {},\n",
        config.zoom.min_scale_x100
    ));
    out.push_str(&format!(
        "        max_scale_x100: {},\n",
        config.zoom.max_scale_x100
    ));
    out.push_str("    },\n");
    out.push_str("};\n");
    out
}

pub fn generate_from_path(path: &Path) -> Result<String, ConfigCompilerError> {
    let config = parse_gestures_file(path)?;
    validate_config(&config)?;
    Ok(render_generated_config(&config))
}
