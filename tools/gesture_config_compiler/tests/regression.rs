use std::path::PathBuf;

use gesture_config_compiler::{
    generate_from_path, parse_gestures_file, parse_gestures_str, render_generated_config,
    validate_config, ConfigCompilerError,
};

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("missing tools dir")
        .parent()
        .expect("missing repo root")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn repo_config_compiles_with_documented_defaults() {
    let config = repo_root().join("config/gestures.toml");
    let rendered = generate_from_path(&config).expect("repo config should compile");

    for needle in [
        "window_ms: 300,",
        "zoom_scale_x100: 200,",
        "recenter_damping_x100: 50,",
        "hold_ms: 500,",
        "jitter_px: 10,",
        "two_finger_hold_ms: 500,",
        "pinch_threshold_px: 10,",
        "min_distance_px: 50,",
        "min_velocity_x100: 30,",
        "min_scale_x100: 100,",
        "max_scale_x100: 400,",
    ] {
        assert!(
            rendered.contains(needle),
            "rendered output missing `{needle}`"
        );
    }
}

#[test]
fn generation_is_deterministic_for_same_input() {
    let config = fixture("valid_default.toml");
    let first = generate_from_path(&config).expect("first generation failed");
    let second = generate_from_path(&config).expect("second generation failed");
    assert_eq!(first, second);
}

#[test]
fn wide_zoom_range_renders_new_bounds() {
    let path = fixture("valid_wide_zoom.toml");
    let gestures = parse_gestures_file(&path).expect("fixture should parse");
    validate_config(&gestures).expect("fixture should validate");
    let rendered = render_generated_config(&gestures);

    assert!(rendered.contains("max_scale_x100: 800,"));
    assert!(rendered.contains("zoom_scale_x100: 300,"));
    assert!(rendered.starts_with("// @generated"));
}

#[test]
fn semantic_validation_rejects_invalid_ranges() {
    let cases = [
        ("invalid/window_zero.toml", "double_tap.window_ms must be > 0"),
        (
            "invalid/max_lt_min.toml",
            "zoom.max_scale_x100 must be >= zoom.min_scale_x100",
        ),
        (
            "invalid/min_below_one.toml",
            "zoom.min_scale_x100 must be >= 100",
        ),
        (
            "invalid/zoom_outside_range.toml",
            "double_tap.zoom_scale_x100 must lie within the zoom range",
        ),
        (
            "invalid/nonpositive_threshold.toml",
            "long_press movement thresholds must be positive integers",
        ),
        (
            "invalid/damping_over_one.toml",
            "double_tap.recenter_damping_x100 must be <= 100",
        ),
    ];

    for (fixture_name, expected_msg) in cases {
        let path = fixture(fixture_name);
        let err = generate_from_path(&path).expect_err("fixture should fail validation");
        match err {
            ConfigCompilerError::Validation(msg) => {
                assert!(
                    msg.contains(expected_msg),
                    "expected validation message containing `{expected_msg}`, got `{msg}`"
                );
            }
            other => panic!("expected validation error, got {other}"),
        }
    }
}

#[test]
fn parse_errors_are_reported_for_schema_mismatches() {
    for fixture_name in ["invalid/missing_zoom.toml", "invalid/unknown_field.toml"] {
        let err = generate_from_path(&fixture(fixture_name)).expect_err("fixture should fail");
        assert!(
            matches!(err, ConfigCompilerError::Parse(_)),
            "expected parse error for {fixture_name}, got {err}"
        );
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = generate_from_path(&fixture("does_not_exist.toml")).expect_err("should fail");
    assert!(matches!(err, ConfigCompilerError::Io(_)));
}

#[test]
fn inline_source_parses() {
    let source = std::fs::read_to_string(fixture("valid_default.toml")).expect("fixture");
    let gestures = parse_gestures_str(&source).expect("inline parse");
    assert_eq!(gestures.swipe.min_distance_px, 50);
    assert_eq!(gestures.long_press.two_finger_hold_ms, 500);
}
