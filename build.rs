use std::{
    env, fs,
    path::{Path, PathBuf},
};

use gesture_config_compiler::{generate_from_path, ConfigCompilerError};

const GESTURE_CONFIG_TOML: &str = "config/gestures.toml";
const GENERATED_FILE: &str = "gesture_config.rs";

fn env_path(key: &str) -> PathBuf {
    env::var_os(key)
        .map(PathBuf::from)
        .unwrap_or_else(|| panic!("cargo did not set {key}"))
}

fn compile(source: &Path, target: &Path) -> Result<(), ConfigCompilerError> {
    let rendered = generate_from_path(source)?;
    fs::write(target, rendered)
        .map_err(|e| ConfigCompilerError::Io(format!("{}: {e}", target.display())))
}

fn main() {
    let source = env_path("CARGO_MANIFEST_DIR").join(GESTURE_CONFIG_TOML);
    let target = env_path("OUT_DIR").join(GENERATED_FILE);
    println!("cargo:rerun-if-changed={}", source.display());
    println!("cargo:rerun-if-changed=build.rs");

    if let Err(err) = compile(&source, &target) {
        panic!("{GESTURE_CONFIG_TOML}: {err}");
    }
}
