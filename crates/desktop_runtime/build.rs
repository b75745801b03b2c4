use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Position {
    x: i32,
    y: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Size {
    width: i32,
    height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppEntry {
    app_id: String,
    title: String,
    icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_position: Option<Position>,
    default_size: Size,
    #[serde(default = "default_true")]
    show_on_desktop: bool,
    #[serde(default = "default_true")]
    show_in_dock: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShellManifest {
    schema_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    window_manager: Option<toml::Table>,
    #[serde(default)]
    apps: Vec<AppEntry>,
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("shell.manifest.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: ShellManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if manifest.schema_version != 1 {
        panic!(
            "manifest schema mismatch in {}: expected 1 found {}",
            path.display(),
            manifest.schema_version
        );
    }

    let mut seen = BTreeSet::new();
    for app in &manifest.apps {
        if !seen.insert(app.app_id.clone()) {
            panic!("duplicate app id `{}` in {}", app.app_id, path.display());
        }
    }

    let json = serde_json::to_string_pretty(&manifest).expect("serialize shell manifest");
    let generated = format!(
        "/// Build-time generated shell manifest JSON.\n\
pub const SHELL_MANIFEST_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("shell_manifest_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
