//! Window-manager tuning constants and the build-time embedded shell manifest.

use std::collections::BTreeSet;

use desktop_app_contract::AppDescriptor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

include!(concat!(env!("OUT_DIR"), "/shell_manifest_generated.rs"));

/// Shell manifest schema version accepted by this runtime.
pub const SHELL_MANIFEST_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Geometry constants consulted by the registry, the manipulation session and the compositor.
pub struct WindowManagerConfig {
    /// Minimum committed window width.
    pub min_width: i32,
    /// Minimum committed window height.
    pub min_height: i32,
    /// Pointer distance (px) from a screen edge that arms a snap preview.
    pub snap_threshold: i32,
    /// Height of the top bar excluded from the usable desktop area.
    pub chrome_height: i32,
    /// Height reserved at the bottom of the viewport; zero when the dock floats.
    pub dock_height: i32,
    /// Viewport width below which windows are pinned full-bleed.
    pub desktop_min_width: i32,
    /// Horizontal gap split between two half-snapped windows.
    pub snap_gutter: i32,
    /// Offset applied per open window when an app has no default position.
    pub cascade_step: i32,
}

impl Default for WindowManagerConfig {
    fn default() -> Self {
        Self {
            min_width: 300,
            min_height: 200,
            snap_threshold: 16,
            chrome_height: 32,
            dock_height: 0,
            desktop_min_width: 768,
            snap_gutter: 0,
            cascade_step: 24,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellManifest {
    pub schema_version: u32,
    #[serde(default)]
    pub window_manager: WindowManagerConfig,
    #[serde(default)]
    pub apps: Vec<AppDescriptor>,
}

impl Default for ShellManifest {
    fn default() -> Self {
        Self {
            schema_version: SHELL_MANIFEST_SCHEMA_VERSION,
            window_manager: WindowManagerConfig::default(),
            apps: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("shell manifest is not valid json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("shell manifest schema mismatch: expected {expected} found {found}")]
    SchemaMismatch { expected: u32, found: u32 },
    #[error("duplicate app id `{0}` in shell manifest")]
    DuplicateApp(String),
    #[error(
        "app `{app_id}` default size {width}x{height} is below the {min_width}x{min_height} minimum"
    )]
    UndersizedDefault {
        app_id: String,
        width: i32,
        height: i32,
        min_width: i32,
        min_height: i32,
    },
    #[error("window manager minimum size must be positive")]
    InvalidMinimum,
}

/// Parses and validates a shell manifest JSON document.
///
/// # Errors
///
/// Returns [`ManifestError`] for malformed JSON, schema mismatches, duplicate app ids and app
/// defaults that violate the configured minimum window size.
pub fn parse_shell_manifest(raw: &str) -> Result<ShellManifest, ManifestError> {
    let manifest: ShellManifest = serde_json::from_str(raw)?;
    if manifest.schema_version != SHELL_MANIFEST_SCHEMA_VERSION {
        return Err(ManifestError::SchemaMismatch {
            expected: SHELL_MANIFEST_SCHEMA_VERSION,
            found: manifest.schema_version,
        });
    }

    let wm = manifest.window_manager;
    if wm.min_width <= 0 || wm.min_height <= 0 {
        return Err(ManifestError::InvalidMinimum);
    }

    let mut seen = BTreeSet::new();
    for app in &manifest.apps {
        if !seen.insert(app.app_id.clone()) {
            return Err(ManifestError::DuplicateApp(app.app_id.to_string()));
        }
        if app.default_size.width < wm.min_width || app.default_size.height < wm.min_height {
            return Err(ManifestError::UndersizedDefault {
                app_id: app.app_id.to_string(),
                width: app.default_size.width,
                height: app.default_size.height,
                min_width: wm.min_width,
                min_height: wm.min_height,
            });
        }
    }

    Ok(manifest)
}

/// Loads the manifest embedded at build time from `shell.manifest.toml`.
///
/// # Errors
///
/// See [`parse_shell_manifest`].
pub fn load_shell_manifest() -> Result<ShellManifest, ManifestError> {
    parse_shell_manifest(SHELL_MANIFEST_JSON)
}
