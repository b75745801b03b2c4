//! Contract types shared between the desktop window manager and the applications it hosts.
//!
//! The window manager treats every hosted application as an opaque surface: it reads an
//! [`AppDescriptor`] to decide where a new window goes and forwards launch props untouched through
//! [`AppMountContext`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::View;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable identifier for a hosted application.
///
/// The window manager keys window records by this id, so at most one window exists per app.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApplicationId(String);

impl ApplicationId {
    /// Returns an app identifier when `raw` conforms to the lowercase segment policy.
    pub fn new(raw: impl Into<String>) -> Result<Self, String> {
        let raw = raw.into();
        if is_valid_application_id(&raw) {
            Ok(Self(raw))
        } else {
            Err(format!(
                "invalid application id `{raw}`; expected lowercase segments separated by `.`"
            ))
        }
    }

    /// Returns the string form of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creates an id without validation for compile-time/runtime trusted constants.
    pub fn trusted(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ApplicationId {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ApplicationId> for String {
    fn from(id: ApplicationId) -> Self {
        id.0
    }
}

fn is_valid_application_id(raw: &str) -> bool {
    if raw.is_empty() || raw.len() > 120 {
        return false;
    }

    raw.split('.').all(|part| {
        let bytes = part.as_bytes();
        !part.is_empty()
            && part.len() <= 32
            && bytes[0].is_ascii_lowercase()
            && !part.ends_with('-')
            && bytes
                .iter()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
    })
}

/// Pixel position relative to the desktop surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppPosition {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

/// Pixel size of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSize {
    /// Width in px.
    pub width: i32,
    /// Height in px.
    pub height: i32,
}

/// Catalog entry describing how a hosted application is presented by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    /// Canonical app id.
    pub app_id: ApplicationId,
    /// Window title used when the app is launched.
    pub title: String,
    /// Icon token rendered by the dock and desktop icons.
    pub icon: String,
    /// Initial window position; cascaded from the desktop origin when absent.
    #[serde(default)]
    pub default_position: Option<AppPosition>,
    /// Initial window size.
    pub default_size: AppSize,
    /// Desktop icon visibility flag.
    #[serde(default = "default_true")]
    pub show_on_desktop: bool,
    /// Dock visibility flag.
    #[serde(default = "default_true")]
    pub show_in_dock: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Clone)]
/// Mount context injected by the window manager into a hosted application's surface.
pub struct AppMountContext {
    /// App id the surface belongs to.
    pub app_id: ApplicationId,
    /// Launch props supplied by the most recent `launch` call, passed through untouched.
    pub launch_props: Value,
}

/// Static app mount function used by the runtime app catalog.
pub type AppMountFn = fn(AppMountContext) -> View;

#[derive(Debug, Clone, Copy)]
/// Mounted app module descriptor used by the runtime app catalog.
pub struct AppModule {
    mount_fn: AppMountFn,
}

impl AppModule {
    /// Creates a module from a mount function.
    pub const fn new(mount_fn: AppMountFn) -> Self {
        Self { mount_fn }
    }

    /// Mounts the app view with a runtime-provided context.
    pub fn mount(self, context: AppMountContext) -> View {
        (self.mount_fn)(context)
    }
}

/// Returns the DOM id for the content host of an app's window.
pub fn window_content_dom_id(app_id: &ApplicationId) -> String {
    format!("window-content-{}", app_id.as_str().replace('.', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_id_requires_lowercase_segments() {
        assert!(ApplicationId::new("files").is_ok());
        assert!(ApplicationId::new("system.vault").is_ok());
        assert!(ApplicationId::new("Files").is_err());
        assert!(ApplicationId::new("notes-").is_err());
        assert!(ApplicationId::new("system..calc").is_err());
        assert!(ApplicationId::new("").is_err());
    }

    #[test]
    fn descriptor_deserializes_with_visibility_defaults() {
        let descriptor: AppDescriptor = serde_json::from_value(serde_json::json!({
            "app_id": "files",
            "title": "Files",
            "icon": "folder",
            "default_position": { "x": 100, "y": 80 },
            "default_size": { "width": 800, "height": 600 }
        }))
        .expect("descriptor");

        assert_eq!(descriptor.app_id, ApplicationId::trusted("files"));
        assert_eq!(descriptor.default_position, Some(AppPosition { x: 100, y: 80 }));
        assert!(descriptor.show_on_desktop);
        assert!(descriptor.show_in_dock);
    }

    #[test]
    fn descriptor_rejects_invalid_app_id() {
        let parsed = serde_json::from_value::<AppDescriptor>(serde_json::json!({
            "app_id": "Bad Id",
            "title": "Bad",
            "icon": "x",
            "default_size": { "width": 400, "height": 300 }
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn content_dom_id_flattens_namespaces() {
        assert_eq!(
            window_content_dom_id(&ApplicationId::trusted("system.vault")),
            "window-content-system-vault"
        );
    }
}
