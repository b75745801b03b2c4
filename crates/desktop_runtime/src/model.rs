use desktop_app_contract::{AppPosition, AppSize, ApplicationId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Window records are keyed by the identity of the app they host.
pub type WindowId = ApplicationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

impl From<AppPosition> for WindowPosition {
    fn from(position: AppPosition) -> Self {
        Self {
            x: position.x,
            y: position.y,
        }
    }
}

impl From<AppSize> for WindowSize {
    fn from(size: AppSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn from_parts(position: WindowPosition, size: WindowSize) -> Self {
        Self {
            x: position.x,
            y: position.y,
            w: size.width,
            h: size.height,
        }
    }

    pub fn position(self) -> WindowPosition {
        WindowPosition {
            x: self.x,
            y: self.y,
        }
    }

    pub fn size(self) -> WindowSize {
        WindowSize {
            width: self.w,
            height: self.h,
        }
    }

    pub fn right(self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(self) -> i32 {
        self.y + self.h
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }
}

/// Size of the browser viewport hosting the desktop, chrome included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub app_id: WindowId,
    pub title: String,
    pub icon_id: String,
    /// Committed free-form bounds. Ignored for rendering while `maximized` is set.
    pub rect: WindowRect,
    /// Bounds captured on the false -> true maximize transition.
    pub restore_rect: Option<WindowRect>,
    pub z_index: u32,
    pub is_open: bool,
    pub minimized: bool,
    pub maximized: bool,
    /// Maximize intent parked while the window is minimized.
    pub restore_maximized: bool,
    pub launch_props: Value,
}

impl WindowRecord {
    pub fn is_visible(&self) -> bool {
        self.is_open && !self.minimized
    }
}

/// Shallow update merged into a [`WindowRecord`] by
/// [`WindowRegistry::mutate`](crate::registry::WindowRegistry::mutate).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowPatch {
    pub position: Option<WindowPosition>,
    pub size: Option<WindowSize>,
    pub maximized: Option<bool>,
    pub minimized: Option<bool>,
    pub title: Option<String>,
    pub launch_props: Option<Value>,
}

impl WindowPatch {
    pub fn bounds(rect: WindowRect) -> Self {
        Self {
            position: Some(rect.position()),
            size: Some(rect.size()),
            ..Self::default()
        }
    }

    pub fn maximized(maximized: bool) -> Self {
        Self {
            maximized: Some(maximized),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::North,
        ResizeEdge::South,
        ResizeEdge::East,
        ResizeEdge::West,
        ResizeEdge::NorthEast,
        ResizeEdge::NorthWest,
        ResizeEdge::SouthEast,
        ResizeEdge::SouthWest,
    ];

    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::West | ResizeEdge::NorthWest | ResizeEdge::SouthWest
        )
    }

    pub fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::East | ResizeEdge::NorthEast | ResizeEdge::SouthEast
        )
    }

    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::North | ResizeEdge::NorthEast | ResizeEdge::NorthWest
        )
    }

    pub fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::South | ResizeEdge::SouthEast | ResizeEdge::SouthWest
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnapPreview {
    #[default]
    None,
    LeftHalf,
    RightHalf,
    Maximize,
}

/// Whether free-form window manipulation is available at the current viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    Desktop,
    Constrained,
}
