//! Pure geometry helpers shared by the registry, the manipulation session and the compositor.

use crate::{
    config::WindowManagerConfig,
    model::{
        LayoutMode, PointerPosition, ResizeEdge, SnapPreview, Viewport, WindowPosition,
        WindowRecord, WindowRect, WindowSize,
    },
};

/// Portion of a window (px) that must stay reachable after a drag.
pub const MIN_VISIBLE_PX: i32 = 48;

/// Selects desktop or constrained behavior from the viewport width.
pub fn layout_mode(viewport: Viewport, config: &WindowManagerConfig) -> LayoutMode {
    if viewport.width >= config.desktop_min_width {
        LayoutMode::Desktop
    } else {
        LayoutMode::Constrained
    }
}

/// Returns the desktop area below the top chrome and above any reserved dock strip.
pub fn usable_area(viewport: Viewport, config: &WindowManagerConfig) -> WindowRect {
    WindowRect {
        x: 0,
        y: config.chrome_height,
        w: viewport.width.max(0),
        h: (viewport.height - config.chrome_height - config.dock_height).max(0),
    }
}

/// Classifies the pointer against the left, right and top snap zones, in that order.
pub fn snap_preview_for_pointer(
    pointer: PointerPosition,
    viewport: Viewport,
    config: &WindowManagerConfig,
) -> SnapPreview {
    if pointer.x < config.snap_threshold {
        SnapPreview::LeftHalf
    } else if pointer.x > viewport.width - config.snap_threshold {
        SnapPreview::RightHalf
    } else if pointer.y < config.chrome_height + config.snap_threshold {
        SnapPreview::Maximize
    } else {
        SnapPreview::None
    }
}

/// Returns the bounds a snap preview commits to, or `None` when nothing is armed.
pub fn snap_target_rect(
    preview: SnapPreview,
    viewport: Viewport,
    config: &WindowManagerConfig,
) -> Option<WindowRect> {
    let area = usable_area(viewport, config);
    let half = area.w / 2;
    let left_gap = config.snap_gutter / 2;
    let right_gap = config.snap_gutter - left_gap;

    let rect = match preview {
        SnapPreview::None => return None,
        SnapPreview::Maximize => area,
        SnapPreview::LeftHalf => WindowRect {
            w: half - left_gap,
            ..area
        },
        SnapPreview::RightHalf => WindowRect {
            x: area.x + half + right_gap,
            w: area.w - half - right_gap,
            ..area
        },
    };
    Some(rect.clamped_min(config.min_width, config.min_height))
}

/// Proposed origin for a dragged window, kept within reach of the pointer.
pub fn drag_origin(
    pointer: PointerPosition,
    anchor: PointerPosition,
    size: WindowSize,
    viewport: Viewport,
    config: &WindowManagerConfig,
) -> WindowPosition {
    let x = pointer.x - anchor.x;
    let y = pointer.y - anchor.y;
    let min_x = MIN_VISIBLE_PX - size.width;
    let max_x = (viewport.width - MIN_VISIBLE_PX).max(min_x);
    let min_y = config.chrome_height;
    let max_y = (viewport.height - MIN_VISIBLE_PX).max(min_y);
    WindowPosition {
        x: x.clamp(min_x, max_x),
        y: y.clamp(min_y, max_y),
    }
}

/// Applies resize deltas for an edge/corner drag.
///
/// Width and height never drop below the configured minimum and the top edge never rises into the
/// chrome. When either clamp engages, the origin follows the clamped size so the edge opposite the
/// handle stays where it was.
pub fn resize_rect(
    start: WindowRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    config: &WindowManagerConfig,
) -> WindowRect {
    let mut rect = start;

    if edge.moves_right() {
        rect.w = (start.w + dx).max(config.min_width);
    } else if edge.moves_left() {
        let right = start.right();
        rect.w = (start.w - dx).max(config.min_width);
        rect.x = right - rect.w;
    }

    if edge.moves_bottom() {
        rect.h = (start.h + dy).max(config.min_height);
    } else if edge.moves_top() {
        let bottom = start.bottom();
        let top = (start.y + dy).max(config.chrome_height.min(start.y));
        rect.h = (bottom - top).max(config.min_height);
        rect.y = bottom - rect.h;
    }

    rect
}

/// Raises a size to the configured minimum.
pub fn clamp_size(size: WindowSize, config: &WindowManagerConfig) -> WindowSize {
    WindowSize {
        width: size.width.max(config.min_width),
        height: size.height.max(config.min_height),
    }
}

/// Origin for an app that has no default position, stepped by the number of open windows.
pub fn cascade_position(open_windows: usize, config: &WindowManagerConfig) -> WindowPosition {
    let step = (open_windows % 8) as i32 * config.cascade_step;
    WindowPosition {
        x: 48 + step,
        y: config.chrome_height + 24 + step,
    }
}

/// Bounds a committed record occupies on screen.
pub fn effective_bounds(
    record: &WindowRecord,
    viewport: Viewport,
    config: &WindowManagerConfig,
) -> WindowRect {
    if record.maximized || layout_mode(viewport, config) == LayoutMode::Constrained {
        usable_area(viewport, config)
    } else {
        record.rect
    }
}
