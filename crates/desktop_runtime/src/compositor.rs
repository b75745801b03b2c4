//! Render plan for the shell: which surfaces to paint, where, and in what order.
//!
//! Only committed registry state is read, except for the one window under an active manipulation
//! session whose live proposed bounds are read through from [`InteractionState`].

use serde_json::Value;

use crate::{
    model::{LayoutMode, Viewport, WindowId, WindowRecord, WindowRect},
    registry::WindowRegistry,
    session::InteractionState,
    window_manager::{effective_bounds, layout_mode, snap_target_rect},
};

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceLayout {
    pub window_id: WindowId,
    pub title: String,
    pub icon_id: String,
    pub bounds: WindowRect,
    pub z_index: u32,
    pub active: bool,
    pub maximized: bool,
    /// Drag and resize affordances are live.
    pub interactive: bool,
    pub manipulating: bool,
    pub launch_props: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShellFrame {
    pub mode: LayoutMode,
    /// Visible surfaces in ascending stacking order.
    pub surfaces: Vec<SurfaceLayout>,
    /// Target of the armed snap zone during a drag.
    pub snap_preview: Option<WindowRect>,
}

pub fn compose_frame(
    registry: &WindowRegistry,
    interaction: &InteractionState,
    viewport: Viewport,
) -> ShellFrame {
    let surfaces = registry
        .visible_windows()
        .into_iter()
        .map(|record| layout_surface(registry, interaction, viewport, record))
        .collect();

    ShellFrame {
        mode: layout_mode(viewport, registry.config()),
        surfaces,
        snap_preview: snap_target_rect(interaction.snap_preview(), viewport, registry.config()),
    }
}

/// Layout for a single window, or `None` when it is closed or minimized.
pub fn surface_for(
    registry: &WindowRegistry,
    interaction: &InteractionState,
    viewport: Viewport,
    window_id: &WindowId,
) -> Option<SurfaceLayout> {
    registry
        .get(window_id)
        .filter(|record| record.is_visible())
        .map(|record| layout_surface(registry, interaction, viewport, record))
}

fn layout_surface(
    registry: &WindowRegistry,
    interaction: &InteractionState,
    viewport: Viewport,
    record: &WindowRecord,
) -> SurfaceLayout {
    let config = registry.config();
    let desktop = layout_mode(viewport, config) == LayoutMode::Desktop;
    let proposed = interaction
        .proposed_rect_for(&record.app_id)
        .filter(|_| desktop && !record.maximized);

    SurfaceLayout {
        window_id: record.app_id.clone(),
        title: record.title.clone(),
        icon_id: record.icon_id.clone(),
        bounds: proposed.unwrap_or_else(|| effective_bounds(record, viewport, config)),
        z_index: record.z_index,
        active: registry.active_window_id() == Some(&record.app_id),
        maximized: record.maximized,
        interactive: desktop && !record.maximized,
        manipulating: proposed.is_some(),
        launch_props: record.launch_props.clone(),
    }
}
