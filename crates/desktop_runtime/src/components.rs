//! Desktop shell UI composition and interaction surfaces.

mod dock;
mod top_bar;
mod window;

use desktop_app_contract::AppDescriptor;
use leptos::*;
use serde_json::Value;

use self::{dock::Dock, top_bar::TopBar, window::DesktopWindow};

use crate::{
    apps::app_icon_glyph,
    model::{LayoutMode, PointerPosition, ResizeEdge, WindowRect},
    reducer::DesktopAction,
    window_manager::{layout_mode, snap_target_rect},
};

pub use crate::runtime_context::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext};

#[component]
/// Renders the full desktop shell: top bar, desktop icons, window layer, snap preview and dock.
pub fn DesktopShell() -> impl IntoView {
    let runtime = use_desktop_runtime();

    let mode = create_memo(move |_| {
        let viewport = runtime.viewport.get();
        runtime
            .registry
            .with(|registry| layout_mode(viewport, registry.config()))
    });
    let window_ids = create_memo(move |_| {
        runtime.registry.with(|registry| {
            registry
                .windows()
                .iter()
                .map(|record| record.app_id.clone())
                .collect::<Vec<_>>()
        })
    });

    let on_pointer_move = move |ev: web_sys::PointerEvent| {
        runtime.queue_pointer_sample(pointer_from_pointer_event(&ev));
    };
    let on_pointer_up = move |ev: web_sys::PointerEvent| {
        runtime.queue_pointer_sample(pointer_from_pointer_event(&ev));
        runtime.end_pointer_interaction();
    };
    let on_pointer_cancel = move |_| runtime.cancel_pointer_interaction();

    view! {
        <div
            id="desktop-shell-root"
            class="desktop-shell"
            tabindex="-1"
            data-layout=move || match mode.get() {
                LayoutMode::Desktop => "desktop",
                LayoutMode::Constrained => "constrained",
            }
            data-manipulating=move || (!runtime.interaction.with(|i| i.is_idle())).to_string()
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointercancel=on_pointer_cancel
        >
            <TopBar />
            <DesktopIcons />
            <div class="desktop-window-layer">
                <For each=move || window_ids.get() key=|id| id.to_string() let:window_id>
                    <DesktopWindow window_id=window_id />
                </For>
            </div>
            <SnapPreviewOverlay />
            <Dock />
        </div>
    }
}

#[component]
fn DesktopIcons() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let apps = runtime.catalog.with_value(|catalog| catalog.desktop_icon_apps());

    view! {
        <nav class="desktop-icon-grid" aria-label="Applications">
            <For each=move || apps.clone() key=|app| app.app_id.to_string() let:app>
                <DesktopIconButton app=app />
            </For>
        </nav>
    }
}

#[component]
fn DesktopIconButton(app: AppDescriptor) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let glyph = app_icon_glyph(&app.icon);
    let title = app.title.clone();
    let app_id = store_value(app.app_id);

    view! {
        <button
            class="desktop-icon"
            on:dblclick=move |ev| {
                stop_mouse_event(&ev);
                app_id.with_value(|id| runtime.launch_app(id, Value::Null));
            }
        >
            <span class="desktop-icon-glyph" aria-hidden="true">{glyph}</span>
            <span class="desktop-icon-label">{title}</span>
        </button>
    }
}

#[component]
fn SnapPreviewOverlay() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let target = create_memo(move |_| {
        let viewport = runtime.viewport.get();
        let preview = runtime.interaction.with(|interaction| interaction.snap_preview());
        runtime
            .registry
            .with(|registry| snap_target_rect(preview, viewport, registry.config()))
    });

    move || {
        target.get().map(|rect| {
            view! { <div class="snap-preview" aria-hidden="true" style=rect_style(rect, None) /> }
        })
    }
}

fn rect_style(rect: WindowRect, z_index: Option<u32>) -> String {
    let mut style = format!(
        "left:{}px;top:{}px;width:{}px;height:{}px;",
        rect.x, rect.y, rect.w, rect.h
    );
    if let Some(z_index) = z_index {
        style.push_str(&format!("z-index:{z_index};"));
    }
    style
}

fn stop_mouse_event(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Primary-button presses only; secondary touches of a multi-touch gesture are ignored.
fn is_primary_press(ev: &web_sys::PointerEvent) -> bool {
    if ev.pointer_type() == "mouse" {
        ev.button() == 0
    } else {
        ev.is_primary()
    }
}

fn resize_edge_class(edge: ResizeEdge) -> &'static str {
    match edge {
        ResizeEdge::North => "edge-n",
        ResizeEdge::South => "edge-s",
        ResizeEdge::East => "edge-e",
        ResizeEdge::West => "edge-w",
        ResizeEdge::NorthEast => "edge-ne",
        ResizeEdge::NorthWest => "edge-nw",
        ResizeEdge::SouthEast => "edge-se",
        ResizeEdge::SouthWest => "edge-sw",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rect_style_formats_bounds_and_optional_stacking() {
        let rect = WindowRect {
            x: 10,
            y: 42,
            w: 300,
            h: 200,
        };
        assert_eq!(
            rect_style(rect, None),
            "left:10px;top:42px;width:300px;height:200px;"
        );
        assert_eq!(
            rect_style(rect, Some(7)),
            "left:10px;top:42px;width:300px;height:200px;z-index:7;"
        );
    }

    #[test]
    fn every_resize_edge_has_a_distinct_class() {
        let mut classes: Vec<&str> = ResizeEdge::ALL
            .iter()
            .copied()
            .map(resize_edge_class)
            .collect();
        classes.sort_unstable();
        classes.dedup();
        assert_eq!(classes.len(), ResizeEdge::ALL.len());
    }
}
