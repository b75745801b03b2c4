use super::*;
use crate::{
    apps,
    compositor::surface_for,
    model::{WindowId, WindowRecord},
};
use desktop_app_contract::{window_content_dom_id, AppMountContext};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
fn try_set_pointer_capture(ev: &web_sys::PointerEvent) {
    if let Some(target) = ev.current_target() {
        if let Ok(element) = target.dyn_into::<web_sys::Element>() {
            let _ = element.set_pointer_capture(ev.pointer_id());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn try_set_pointer_capture(_: &web_sys::PointerEvent) {}

#[component]
pub(super) fn DesktopWindow(window_id: WindowId) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let window_id = store_value(window_id);

    let record = create_memo(move |_| {
        runtime
            .registry
            .with(|registry| window_id.with_value(|id| registry.get(id).cloned()))
    });
    // `None` while minimized; the section stays mounted so the app keeps its state.
    let surface = create_memo(move |_| {
        let viewport = runtime.viewport.get();
        runtime.registry.with(|registry| {
            runtime.interaction.with(|interaction| {
                window_id.with_value(|id| surface_for(registry, interaction, viewport, id))
            })
        })
    });
    let title = Signal::derive(move || record.get().map(|w| w.title).unwrap_or_default());
    let interactive = Signal::derive(move || surface.get().map(|s| s.interactive).unwrap_or(false));

    let focus = move |_: web_sys::PointerEvent| {
        let active = surface.get_untracked().map(|s| s.active).unwrap_or(true);
        if !active {
            runtime.dispatch_action(DesktopAction::Focus {
                window_id: window_id.get_value(),
            });
        }
    };
    let minimize = move || {
        runtime.dispatch_action(DesktopAction::Minimize {
            window_id: window_id.get_value(),
        })
    };
    let close = move || {
        runtime.dispatch_action(DesktopAction::Close {
            window_id: window_id.get_value(),
        })
    };
    let toggle_maximize = move || {
        runtime.dispatch_action(DesktopAction::ToggleMaximize {
            window_id: window_id.get_value(),
        })
    };
    let begin_move = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        ev.stop_propagation();
        if !interactive.get_untracked() {
            focus(ev);
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        runtime.dispatch_action(DesktopAction::BeginMove {
            window_id: window_id.get_value(),
            pointer: pointer_from_pointer_event(&ev),
            viewport: runtime.viewport.get_untracked(),
        });
    };
    let titlebar_double_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        toggle_maximize();
    };

    view! {
        <section
            class=move || {
                let mut class = String::from("desktop-window");
                match surface.get() {
                    Some(s) => {
                        if s.active {
                            class.push_str(" focused");
                        }
                        if s.maximized {
                            class.push_str(" maximized");
                        }
                        if s.manipulating {
                            class.push_str(" manipulating");
                        }
                    }
                    None => class.push_str(" minimized"),
                }
                class
            }
            style=move || {
                surface
                    .get()
                    .map(|s| rect_style(s.bounds, Some(s.z_index)))
                    .unwrap_or_else(|| "display:none;".to_string())
            }
            on:pointerdown=focus
            role="dialog"
            aria-label=title
        >
            <header
                class="titlebar"
                on:pointerdown=begin_move
                on:dblclick=titlebar_double_click
            >
                <div class="titlebar-title">
                    <span class="titlebar-app-icon" aria-hidden="true">
                        {move || {
                            record.with(|w| {
                                w.as_ref()
                                    .map(|w| app_icon_glyph(&w.icon_id))
                                    .unwrap_or_default()
                            })
                        }}
                    </span>
                    <span>{title}</span>
                </div>
                <div class="titlebar-controls">
                    <button
                        aria-label="Minimize window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            minimize();
                        }
                    >
                        "\u{2013}"
                    </button>
                    <button
                        aria-label=move || {
                            if surface.get().map(|s| s.maximized).unwrap_or(false) {
                                "Restore window"
                            } else {
                                "Maximize window"
                            }
                        }
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            toggle_maximize();
                        }
                    >
                        "\u{25A1}"
                    </button>
                    <button
                        aria-label="Close window"
                        on:pointerdown=move |ev: web_sys::PointerEvent| ev.stop_propagation()
                        on:click=move |ev| {
                            stop_mouse_event(&ev);
                            close();
                        }
                    >
                        "\u{00D7}"
                    </button>
                </div>
            </header>
            <WindowBody record=record />
            <Show when=move || interactive.get() fallback=|| ()>
                {ResizeEdge::ALL
                    .into_iter()
                    .map(|edge| view! { <WindowResizeHandle window_id=window_id edge=edge /> })
                    .collect_view()}
            </Show>
        </section>
    }
}

#[component]
fn WindowResizeHandle(window_id: StoredValue<WindowId>, edge: ResizeEdge) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let class_name = format!("window-resize-handle {}", resize_edge_class(edge));

    let on_pointerdown = move |ev: web_sys::PointerEvent| {
        if !is_primary_press(&ev) {
            return;
        }
        try_set_pointer_capture(&ev);
        ev.prevent_default();
        ev.stop_propagation();
        runtime.dispatch_action(DesktopAction::BeginResize {
            window_id: window_id.get_value(),
            edge,
            pointer: pointer_from_pointer_event(&ev),
            viewport: runtime.viewport.get_untracked(),
        });
    };

    view! {
        <div
            class=class_name
            aria-hidden="true"
            on:pointerdown=on_pointerdown
        />
    }
}

/// Hosts the app view. It is remounted only when the launch props change, so relaunching with
/// identical props leaves the app untouched.
#[component]
fn WindowBody(record: Memo<Option<WindowRecord>>) -> impl IntoView {
    let launch = create_memo(move |_| {
        record.with(|w| {
            w.as_ref()
                .map(|w| (w.app_id.clone(), w.launch_props.clone()))
        })
    });
    let dom_id = record.with_untracked(|w| {
        w.as_ref()
            .map(|w| window_content_dom_id(&w.app_id))
            .unwrap_or_default()
    });

    view! {
        <div class="window-body" id=dom_id tabindex="-1">
            {move || {
                launch
                    .get()
                    .map(|(app_id, launch_props)| {
                        let module = apps::app_module(&app_id);
                        module.mount(AppMountContext { app_id, launch_props })
                    })
            }}
        </div>
    }
}
