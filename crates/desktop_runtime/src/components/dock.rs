use super::*;
use crate::registry::WindowRegistry;
use desktop_app_contract::ApplicationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct DockEntryState {
    running: bool,
    active: bool,
    minimized: bool,
}

fn dock_entry_state(registry: &WindowRegistry, app_id: &ApplicationId) -> DockEntryState {
    let Some(record) = registry.get(app_id) else {
        return DockEntryState::default();
    };
    DockEntryState {
        running: record.is_open,
        active: registry.active_window_id() == Some(app_id),
        minimized: record.minimized,
    }
}

#[component]
pub(super) fn Dock() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let apps = runtime.catalog.with_value(|catalog| catalog.dock_apps());

    view! {
        <footer class="desktop-dock" role="toolbar" aria-label="Dock">
            <For each=move || apps.clone() key=|app| app.app_id.to_string() let:app>
                <DockButton app=app />
            </For>
        </footer>
    }
}

#[component]
fn DockButton(app: AppDescriptor) -> impl IntoView {
    let runtime = use_desktop_runtime();
    let glyph = app_icon_glyph(&app.icon);
    let title = app.title.clone();
    let app_id = store_value(app.app_id);

    let state = create_memo(move |_| {
        runtime
            .registry
            .with(|registry| app_id.with_value(|id| dock_entry_state(registry, id)))
    });

    let on_click = move |ev: web_sys::MouseEvent| {
        stop_mouse_event(&ev);
        let window_id = app_id.get_value();
        if state.get_untracked().running {
            runtime.dispatch_action(DesktopAction::ToggleDockWindow { window_id });
        } else {
            runtime.launch_app(&window_id, Value::Null);
        }
    };

    view! {
        <button
            class="dock-item"
            class:running=move || state.get().running
            class:active=move || state.get().active
            class:minimized=move || state.get().minimized
            aria-label=title.clone()
            title=title
            aria-pressed=move || state.get().active.to_string()
            on:click=on_click
        >
            <span aria-hidden="true">{glyph}</span>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::AppSize;
    use pretty_assertions::assert_eq;

    use super::*;

    fn descriptor(id: &str) -> AppDescriptor {
        AppDescriptor {
            app_id: ApplicationId::trusted(id),
            title: id.to_string(),
            icon: "folder".to_string(),
            default_position: None,
            default_size: AppSize {
                width: 400,
                height: 300,
            },
            show_on_desktop: true,
            show_in_dock: true,
        }
    }

    #[test]
    fn dock_state_tracks_running_active_and_minimized() {
        let mut registry = WindowRegistry::default();
        let files = ApplicationId::trusted("files");
        let notes = ApplicationId::trusted("notes");
        assert_eq!(dock_entry_state(&registry, &files), DockEntryState::default());

        registry.launch(&descriptor("files"), Value::Null);
        registry.launch(&descriptor("notes"), Value::Null);
        assert_eq!(
            dock_entry_state(&registry, &notes),
            DockEntryState {
                running: true,
                active: true,
                minimized: false,
            }
        );

        registry.minimize(&notes);
        assert_eq!(
            dock_entry_state(&registry, &notes),
            DockEntryState {
                running: true,
                active: false,
                minimized: true,
            }
        );
        assert!(!dock_entry_state(&registry, &files).active);
    }
}
