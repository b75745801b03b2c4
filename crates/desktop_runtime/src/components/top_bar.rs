use super::*;

#[component]
pub(super) fn TopBar() -> impl IntoView {
    let runtime = use_desktop_runtime();
    let chrome_height = runtime
        .registry
        .with_untracked(|registry| registry.config().chrome_height);
    let active = create_memo(move |_| {
        runtime.registry.with(|registry| {
            registry
                .active_window()
                .map(|record| (record.app_id.clone(), record.title.clone()))
        })
    });

    view! {
        <header class="desktop-top-bar" style=format!("height:{chrome_height}px;")>
            <span class="desktop-top-bar-title">
                {move || active.get().map(|(_, title)| title).unwrap_or_default()}
            </span>
            <Show when=move || active.get().is_some() fallback=|| ()>
                <div class="desktop-top-bar-actions">
                    <button
                        aria-label="Minimize active window"
                        on:click=move |_| {
                            if let Some((window_id, _)) = active.get_untracked() {
                                runtime.dispatch_action(DesktopAction::Minimize { window_id });
                            }
                        }
                    >
                        "\u{2013}"
                    </button>
                    <button
                        aria-label="Close active window"
                        on:click=move |_| {
                            if let Some((window_id, _)) = active.get_untracked() {
                                runtime.dispatch_action(DesktopAction::Close { window_id });
                            }
                        }
                    >
                        "\u{00D7}"
                    </button>
                </div>
            </Show>
        </header>
    }
}
