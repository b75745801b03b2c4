//! App catalog consumed by the window manager and the placeholder views mounted for hosted apps.

use desktop_app_contract::{AppDescriptor, AppModule, AppMountContext, ApplicationId};
use leptos::*;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppCatalog {
    apps: Vec<AppDescriptor>,
}

impl AppCatalog {
    pub fn new(apps: Vec<AppDescriptor>) -> Self {
        Self { apps }
    }

    pub fn descriptor(&self, app_id: &ApplicationId) -> Option<&AppDescriptor> {
        self.apps.iter().find(|app| app.app_id == *app_id)
    }

    pub fn desktop_icon_apps(&self) -> Vec<AppDescriptor> {
        self.apps
            .iter()
            .filter(|app| app.show_on_desktop)
            .cloned()
            .collect()
    }

    pub fn dock_apps(&self) -> Vec<AppDescriptor> {
        self.apps
            .iter()
            .filter(|app| app.show_in_dock)
            .cloned()
            .collect()
    }
}

/// Module that renders the content of `app_id`'s window.
pub fn app_module(app_id: &ApplicationId) -> AppModule {
    match app_id.as_str() {
        "files" => AppModule::new(mount_files),
        _ => AppModule::new(mount_placeholder),
    }
}

pub fn app_icon_glyph(icon: &str) -> &'static str {
    match icon {
        "folder" => "\u{1F4C1}",
        "notepad" => "\u{1F4DD}",
        "checklist" => "\u{2705}",
        "calendar" => "\u{1F4C5}",
        "wallet" => "\u{1F45B}",
        "mail" => "\u{2709}",
        "lock" => "\u{1F512}",
        _ => "\u{25A1}",
    }
}

fn placeholder_blurb(app_id: &ApplicationId) -> &'static str {
    match app_id.as_str() {
        "notes" => "Notes sync from the hosted database.",
        "tasks" => "Tasks and checklists.",
        "calendar" => "Upcoming events.",
        "wallet" => "Balances and transactions.",
        "email" => "Inbox.",
        "vault" => "Locked entries.",
        _ => "Application content.",
    }
}

fn mount_placeholder(context: AppMountContext) -> View {
    let blurb = placeholder_blurb(&context.app_id);
    let props = render_props(&context);
    view! {
        <div class="app app-placeholder" data-app-id=context.app_id.to_string()>
            <p>{blurb}</p>
            {props}
        </div>
    }
    .into_view()
}

fn mount_files(context: AppMountContext) -> View {
    let path = context
        .launch_props
        .get("path")
        .and_then(|value| value.as_str())
        .unwrap_or("/")
        .to_string();
    view! {
        <div class="app app-files">
            <p class="app-files-path">{path}</p>
        </div>
    }
    .into_view()
}

fn render_props(context: &AppMountContext) -> Option<View> {
    if context.launch_props.is_null() {
        return None;
    }
    let text = serde_json::to_string_pretty(&context.launch_props).ok()?;
    Some(view! { <pre class="app-launch-props">{text}</pre> }.into_view())
}
