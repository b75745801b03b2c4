//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived registry and interaction signals, the runtime effect queue,
//! pointer-sample coalescing, and viewport tracking. UI composition stays in
//! [`crate::components`].

use desktop_app_contract::ApplicationId;
use leptos::*;
use serde_json::Value;

use crate::{
    apps::AppCatalog,
    config::{load_shell_manifest, ShellManifest},
    effect_executor,
    frame::PointerCoalescer,
    host::DesktopHostContext,
    model::{LayoutMode, PointerPosition, Viewport},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    registry::WindowRegistry,
    session::InteractionState,
    window_manager::layout_mode,
};

#[derive(Clone, Copy)]
/// Leptos context for reading desktop runtime state and dispatching [`DesktopAction`] values.
pub struct DesktopRuntimeContext {
    /// Host boundary for effects and environment queries.
    pub host: StoredValue<DesktopHostContext>,
    /// Apps the shell can launch.
    pub catalog: StoredValue<AppCatalog>,
    /// Committed window records.
    pub registry: RwSignal<WindowRegistry>,
    /// Live drag/resize session.
    pub interaction: RwSignal<InteractionState>,
    /// Last measured browser viewport.
    pub viewport: RwSignal<Viewport>,
    /// Queue of runtime effects emitted by the reducer and processed by the executor.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Pointer-move samples waiting for the next animation frame.
    pub pointer: StoredValue<PointerCoalescer>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<DesktopAction>,
}

impl DesktopRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.dispatch.call(action);
    }

    /// Launches `app_id` from the catalog, or reactivates its window.
    pub fn launch_app(&self, app_id: &ApplicationId, props: Value) {
        let Some(descriptor) = self
            .catalog
            .with_value(|catalog| catalog.descriptor(app_id).cloned())
        else {
            logging::warn!("launch requested for unknown app `{app_id}`");
            return;
        };
        self.dispatch_action(DesktopAction::Launch { descriptor, props });
    }

    /// Records a pointer-move sample; geometry is recomputed on the next animation frame.
    pub fn queue_pointer_sample(&self, pointer: PointerPosition) {
        if self.interaction.with_untracked(InteractionState::is_idle) {
            return;
        }
        let schedule = self
            .pointer
            .try_update_value(|pending| pending.push(pointer))
            .unwrap_or(false);
        if schedule {
            let runtime = *self;
            self.host
                .get_value()
                .request_frame(move || runtime.flush_pointer_frame());
        }
    }

    fn flush_pointer_frame(&self) {
        let Some(pointer) = self
            .pointer
            .try_update_value(PointerCoalescer::flush)
            .flatten()
        else {
            return;
        };
        if self.interaction.with_untracked(InteractionState::is_idle) {
            return;
        }
        self.dispatch_action(DesktopAction::UpdatePointer {
            pointer,
            viewport: self.viewport.get_untracked(),
        });
    }

    /// Pointer released: commits the live session with the newest unflushed sample.
    pub fn end_pointer_interaction(&self) {
        let pointer = self
            .pointer
            .try_update_value(PointerCoalescer::take_pending)
            .flatten();
        if self.interaction.with_untracked(InteractionState::is_idle) {
            return;
        }
        self.dispatch_action(DesktopAction::EndManipulation {
            pointer,
            viewport: self.viewport.get_untracked(),
        });
    }

    /// Pointer cancelled by the browser: drops the live session.
    pub fn cancel_pointer_interaction(&self) {
        self.pointer.update_value(|pending| {
            pending.take_pending();
        });
        if self.interaction.with_untracked(InteractionState::is_idle) {
            return;
        }
        self.dispatch_action(DesktopAction::CancelManipulation);
    }

    fn sync_viewport(&self) {
        let next = self.host.get_value().viewport();
        if next == self.viewport.get_untracked() {
            return;
        }
        self.viewport.set(next);

        let constrained = self
            .registry
            .with_untracked(|registry| layout_mode(next, registry.config()))
            == LayoutMode::Constrained;
        if constrained {
            self.cancel_pointer_interaction();
        }
    }
}

fn load_manifest() -> ShellManifest {
    load_shell_manifest().unwrap_or_else(|err| {
        logging::warn!("shell manifest rejected, starting with an empty catalog: {err}");
        ShellManifest::default()
    })
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(children: Children) -> impl IntoView {
    let manifest = load_manifest();
    let host = store_value(DesktopHostContext);
    let catalog = store_value(AppCatalog::new(manifest.apps));
    let registry = create_rw_signal(WindowRegistry::new(manifest.window_manager));
    let interaction = create_rw_signal(InteractionState::default());
    let viewport = create_rw_signal(host.get_value().viewport());
    let effects = create_rw_signal(Vec::<RuntimeEffect>::new());
    let pointer = store_value(PointerCoalescer::default());

    let dispatch = Callback::new(move |action: DesktopAction| {
        let mut windows = registry.get_untracked();
        let mut ui = interaction.get_untracked();
        let previous_windows = windows.clone();
        let previous_ui = ui.clone();

        match reduce_desktop(&mut windows, &mut ui, action) {
            Ok(new_effects) => {
                if windows != previous_windows {
                    registry.set(windows);
                }
                if ui != previous_ui {
                    interaction.set(ui);
                }
                if !new_effects.is_empty() {
                    effects.update(|queue| queue.extend(new_effects));
                }
            }
            Err(err) => logging::debug_warn!("desktop reducer rejected action: {err}"),
        }
    });

    let runtime = DesktopRuntimeContext {
        host,
        catalog,
        registry,
        interaction,
        viewport,
        effects,
        pointer,
        dispatch,
    };

    provide_context(runtime);

    let resize_listener = window_event_listener(ev::resize, move |_| runtime.sync_viewport());
    on_cleanup(move || resize_listener.remove());

    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
