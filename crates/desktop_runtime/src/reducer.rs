//! Reducer actions, side-effect intents, and transition logic for the window manager.

use desktop_app_contract::AppDescriptor;
use serde_json::Value;
use thiserror::Error;

use crate::{
    model::{PointerPosition, ResizeEdge, Viewport, WindowId, WindowPatch},
    registry::{LaunchOutcome, WindowRegistry},
    session::{InteractionState, SessionError, SessionOutcome},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`].
pub enum DesktopAction {
    /// Open an app window, or reactivate the existing one.
    Launch {
        /// Catalog entry of the app being launched.
        descriptor: AppDescriptor,
        /// Opaque payload forwarded to the hosted app.
        props: Value,
    },
    /// Close a window.
    Close {
        /// Window to close.
        window_id: WindowId,
    },
    /// Focus (and raise) a window.
    Focus {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window.
    Minimize {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Merge a partial update into a window record.
    Mutate {
        /// Window to update.
        window_id: WindowId,
        /// Fields to merge.
        patch: WindowPatch,
    },
    /// Maximize button or title-bar double-click.
    ToggleMaximize {
        /// Window to toggle.
        window_id: WindowId,
    },
    /// Dock button: minimize the active window, otherwise bring the window forward.
    ToggleDockWindow {
        /// Window associated with the dock button.
        window_id: WindowId,
    },
    /// Begin dragging a window by its title bar.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
        /// Current viewport.
        viewport: Viewport,
    },
    /// Begin resizing a window from an edge or corner handle.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
        /// Current viewport.
        viewport: Viewport,
    },
    /// Coalesced pointer-move sample for the live session.
    UpdatePointer {
        /// Latest pointer position.
        pointer: PointerPosition,
        /// Current viewport.
        viewport: Viewport,
    },
    /// Pointer released: commit the live session.
    EndManipulation {
        /// Final pointer sample not yet applied, if any.
        pointer: Option<PointerPosition>,
        /// Current viewport.
        viewport: Viewport,
    },
    /// Pointer cancelled: drop the live session without committing.
    CancelManipulation,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] for the shell runtime to execute.
pub enum RuntimeEffect {
    /// Move keyboard focus into the window's content host.
    FocusWindowContent(WindowId),
    /// A manipulation session finished.
    SessionEnded(SessionOutcome),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons an action was rejected. Registry operations on unknown ids are no-ops, not errors.
pub enum ReducerError {
    /// A manipulation session could not begin.
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Applies a [`DesktopAction`] to the registry and the interaction state.
///
/// # Errors
///
/// Returns [`ReducerError::Session`] when a drag or resize cannot begin.
pub fn reduce_desktop(
    registry: &mut WindowRegistry,
    interaction: &mut InteractionState,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::Launch { descriptor, props } => {
            let was_active = registry.active_window_id() == Some(&descriptor.app_id);
            let outcome = registry.launch(&descriptor, props);
            if outcome == LaunchOutcome::Created || !was_active {
                effects.push(RuntimeEffect::FocusWindowContent(descriptor.app_id));
            }
        }
        DesktopAction::Close { window_id } => {
            registry.close(&window_id);
            interaction.cancel_for(&window_id);
        }
        DesktopAction::Focus { window_id } => {
            let was_active = registry.active_window_id() == Some(&window_id);
            if registry.focus(&window_id) && !was_active {
                effects.push(RuntimeEffect::FocusWindowContent(window_id));
            }
        }
        DesktopAction::Minimize { window_id } => {
            if registry.minimize(&window_id) {
                interaction.cancel_for(&window_id);
            }
        }
        DesktopAction::Mutate { window_id, patch } => {
            let minimizes = patch.minimized == Some(true);
            if registry.mutate(&window_id, patch) && minimizes {
                interaction.cancel_for(&window_id);
            }
        }
        DesktopAction::ToggleMaximize { window_id } => {
            if registry.toggle_maximize(&window_id) {
                registry.focus(&window_id);
            }
        }
        DesktopAction::ToggleDockWindow { window_id } => {
            let Some(minimized) = registry.get(&window_id).map(|w| w.minimized) else {
                return Ok(effects);
            };
            if minimized {
                registry.mutate(
                    &window_id,
                    WindowPatch {
                        minimized: Some(false),
                        ..WindowPatch::default()
                    },
                );
                registry.focus(&window_id);
                effects.push(RuntimeEffect::FocusWindowContent(window_id));
            } else if registry.active_window_id() == Some(&window_id) {
                registry.minimize(&window_id);
                interaction.cancel_for(&window_id);
            } else {
                registry.focus(&window_id);
                effects.push(RuntimeEffect::FocusWindowContent(window_id));
            }
        }
        DesktopAction::BeginMove {
            window_id,
            pointer,
            viewport,
        } => {
            interaction.begin_drag(registry, &window_id, pointer, viewport)?;
            registry.focus(&window_id);
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
            viewport,
        } => {
            interaction.begin_resize(registry, &window_id, edge, pointer, viewport)?;
            registry.focus(&window_id);
        }
        DesktopAction::UpdatePointer { pointer, viewport } => {
            interaction.update(registry, pointer, viewport);
        }
        DesktopAction::EndManipulation { pointer, viewport } => {
            if let Some(pointer) = pointer {
                interaction.update(registry, pointer, viewport);
            }
            if let Some(outcome) = interaction.end(registry, viewport) {
                effects.push(RuntimeEffect::SessionEnded(outcome));
            }
        }
        DesktopAction::CancelManipulation => {
            interaction.cancel();
        }
    }
    Ok(effects)
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{AppPosition, AppSize, ApplicationId};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{SnapPreview, WindowRect};

    const VIEWPORT: Viewport = Viewport {
        width: 1280,
        height: 800,
    };

    fn descriptor(id: &str, x: i32, y: i32) -> AppDescriptor {
        AppDescriptor {
            app_id: ApplicationId::trusted(id),
            title: id.to_string(),
            icon: id.to_string(),
            default_position: Some(AppPosition { x, y }),
            default_size: AppSize {
                width: 800,
                height: 600,
            },
            show_on_desktop: true,
            show_in_dock: true,
        }
    }

    fn launch(
        registry: &mut WindowRegistry,
        interaction: &mut InteractionState,
        id: &str,
    ) -> WindowId {
        reduce_desktop(
            registry,
            interaction,
            DesktopAction::Launch {
                descriptor: descriptor(id, 100, 80),
                props: Value::Null,
            },
        )
        .expect("launch");
        ApplicationId::trusted(id)
    }

    #[test]
    fn launch_and_focus_emit_content_focus_only_on_change() {
        let mut registry = WindowRegistry::default();
        let mut interaction = InteractionState::default();
        let files = launch(&mut registry, &mut interaction, "files");
        let notes = launch(&mut registry, &mut interaction, "notes");

        let effects = reduce_desktop(
            &mut registry,
            &mut interaction,
            DesktopAction::Focus {
                window_id: notes.clone(),
            },
        )
        .unwrap();
        assert!(effects.is_empty());

        let effects = reduce_desktop(
            &mut registry,
            &mut interaction,
            DesktopAction::Focus {
                window_id: files.clone(),
            },
        )
        .unwrap();
        assert_eq!(effects, vec![RuntimeEffect::FocusWindowContent(files.clone())]);
        assert_eq!(registry.get(&files).unwrap().z_index, 3);
    }

    #[test]
    fn dock_toggle_minimizes_active_and_restores_minimized() {
        let mut registry = WindowRegistry::default();
        let mut interaction = InteractionState::default();
        let files = launch(&mut registry, &mut interaction, "files");

        reduce_desktop(
            &mut registry,
            &mut interaction,
            DesktopAction::ToggleDockWindow {
                window_id: files.clone(),
            },
        )
        .unwrap();
        assert!(registry.get(&files).unwrap().minimized);
        assert_eq!(registry.active_window_id(), None);

        reduce_desktop(
            &mut registry,
            &mut interaction,
            DesktopAction::ToggleDockWindow {
                window_id: files.clone(),
            },
        )
        .unwrap();
        assert!(!registry.get(&files).unwrap().minimized);
        assert_eq!(registry.active_window_id(), Some(&files));
    }

    #[test]
    fn drag_lifecycle_focuses_then_commits_on_release() {
        let mut registry = WindowRegistry::default();
        let mut interaction = InteractionState::default();
        let files = launch(&mut registry, &mut interaction, "files");
        launch(&mut registry, &mut interaction, "notes");

        reduce_desktop(
            &mut registry,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: files.clone(),
                pointer: PointerPosition { x: 300, y: 95 },
                viewport: VIEWPORT,
            },
        )
        .unwrap();
        assert_eq!(registry.active_window_id(), Some(&files));

        let effects = reduce_desktop(
            &mut registry,
            &mut interaction,
            DesktopAction::EndManipulation {
                pointer: Some(PointerPosition { x: 3, y: 500 }),
                viewport: VIEWPORT,
            },
        )
        .unwrap();
        assert_eq!(
            effects,
            vec![RuntimeEffect::SessionEnded(SessionOutcome::Snapped(
                files.clone(),
                SnapPreview::LeftHalf
            ))]
        );
        assert_eq!(
            registry.get(&files).unwrap().rect,
            WindowRect {
                x: 0,
                y: 32,
                w: 640,
                h: 768
            }
        );
        assert!(interaction.is_idle());
    }

    #[test]
    fn rejected_session_surfaces_as_error_without_state_change() {
        let mut registry = WindowRegistry::default();
        let mut interaction = InteractionState::default();
        let files = launch(&mut registry, &mut interaction, "files");
        reduce_desktop(
            &mut registry,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: files.clone(),
            },
        )
        .unwrap();
        let before = registry.clone();

        let err = reduce_desktop(
            &mut registry,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: files.clone(),
                pointer: PointerPosition { x: 300, y: 40 },
                viewport: VIEWPORT,
            },
        )
        .unwrap_err();
        assert_eq!(err, ReducerError::Session(SessionError::WindowMaximized(files)));
        assert_eq!(registry, before);
        assert!(interaction.is_idle());
    }

    #[test]
    fn closing_dragged_window_cancels_session() {
        let mut registry = WindowRegistry::default();
        let mut interaction = InteractionState::default();
        let files = launch(&mut registry, &mut interaction, "files");
        reduce_desktop(
            &mut registry,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: files.clone(),
                edge: ResizeEdge::East,
                pointer: PointerPosition { x: 900, y: 300 },
                viewport: VIEWPORT,
            },
        )
        .unwrap();
        reduce_desktop(
            &mut registry,
            &mut interaction,
            DesktopAction::Close {
                window_id: files.clone(),
            },
        )
        .unwrap();

        assert!(interaction.is_idle());
        let effects = reduce_desktop(
            &mut registry,
            &mut interaction,
            DesktopAction::EndManipulation {
                pointer: None,
                viewport: VIEWPORT,
            },
        )
        .unwrap();
        assert!(effects.is_empty());
        assert!(registry.get(&files).is_none());
    }

    #[test]
    fn cancel_manipulation_discards_proposed_geometry() {
        let mut registry = WindowRegistry::default();
        let mut interaction = InteractionState::default();
        let files = launch(&mut registry, &mut interaction, "files");
        let before = registry.get(&files).unwrap().rect;

        for action in [
            DesktopAction::BeginMove {
                window_id: files.clone(),
                pointer: PointerPosition { x: 300, y: 95 },
                viewport: VIEWPORT,
            },
            DesktopAction::UpdatePointer {
                pointer: PointerPosition { x: 600, y: 400 },
                viewport: VIEWPORT,
            },
            DesktopAction::CancelManipulation,
        ] {
            reduce_desktop(&mut registry, &mut interaction, action).unwrap();
        }

        assert_eq!(registry.get(&files).unwrap().rect, before);
        assert!(interaction.is_idle());
    }

    #[test]
    fn relaunching_active_window_skips_content_focus() {
        let mut registry = WindowRegistry::default();
        let mut interaction = InteractionState::default();
        let files = launch(&mut registry, &mut interaction, "files");
        launch(&mut registry, &mut interaction, "notes");

        let relaunch =
            |registry: &mut WindowRegistry, interaction: &mut InteractionState, id: &str| {
                reduce_desktop(
                    registry,
                    interaction,
                    DesktopAction::Launch {
                        descriptor: descriptor(id, 100, 80),
                        props: Value::Null,
                    },
                )
                .unwrap()
            };
        assert!(relaunch(&mut registry, &mut interaction, "notes").is_empty());
        assert_eq!(
            relaunch(&mut registry, &mut interaction, "files"),
            vec![RuntimeEffect::FocusWindowContent(files.clone())]
        );
        assert_eq!(registry.active_window_id(), Some(&files));
    }

    #[test]
    fn minimizing_dragged_window_cancels_session() {
        let mut registry = WindowRegistry::default();
        let mut interaction = InteractionState::default();
        let files = launch(&mut registry, &mut interaction, "files");
        for action in [
            DesktopAction::BeginMove {
                window_id: files.clone(),
                pointer: PointerPosition { x: 300, y: 95 },
                viewport: VIEWPORT,
            },
            DesktopAction::UpdatePointer {
                pointer: PointerPosition { x: 600, y: 10 },
                viewport: VIEWPORT,
            },
            DesktopAction::Minimize {
                window_id: files.clone(),
            },
        ] {
            reduce_desktop(&mut registry, &mut interaction, action).unwrap();
        }
        assert!(interaction.is_idle());

        let effects = reduce_desktop(
            &mut registry,
            &mut interaction,
            DesktopAction::EndManipulation {
                pointer: Some(PointerPosition { x: 600, y: 10 }),
                viewport: VIEWPORT,
            },
        )
        .unwrap();
        assert!(effects.is_empty());
        let record = registry.get(&files).unwrap();
        assert!(record.minimized);
        assert!(!record.restore_maximized);
    }

    #[test]
    fn titlebar_click_without_motion_keeps_geometry() {
        let mut registry = WindowRegistry::default();
        let mut interaction = InteractionState::default();
        reduce_desktop(
            &mut registry,
            &mut interaction,
            DesktopAction::Launch {
                descriptor: descriptor("files", 200, 32),
                props: Value::Null,
            },
        )
        .unwrap();
        let files = ApplicationId::trusted("files");
        let before = registry.get(&files).unwrap().rect;

        for action in [
            DesktopAction::BeginMove {
                window_id: files.clone(),
                pointer: PointerPosition { x: 600, y: 44 },
                viewport: VIEWPORT,
            },
            DesktopAction::EndManipulation {
                pointer: Some(PointerPosition { x: 600, y: 44 }),
                viewport: VIEWPORT,
            },
        ] {
            reduce_desktop(&mut registry, &mut interaction, action).unwrap();
        }

        let record = registry.get(&files).unwrap();
        assert!(!record.maximized);
        assert_eq!(record.rect, before);
        assert!(interaction.is_idle());
    }
}
