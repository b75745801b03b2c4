//! Ephemeral drag/resize state that lives between pointer-down and pointer-up.
//!
//! At most one session exists. A pointer-down while a session is live is ignored
//! ([`SessionError::AlreadyActive`]); the live session keeps its target until released.

use thiserror::Error;

use crate::{
    model::{
        LayoutMode, PointerPosition, ResizeEdge, SnapPreview, Viewport, WindowId, WindowPatch,
        WindowRect,
    },
    registry::WindowRegistry,
    window_manager::{
        drag_origin, layout_mode, resize_rect, snap_preview_for_pointer, snap_target_rect,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Dragging,
    Resizing(ResizeEdge),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManipulationSession {
    pub window_id: WindowId,
    pub mode: SessionMode,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
    /// Pointer offset from the window origin at pointer-down.
    pub anchor: PointerPosition,
    pub last_pointer: PointerPosition,
    pub proposed: WindowRect,
    pub snap_preview: SnapPreview,
    /// Set once a sample lands away from `pointer_start`; a release before that is a click.
    pub moved: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("a manipulation session is already active for `{0}`")]
    AlreadyActive(WindowId),
    #[error("window `{0}` not found")]
    WindowNotFound(WindowId),
    #[error("window `{0}` is maximized")]
    WindowMaximized(WindowId),
    #[error("window `{0}` is minimized")]
    WindowMinimized(WindowId),
    #[error("viewport is below the desktop width threshold")]
    ConstrainedViewport,
}

/// How a released session was written back into the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Moved(WindowId),
    Snapped(WindowId, SnapPreview),
    Resized(WindowId),
    /// The target disappeared before release; nothing was written.
    Cancelled(WindowId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub session: Option<ManipulationSession>,
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    /// Proposed bounds for `window_id` while it is the session target.
    pub fn proposed_rect_for(&self, window_id: &WindowId) -> Option<WindowRect> {
        self.session
            .as_ref()
            .filter(|session| session.window_id == *window_id)
            .map(|session| session.proposed)
    }

    pub fn snap_preview(&self) -> SnapPreview {
        self.session
            .as_ref()
            .map(|session| session.snap_preview)
            .unwrap_or_default()
    }

    pub fn begin_drag(
        &mut self,
        registry: &WindowRegistry,
        window_id: &WindowId,
        pointer: PointerPosition,
        viewport: Viewport,
    ) -> Result<(), SessionError> {
        self.begin(registry, window_id, SessionMode::Dragging, pointer, viewport)
    }

    pub fn begin_resize(
        &mut self,
        registry: &WindowRegistry,
        window_id: &WindowId,
        edge: ResizeEdge,
        pointer: PointerPosition,
        viewport: Viewport,
    ) -> Result<(), SessionError> {
        self.begin(
            registry,
            window_id,
            SessionMode::Resizing(edge),
            pointer,
            viewport,
        )
    }

    fn begin(
        &mut self,
        registry: &WindowRegistry,
        window_id: &WindowId,
        mode: SessionMode,
        pointer: PointerPosition,
        viewport: Viewport,
    ) -> Result<(), SessionError> {
        if let Some(active) = &self.session {
            return Err(SessionError::AlreadyActive(active.window_id.clone()));
        }
        let window = registry
            .get(window_id)
            .ok_or_else(|| SessionError::WindowNotFound(window_id.clone()))?;
        if window.minimized {
            return Err(SessionError::WindowMinimized(window_id.clone()));
        }
        if window.maximized {
            return Err(SessionError::WindowMaximized(window_id.clone()));
        }
        if layout_mode(viewport, registry.config()) == LayoutMode::Constrained {
            return Err(SessionError::ConstrainedViewport);
        }

        self.session = Some(ManipulationSession {
            window_id: window_id.clone(),
            mode,
            pointer_start: pointer,
            rect_start: window.rect,
            anchor: PointerPosition {
                x: pointer.x - window.rect.x,
                y: pointer.y - window.rect.y,
            },
            last_pointer: pointer,
            proposed: window.rect,
            snap_preview: SnapPreview::None,
            moved: false,
        });
        Ok(())
    }

    /// Recomputes the proposed geometry for a pointer sample.
    ///
    /// Returns `false` when idle, or when the target vanished and the session was dropped.
    pub fn update(
        &mut self,
        registry: &WindowRegistry,
        pointer: PointerPosition,
        viewport: Viewport,
    ) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !registry.contains(&session.window_id) {
            self.session = None;
            return false;
        }

        let config = registry.config();
        session.last_pointer = pointer;
        session.moved |= pointer != session.pointer_start;
        if !session.moved {
            return true;
        }
        match session.mode {
            SessionMode::Dragging => {
                let origin = drag_origin(
                    pointer,
                    session.anchor,
                    session.rect_start.size(),
                    viewport,
                    config,
                );
                session.proposed = WindowRect {
                    x: origin.x,
                    y: origin.y,
                    ..session.rect_start
                };
                session.snap_preview = snap_preview_for_pointer(pointer, viewport, config);
            }
            SessionMode::Resizing(edge) => {
                // Deltas run from the session start so clamping never accumulates drift.
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                session.proposed = resize_rect(session.rect_start, edge, dx, dy, config);
            }
        }
        true
    }

    /// Ends the session and commits its result through [`WindowRegistry::mutate`].
    pub fn end(
        &mut self,
        registry: &mut WindowRegistry,
        viewport: Viewport,
    ) -> Option<SessionOutcome> {
        let session = self.session.take()?;
        let window_id = session.window_id;
        if !registry.contains(&window_id) {
            return Some(SessionOutcome::Cancelled(window_id));
        }

        let outcome = match session.mode {
            SessionMode::Dragging if !session.moved => SessionOutcome::Moved(window_id),
            SessionMode::Resizing(_) if !session.moved => SessionOutcome::Resized(window_id),
            SessionMode::Resizing(_) => {
                registry.mutate(&window_id, WindowPatch::bounds(session.proposed));
                SessionOutcome::Resized(window_id)
            }
            SessionMode::Dragging => match session.snap_preview {
                SnapPreview::None => {
                    registry.mutate(
                        &window_id,
                        WindowPatch {
                            position: Some(session.proposed.position()),
                            ..WindowPatch::default()
                        },
                    );
                    SessionOutcome::Moved(window_id)
                }
                SnapPreview::Maximize => {
                    registry.mutate(&window_id, WindowPatch::maximized(true));
                    SessionOutcome::Snapped(window_id, SnapPreview::Maximize)
                }
                preview @ (SnapPreview::LeftHalf | SnapPreview::RightHalf) => {
                    if let Some(rect) = snap_target_rect(preview, viewport, registry.config()) {
                        registry.mutate(
                            &window_id,
                            WindowPatch {
                                maximized: Some(false),
                                ..WindowPatch::bounds(rect)
                            },
                        );
                    }
                    SessionOutcome::Snapped(window_id, preview)
                }
            },
        };
        Some(outcome)
    }

    /// Drops the session without writing anything back.
    pub fn cancel(&mut self) -> Option<WindowId> {
        self.session.take().map(|session| session.window_id)
    }

    /// Drops the session only if it targets `window_id`.
    pub fn cancel_for(&mut self, window_id: &WindowId) -> bool {
        let targeted = self
            .session
            .as_ref()
            .map(|session| session.window_id == *window_id)
            .unwrap_or(false);
        if targeted {
            self.session = None;
        }
        targeted
    }
}
