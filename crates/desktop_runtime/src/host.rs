//! Host-side runtime helpers for executing reducer effects and querying browser environment state.
//!
//! Everything that touches `web_sys` directly lives here so the reducer, registry and session
//! stay target-independent. Non-wasm builds get inert fallbacks.

use desktop_app_contract::window_content_dom_id;
use leptos::logging;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

use crate::{
    model::{Viewport, WindowId},
    reducer::RuntimeEffect,
    session::SessionOutcome,
};

#[derive(Debug, Clone, Copy, Default)]
/// Browser host boundary for the desktop runtime.
pub struct DesktopHostContext;

impl DesktopHostContext {
    /// Executes a single [`RuntimeEffect`] emitted by the reducer.
    pub fn run_runtime_effect(&self, effect: RuntimeEffect) {
        match effect {
            RuntimeEffect::FocusWindowContent(window_id) => self.focus_window_content(window_id),
            RuntimeEffect::SessionEnded(outcome) => log_session_outcome(&outcome),
        }
    }

    /// Current browser viewport in CSS pixels.
    pub fn viewport(&self) -> Viewport {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let fallback = Viewport::default();
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(fallback.width);
                let height = window
                    .inner_height()
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value as i32)
                    .unwrap_or(fallback.height);
                return Viewport { width, height };
            }
        }

        Viewport::default()
    }

    /// Moves keyboard focus into the window's content host once the current render settles.
    pub fn focus_window_content(&self, window_id: WindowId) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dom_id = window_content_dom_id(&window_id);
            let callback = Closure::once_into_js(move || {
                let Some(element) = web_sys::window()
                    .and_then(|window| window.document())
                    .and_then(|document| document.get_element_by_id(&dom_id))
                else {
                    return;
                };
                if let Ok(element) = element.dyn_into::<web_sys::HtmlElement>() {
                    let _ = element.focus();
                }
            });
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0);
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = window_content_dom_id(&window_id);
    }

    /// Runs `callback` on the next animation frame.
    pub fn request_frame(&self, callback: impl FnOnce() + 'static) {
        #[cfg(target_arch = "wasm32")]
        leptos::request_animation_frame(callback);
        #[cfg(not(target_arch = "wasm32"))]
        callback();
    }
}

fn log_session_outcome(outcome: &SessionOutcome) {
    match outcome {
        SessionOutcome::Snapped(window_id, preview) => {
            logging::debug_warn!("window `{window_id}` snapped: {preview:?}");
        }
        SessionOutcome::Cancelled(window_id) => {
            logging::debug_warn!("window `{window_id}` closed before its session was released");
        }
        SessionOutcome::Moved(_) | SessionOutcome::Resized(_) => {}
    }
}
