//! Authoritative store of window records and the active-window reference.
//!
//! `launch`, `close`, `focus`, `minimize` and `mutate` are the only mutation entry points. Every
//! operation on an unknown id is a no-op that reports `false`.

use desktop_app_contract::AppDescriptor;
use serde_json::Value;

use crate::{
    config::WindowManagerConfig,
    model::{WindowId, WindowPatch, WindowRecord, WindowRect},
    window_manager::{cascade_position, clamp_size},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    Created,
    Reactivated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowRegistry {
    config: WindowManagerConfig,
    windows: Vec<WindowRecord>,
    active: Option<WindowId>,
    z_counter: u32,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new(WindowManagerConfig::default())
    }
}

impl WindowRegistry {
    pub fn new(config: WindowManagerConfig) -> Self {
        Self {
            config,
            windows: Vec::new(),
            active: None,
            z_counter: 0,
        }
    }

    pub fn config(&self) -> &WindowManagerConfig {
        &self.config
    }

    /// Records in launch order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn get(&self, id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.app_id == *id)
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.get(id).is_some()
    }

    /// Active window id, validated against the current records.
    ///
    /// A stale reference to a closed or minimized window reads as `None`.
    pub fn active_window_id(&self) -> Option<&WindowId> {
        self.active
            .as_ref()
            .filter(|id| self.get(id).map(WindowRecord::is_visible).unwrap_or(false))
    }

    pub fn active_window(&self) -> Option<&WindowRecord> {
        self.active_window_id().and_then(|id| self.get(id))
    }

    pub fn top_z_index(&self) -> u32 {
        self.windows
            .iter()
            .filter(|w| w.is_open)
            .map(|w| w.z_index)
            .max()
            .unwrap_or(0)
    }

    /// Open, non-minimized records in ascending stacking order.
    pub fn visible_windows(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<&WindowRecord> =
            self.windows.iter().filter(|w| w.is_visible()).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    /// Opens a window for `descriptor.app_id`, or reactivates the existing one.
    ///
    /// Reactivation unminimizes the record, replaces its launch props and focuses it; its
    /// geometry is left untouched.
    pub fn launch(&mut self, descriptor: &AppDescriptor, props: Value) -> LaunchOutcome {
        let id = descriptor.app_id.clone();
        if let Some(window) = self.get_mut(&id) {
            window.launch_props = props;
            unminimize(window);
            self.focus(&id);
            return LaunchOutcome::Reactivated;
        }

        let position = descriptor
            .default_position
            .map(Into::into)
            .unwrap_or_else(|| cascade_position(self.windows.len(), &self.config));
        let size = clamp_size(descriptor.default_size.into(), &self.config);
        let z_index = self.next_z_index();
        self.windows.push(WindowRecord {
            app_id: id.clone(),
            title: descriptor.title.clone(),
            icon_id: descriptor.icon.clone(),
            rect: WindowRect::from_parts(position, size),
            restore_rect: None,
            z_index,
            is_open: true,
            minimized: false,
            maximized: false,
            restore_maximized: false,
            launch_props: props,
        });
        self.active = Some(id);
        LaunchOutcome::Created
    }

    /// Removes a record. Closing the active window leaves no window active.
    pub fn close(&mut self, id: &WindowId) -> bool {
        let before = self.windows.len();
        self.windows.retain(|w| w.app_id != *id);
        if self.windows.len() == before {
            return false;
        }
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        true
    }

    /// Makes `id` active and raises it above every other open window.
    pub fn focus(&mut self, id: &WindowId) -> bool {
        let top = self.top_z_index();
        let needs_raise = match self.get(id) {
            Some(window) => window.z_index < top,
            None => return false,
        };
        if needs_raise {
            let z_index = self.next_z_index();
            if let Some(window) = self.get_mut(id) {
                window.z_index = z_index;
            }
        }
        self.active = Some(id.clone());
        true
    }

    pub fn minimize(&mut self, id: &WindowId) -> bool {
        let Some(window) = self.get_mut(id) else {
            return false;
        };
        window.minimized = true;
        park_maximize(window);
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        true
    }

    /// Shallow-merges `patch` into the record.
    ///
    /// Sizes are raised to the configured minimum. The bounds in place when `maximized` flips on
    /// are captured once as the restore target; while maximized, bound writes update that target
    /// instead of the hidden live bounds. Flipping `maximized` off restores the captured bounds
    /// unless the patch supplies its own.
    pub fn mutate(&mut self, id: &WindowId, patch: WindowPatch) -> bool {
        let config = self.config;
        let Some(window) = self.get_mut(id) else {
            return false;
        };

        if let Some(title) = patch.title {
            window.title = title;
        }
        if let Some(props) = patch.launch_props {
            window.launch_props = props;
        }

        let target = if window.maximized {
            window.restore_rect.get_or_insert(window.rect)
        } else {
            &mut window.rect
        };
        if let Some(position) = patch.position {
            target.x = position.x;
            target.y = position.y;
        }
        if let Some(size) = patch.size {
            let size = clamp_size(size, &config);
            target.w = size.width;
            target.h = size.height;
        }

        match patch.minimized {
            Some(true) if !window.minimized => {
                window.minimized = true;
                park_maximize(window);
            }
            Some(false) if window.minimized => unminimize(window),
            _ => {}
        }

        match patch.maximized {
            Some(true) if window.minimized => window.restore_maximized = true,
            Some(true) if !window.maximized => {
                window.restore_rect = Some(window.rect);
                window.maximized = true;
            }
            Some(false) if window.maximized => {
                // Any bounds in this patch already landed in the restore target.
                if let Some(rect) = window.restore_rect.take() {
                    window.rect = rect;
                }
                window.maximized = false;
            }
            Some(false) => window.restore_maximized = false,
            _ => {}
        }

        let minimized = window.minimized;
        if minimized && self.active.as_ref() == Some(id) {
            self.active = None;
        }
        true
    }

    /// Flips the maximize state through [`Self::mutate`].
    pub fn toggle_maximize(&mut self, id: &WindowId) -> bool {
        let Some(maximized) = self.get(id).map(|w| w.maximized) else {
            return false;
        };
        self.mutate(id, WindowPatch::maximized(!maximized))
    }

    fn get_mut(&mut self, id: &WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.app_id == *id)
    }

    fn next_z_index(&mut self) -> u32 {
        self.z_counter = self.z_counter.max(self.top_z_index()).saturating_add(1);
        self.z_counter
    }
}

/// Drops the maximize state of a window being minimized, remembering it for the next unminimize.
fn park_maximize(window: &mut WindowRecord) {
    if !window.maximized {
        return;
    }
    if let Some(rect) = window.restore_rect.take() {
        window.rect = rect;
    }
    window.maximized = false;
    window.restore_maximized = true;
}

fn unminimize(window: &mut WindowRecord) {
    window.minimized = false;
    if window.restore_maximized && !window.maximized {
        window.restore_rect = Some(window.rect);
        window.maximized = true;
    }
    window.restore_maximized = false;
}

#[cfg(test)]
mod tests {
    use desktop_app_contract::{AppPosition, AppSize, ApplicationId};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{WindowPosition, WindowSize};

    fn descriptor(id: &str, x: i32, y: i32, w: i32, h: i32) -> AppDescriptor {
        AppDescriptor {
            app_id: ApplicationId::trusted(id),
            title: id.to_uppercase(),
            icon: id.to_string(),
            default_position: Some(AppPosition { x, y }),
            default_size: AppSize {
                width: w,
                height: h,
            },
            show_on_desktop: true,
            show_in_dock: true,
        }
    }

    fn files() -> AppDescriptor {
        descriptor("files", 100, 80, 800, 600)
    }

    fn notes() -> AppDescriptor {
        descriptor("notes", 160, 120, 640, 480)
    }

    fn id(raw: &str) -> WindowId {
        ApplicationId::trusted(raw)
    }

    #[test]
    fn launch_creates_first_record_at_default_bounds() {
        let mut registry = WindowRegistry::default();
        let outcome = registry.launch(&files(), Value::Null);

        assert_eq!(outcome, LaunchOutcome::Created);
        assert_eq!(registry.windows().len(), 1);
        let record = registry.get(&id("files")).expect("files");
        assert_eq!(record.z_index, 1);
        assert_eq!(
            record.rect,
            WindowRect {
                x: 100,
                y: 80,
                w: 800,
                h: 600
            }
        );
        assert_eq!(registry.active_window_id(), Some(&id("files")));
    }

    #[test]
    fn focus_raises_only_the_target() {
        let mut registry = WindowRegistry::default();
        registry.launch(&files(), Value::Null);
        registry.launch(&notes(), Value::Null);
        assert_eq!(registry.get(&id("notes")).unwrap().z_index, 2);

        assert!(registry.focus(&id("files")));
        assert_eq!(registry.get(&id("files")).unwrap().z_index, 3);
        assert_eq!(registry.get(&id("notes")).unwrap().z_index, 2);
        assert_eq!(registry.active_window_id(), Some(&id("files")));
    }

    #[test]
    fn focusing_the_top_window_keeps_its_z_index() {
        let mut registry = WindowRegistry::default();
        registry.launch(&files(), Value::Null);
        registry.launch(&notes(), Value::Null);
        let before = registry.windows().to_vec();

        registry.focus(&id("notes"));
        assert_eq!(registry.windows(), before.as_slice());
    }

    #[test]
    fn relaunch_unminimizes_replaces_props_and_focuses() {
        let mut registry = WindowRegistry::default();
        registry.launch(&files(), json!({ "path": "/" }));
        registry.launch(&notes(), Value::Null);
        registry.minimize(&id("files"));

        let outcome = registry.launch(&files(), json!({ "path": "/docs" }));
        let record = registry.get(&id("files")).unwrap();
        assert_eq!(outcome, LaunchOutcome::Reactivated);
        assert!(!record.minimized);
        assert_eq!(record.launch_props, json!({ "path": "/docs" }));
        assert_eq!(record.z_index, 3);
        assert_eq!(registry.windows().len(), 2);
        assert_eq!(registry.active_window_id(), Some(&id("files")));
    }

    #[test]
    fn z_order_stays_total_across_mixed_operations() {
        let apps: Vec<AppDescriptor> = ["files", "notes", "tasks", "mail", "vault"]
            .iter()
            .enumerate()
            .map(|(idx, name)| descriptor(name, 40 * idx as i32, 60, 400, 300))
            .collect();
        let mut registry = WindowRegistry::default();

        for step in 0..200usize {
            let app = &apps[(step * 7 + step / 3) % apps.len()];
            match step % 5 {
                0 | 3 => {
                    registry.launch(app, Value::Null);
                }
                1 | 4 => {
                    if registry.focus(&app.app_id) {
                        assert_eq!(
                            registry.get(&app.app_id).unwrap().z_index,
                            registry.top_z_index()
                        );
                    }
                }
                _ => {
                    if step % 15 == 2 {
                        registry.close(&app.app_id);
                    } else {
                        registry.minimize(&app.app_id);
                    }
                }
            }

            let mut z: Vec<u32> = registry.windows().iter().map(|w| w.z_index).collect();
            let len = z.len();
            z.sort_unstable();
            z.dedup();
            assert_eq!(z.len(), len, "duplicate z-index after step {step}");
        }
    }

    #[test]
    fn z_indexes_are_not_reused_after_close() {
        let mut registry = WindowRegistry::default();
        registry.launch(&files(), Value::Null);
        registry.launch(&notes(), Value::Null);
        registry.close(&id("notes"));
        registry.launch(&notes(), Value::Null);
        assert_eq!(registry.get(&id("notes")).unwrap().z_index, 3);
    }

    #[test]
    fn closing_active_window_clears_active_without_promotion() {
        let mut registry = WindowRegistry::default();
        registry.launch(&files(), Value::Null);
        registry.launch(&notes(), Value::Null);

        assert!(registry.close(&id("notes")));
        assert_eq!(registry.active_window_id(), None);
        assert!(registry.get(&id("notes")).is_none());
    }

    #[test]
    fn minimizing_active_window_hides_it_and_keeps_bounds() {
        let mut registry = WindowRegistry::default();
        registry.launch(&files(), Value::Null);
        let bounds = registry.get(&id("files")).unwrap().rect;

        assert!(registry.minimize(&id("files")));
        let record = registry.get(&id("files")).unwrap();
        assert_eq!(registry.active_window_id(), None);
        assert_eq!(record.rect, bounds);
        assert!(registry.visible_windows().is_empty());
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut registry = WindowRegistry::default();
        registry.launch(&files(), Value::Null);
        let before = registry.clone();

        assert!(!registry.close(&id("ghost")));
        assert!(!registry.focus(&id("ghost")));
        assert!(!registry.minimize(&id("ghost")));
        assert!(!registry.mutate(&id("ghost"), WindowPatch::maximized(true)));
        assert!(!registry.toggle_maximize(&id("ghost")));
        assert_eq!(registry, before);
    }

    #[test]
    fn maximize_toggle_round_trip_restores_exact_bounds() {
        let mut registry = WindowRegistry::default();
        registry.launch(&files(), Value::Null);
        let original = registry.get(&id("files")).unwrap().rect;

        for _ in 0..2 {
            assert!(registry.toggle_maximize(&id("files")));
            assert!(registry.get(&id("files")).unwrap().maximized);
            assert!(registry.toggle_maximize(&id("files")));
            let record = registry.get(&id("files")).unwrap();
            assert!(!record.maximized);
            assert_eq!(record.rect, original);
            assert_eq!(record.restore_rect, None);
        }
    }

    #[test]
    fn bounds_written_while_maximized_become_the_restore_target() {
        let mut registry = WindowRegistry::default();
        registry.launch(&files(), Value::Null);
        registry.toggle_maximize(&id("files"));

        registry.mutate(
            &id("files"),
            WindowPatch {
                position: Some(WindowPosition { x: 10, y: 40 }),
                ..WindowPatch::default()
            },
        );
        registry.toggle_maximize(&id("files"));
        let record = registry.get(&id("files")).unwrap();
        assert_eq!(
            record.rect,
            WindowRect {
                x: 10,
                y: 40,
                w: 800,
                h: 600
            }
        );
    }

    #[test]
    fn unmaximize_with_explicit_bounds_uses_patch_bounds() {
        let mut registry = WindowRegistry::default();
        registry.launch(&files(), Value::Null);
        registry.toggle_maximize(&id("files"));

        let snapped = WindowRect {
            x: 0,
            y: 32,
            w: 640,
            h: 768,
        };
        registry.mutate(
            &id("files"),
            WindowPatch {
                maximized: Some(false),
                ..WindowPatch::bounds(snapped)
            },
        );
        let record = registry.get(&id("files")).unwrap();
        assert!(!record.maximized);
        assert_eq!(record.rect, snapped);
    }

    #[test]
    fn mutate_clamps_size_to_minimum() {
        let mut registry = WindowRegistry::default();
        registry.launch(&files(), Value::Null);
        registry.mutate(
            &id("files"),
            WindowPatch {
                size: Some(WindowSize {
                    width: 10,
                    height: 10,
                }),
                title: Some("Downloads".to_string()),
                ..WindowPatch::default()
            },
        );
        let record = registry.get(&id("files")).unwrap();
        assert_eq!(record.rect.w, 300);
        assert_eq!(record.rect.h, 200);
        assert_eq!(record.title, "Downloads");
    }

    #[test]
    fn minimizing_a_maximized_window_parks_maximize_until_relaunch() {
        let mut registry = WindowRegistry::default();
        registry.launch(&files(), Value::Null);
        let original = registry.get(&id("files")).unwrap().rect;
        registry.toggle_maximize(&id("files"));

        registry.minimize(&id("files"));
        let record = registry.get(&id("files")).unwrap();
        assert!(record.minimized);
        assert!(!record.maximized);
        assert!(record.restore_maximized);

        registry.launch(&files(), Value::Null);
        let record = registry.get(&id("files")).unwrap();
        assert!(record.maximized);
        assert!(!record.minimized);

        registry.toggle_maximize(&id("files"));
        assert_eq!(registry.get(&id("files")).unwrap().rect, original);
    }

    #[test]
    fn launch_without_default_position_cascades() {
        let mut registry = WindowRegistry::default();
        let mut tasks = descriptor("tasks", 0, 0, 500, 400);
        tasks.default_position = None;
        registry.launch(&files(), Value::Null);
        registry.launch(&tasks, Value::Null);
        let record = registry.get(&id("tasks")).unwrap();
        assert_eq!(record.rect.position(), WindowPosition { x: 72, y: 80 });
    }

    #[test]
    fn stale_active_reference_reads_as_none() {
        let mut registry = WindowRegistry::default();
        registry.launch(&files(), Value::Null);
        registry.mutate(
            &id("files"),
            WindowPatch {
                minimized: Some(true),
                ..WindowPatch::default()
            },
        );
        assert_eq!(registry.active_window_id(), None);
    }
}
