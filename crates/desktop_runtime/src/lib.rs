pub mod apps;
pub mod components;
pub mod compositor;
pub mod config;
mod effect_executor;
pub mod frame;
pub mod host;
pub mod model;
pub mod reducer;
pub mod registry;
mod runtime_context;
pub mod session;
pub mod window_manager;

pub use components::{use_desktop_runtime, DesktopProvider, DesktopRuntimeContext, DesktopShell};
pub use config::{load_shell_manifest, ManifestError, ShellManifest, WindowManagerConfig};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use registry::{LaunchOutcome, WindowRegistry};
pub use session::{InteractionState, SessionError, SessionOutcome};
