//! Android platform layer of the moui UI framework.
//!
//! The app implements [`App`], which makes it the native side of every shim
//! in here: it is asked to draw frames, to claim and handle touch gestures,
//! and it receives the callbacks it scheduled through the [`Clock`].

mod app;
mod clock;
mod config;
mod context;
mod device;
mod graphics;
mod handle;
mod java_error;
mod native;
mod path;
mod touch;
mod ui_queue;
mod view;
mod window;

#[cfg(target_os = "android")]
mod bindings;
#[cfg(target_os = "android")]
pub mod entrypoint;
#[cfg(target_os = "android")]
mod input;
#[cfg(target_os = "android")]
mod logging;
mod runner;

pub use app::App;
pub use clock::{Clock, TimerQueue};
pub use config::{Config, DEFAULT_TABLET_SMALLEST_WIDTH_DP};
pub use context::Context;
pub use device::{BatteryState, Category, Device, DeviceInfo, DisplayMetrics};
pub use graphics::{
    OpenGLRenderer, OpenGLView, RenderRequest, SurfaceConfig, SurfaceState, Viewport,
};
pub use handle::{Handle, HandleRegistry};
pub use native::Native;
pub use path::{Directory, DirectorySource, Paths, RESOURCE_URL};
pub use touch::{EventStatus, Point, TouchAction, TouchEvent, TouchState, TouchTracker};
pub use ui_queue::UiThreadError;
pub use view::{AbsoluteLayout, NativeView, Snapshot, ViewTree, Visibility};
pub use window::Window;

#[cfg(target_os = "android")]
pub use bindings::JniViewTree;
