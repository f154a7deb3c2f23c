use crate::{Config, Context, Handle, Native};

/// Root of a moui application running in a `NativeActivity`.
///
/// The app is the native side of every shim: it receives the callbacks of
/// [`Native`] and owns whatever the handles refer to.
pub trait App: Native + Sized {
    /// Settings applied before the app is created.
    fn config() -> Config {
        Config::default()
    }

    /// Called when a new activity instance for this app is opened.
    ///
    /// This may be called multiple times during the lifetime of the process,
    /// as the activity is opened by the user multiple times. Be careful with
    /// global state, which may or may not be already initialized.
    fn create(ctx: &Context) -> Self;

    /// The handle of the view drawn into the activity's window.
    fn root_view(&self) -> Handle;

    /// While this returns `true`, frames are drawn back to back instead of
    /// only on request.
    fn is_animating(&self) -> bool {
        false
    }

    /// Whether the root view paints all of its pixels every frame. When
    /// `false`, the surface is cleared to transparent before each frame.
    fn is_background_opaque(&self) -> bool {
        true
    }

    /// Called by Android when the system is running low on memory.
    fn on_low_memory(&mut self) {
        // By default, do nothing.
    }
}
