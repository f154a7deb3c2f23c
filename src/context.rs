use crate::{graphics::RenderRequest, Clock, Config, Device, Paths};

/// Platform services available to the native side.
///
/// Everything in here can be cloned and kept around for as long as the app
/// lives.
#[derive(Clone)]
pub struct Context {
    clock: Clock,
    device: Device,
    paths: Paths,
    render_request: RenderRequest,
    config: Config,
    #[cfg(target_os = "android")]
    views: crate::bindings::JniViewTree,
}

impl Context {
    #[cfg(target_os = "android")]
    pub(crate) fn new(
        clock: Clock,
        device: Device,
        paths: Paths,
        render_request: RenderRequest,
        config: Config,
        views: crate::bindings::JniViewTree,
    ) -> Self {
        Self {
            clock,
            device,
            paths,
            render_request,
            config,
            views,
        }
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Ask for the root view to be redrawn. Safe to call from any thread.
    pub fn request_render(&self) {
        self.render_request.request();
    }

    pub fn render_request(&self) -> RenderRequest {
        self.render_request.clone()
    }

    /// Shims for placing platform views, in points.
    #[cfg(target_os = "android")]
    pub fn native_view(&self) -> crate::NativeView<crate::bindings::JniViewTree> {
        crate::NativeView::new(self.views.clone(), self.device.screen_scale_factor())
    }

    #[cfg(target_os = "android")]
    pub fn window(&self) -> crate::Window<crate::bindings::JniViewTree> {
        crate::Window::new(self.views.clone())
    }
}
