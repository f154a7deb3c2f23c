//! EGL surface and context management for the window of the activity.

use super::{SurfaceConfig, Viewport};
use glutin::{
    api::egl::{
        config::Config,
        context::{NotCurrentContext, PossiblyCurrentContext},
        display::Display,
        surface::Surface,
    },
    context::{ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentGlContext},
    display::GlDisplay,
    surface::{GlSurface, SurfaceAttributesBuilder, WindowSurface},
};
use ndk::native_window::NativeWindow;
use raw_window_handle::{
    AndroidDisplayHandle, AndroidNdkWindowHandle, RawDisplayHandle, RawWindowHandle,
};
use std::{
    error::Error,
    ffi::CString,
    num::NonZeroU32,
    sync::Arc,
};

/// Connection to the default EGL display, plus the config every surface is
/// created with.
pub(crate) struct GraphicsContext {
    display: Display,
    egl_config: Config,
    surface_config: SurfaceConfig,
}

impl GraphicsContext {
    /// Only one instance should be created per process.
    pub(crate) fn new(surface_config: SurfaceConfig) -> Result<Self, Box<dyn Error>> {
        let display = get_default_display()?;

        let egl_config = unsafe { display.find_configs(surface_config.config_template()) }?
            .next()
            .ok_or("no EGL config matches the surface config")?;

        Ok(GraphicsContext {
            display,
            egl_config,
            surface_config,
        })
    }

    /// Create a drawing surface covering `window`, with a context that is
    /// current on the calling thread.
    pub(crate) fn create_surface(
        &self,
        window: &NativeWindow,
    ) -> Result<GraphicsSurface, Box<dyn Error>> {
        let raw_window_handle = as_raw_window_handle(window);
        let (width, height) = window_size(window)?;

        let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            width,
            height,
        );

        let surface = unsafe {
            self.display
                .create_window_surface(&self.egl_config, &surface_attributes)
        }?;

        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(self.surface_config.context_api())
            .build(Some(raw_window_handle));

        let egl_context = unsafe {
            self.display
                .create_context(&self.egl_config, &context_attributes)
        }?;
        let egl_context = egl_context.make_current(&surface)?;

        let glow_context = Arc::new(unsafe {
            glow::Context::from_loader_function(|s| match CString::new(s) {
                Ok(s) => self.display.get_proc_address(&s).cast(),
                Err(_) => std::ptr::null(),
            })
        });

        Ok(GraphicsSurface {
            surface,
            gl_context_current: Some(egl_context),
            gl_context_not_current: None,
            glow_context,
        })
    }
}

pub(crate) struct GraphicsSurface {
    surface: Surface<WindowSurface>,
    gl_context_current: Option<PossiblyCurrentContext>,
    gl_context_not_current: Option<NotCurrentContext>,
    glow_context: Arc<glow::Context>,
}

impl GraphicsSurface {
    pub(crate) fn viewport(&self) -> &dyn Viewport {
        self.glow_context.as_ref()
    }

    pub(crate) fn make_current(&mut self) {
        if let Some(context) = self.gl_context_not_current.take() {
            match context.make_current(&self.surface) {
                Ok(context) => self.gl_context_current = Some(context),
                Err(e) => log::error!("failed to make GL context current: {e}"),
            }
        }
    }

    pub(crate) fn make_not_current(&mut self) {
        if let Some(context) = self.gl_context_current.take() {
            match context.make_not_current() {
                Ok(context) => self.gl_context_not_current = Some(context),
                Err(e) => log::error!("failed to release GL context: {e}"),
            }
        }
    }

    pub(crate) fn resize(&self, window: &NativeWindow) {
        if let (Some(context), Ok((width, height))) =
            (self.gl_context_current.as_ref(), window_size(window))
        {
            self.surface.resize(context, width, height);
        }
    }

    pub(crate) fn swap_buffers(&mut self) {
        if let Some(context) = self.gl_context_current.as_ref() {
            if let Err(e) = self.surface.swap_buffers(context) {
                log::warn!("failed to swap buffers: {e}");
            }
        }
    }
}

impl Drop for GraphicsSurface {
    fn drop(&mut self) {
        self.make_not_current();
    }
}

// There is only one way to get the default display on Android, and it is stateless.
fn get_default_display() -> Result<Display, glutin::error::Error> {
    let raw_display_handle = RawDisplayHandle::Android(AndroidDisplayHandle::new());

    unsafe { Display::new(raw_display_handle) }
}

fn as_raw_window_handle(native_window: &NativeWindow) -> RawWindowHandle {
    RawWindowHandle::from(AndroidNdkWindowHandle::new(native_window.ptr().cast()))
}

fn window_size(window: &NativeWindow) -> Result<(NonZeroU32, NonZeroU32), Box<dyn Error>> {
    let width = NonZeroU32::new(window.width().try_into()?).ok_or("window has zero width")?;
    let height = NonZeroU32::new(window.height().try_into()?).ok_or("window has zero height")?;

    Ok((width, height))
}
