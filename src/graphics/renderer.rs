use crate::{Handle, Native};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// The GL state a view manages on behalf of the native side.
pub trait Viewport {
    fn set_viewport(&self, x: i32, y: i32, width: i32, height: i32);

    /// Clear the color buffer to fully transparent.
    fn clear_transparent(&self);
}

impl Viewport for glow::Context {
    fn set_viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        use glow::HasContext;

        unsafe { self.viewport(x, y, width, height) }
    }

    fn clear_transparent(&self) {
        use glow::HasContext;

        unsafe {
            self.clear_color(0.0, 0.0, 0.0, 0.0);
            self.clear(glow::COLOR_BUFFER_BIT);
        }
    }
}

/// Lifecycle of the drawing surface, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Detached,
    Created,
    Sized { width: i32, height: i32 },
}

/// Asks for a frame to be drawn. May be used from any thread.
#[derive(Clone)]
pub struct RenderRequest {
    dirty: Arc<AtomicBool>,
    waker: Arc<dyn Fn() + Send + Sync>,
}

impl RenderRequest {
    pub fn new(waker: Arc<dyn Fn() + Send + Sync>) -> Self {
        Self {
            dirty: Arc::new(AtomicBool::new(false)),
            waker,
        }
    }

    pub fn request(&self) {
        if !self.dirty.swap(true, Ordering::AcqRel) {
            (self.waker)();
        }
    }

    fn is_pending(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    fn take(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }
}

/// Drives frames of one OpenGL view. Frames are only drawn on request, never
/// on a fixed clock, unless the view is explicitly set to update
/// continuously.
pub struct OpenGLRenderer {
    handle: Handle,
    state: SurfaceState,
    render_request: RenderRequest,
    animating: bool,
    animation_paused: bool,
}

impl OpenGLRenderer {
    pub fn new(handle: Handle, render_request: RenderRequest) -> Self {
        Self {
            handle,
            state: SurfaceState::Detached,
            render_request,
            animating: false,
            animation_paused: false,
        }
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn render_request(&self) -> RenderRequest {
        self.render_request.clone()
    }

    pub fn request_render(&self) {
        self.render_request.request();
    }

    /// The surface exists. GL setup is left to the native side, which does
    /// it lazily on its first frame.
    pub fn on_surface_created(&mut self) {
        self.state = SurfaceState::Created;

        if self.animating && self.animation_paused {
            self.animation_paused = false;
            self.request_render();
        }
    }

    /// The surface has a new size; the viewport is reset to cover all of it.
    pub fn on_surface_changed(
        &mut self,
        viewport: &(impl Viewport + ?Sized),
        width: i32,
        height: i32,
    ) {
        viewport.set_viewport(0, 0, width, height);
        self.state = SurfaceState::Sized { width, height };
        self.request_render();
    }

    pub fn on_surface_destroyed<N: Native + ?Sized>(&mut self, native: &mut N) {
        if self.state == SurfaceState::Detached {
            return;
        }

        if self.animating {
            self.animation_paused = true;
        }

        self.state = SurfaceState::Detached;
        native.surface_destroyed(self.handle);
    }

    pub fn needs_draw(&self) -> bool {
        matches!(self.state, SurfaceState::Sized { .. }) && self.render_request.is_pending()
    }

    /// Draw a frame if one was requested. Returns whether the native side
    /// was asked to draw.
    pub fn draw_frame<N: Native + ?Sized>(&mut self, native: &mut N) -> bool {
        if !matches!(self.state, SurfaceState::Sized { .. }) || !self.render_request.take() {
            return false;
        }

        native.draw_frame(self.handle);

        if self.animating && !self.animation_paused {
            self.request_render();
        }

        true
    }

    /// Keep drawing frames back to back until [`stop_updating`] is called.
    ///
    /// [`stop_updating`]: OpenGLRenderer::stop_updating
    pub fn start_updating(&mut self) {
        if !self.animating {
            self.animating = true;
            self.animation_paused = false;
            self.request_render();
        }
    }

    pub fn stop_updating(&mut self) {
        self.animating = false;
        self.animation_paused = false;
    }

    pub fn is_updating(&self) -> bool {
        self.animating && !self.animation_paused
    }
}
