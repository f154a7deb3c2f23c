use super::{OpenGLRenderer, RenderRequest, SurfaceConfig, Viewport};
use crate::{
    touch::{EventStatus, Point, TouchEvent, TouchTracker},
    Handle, Native,
};

/// A view backed by an OpenGL ES surface.
///
/// Draw requests and touch events for the surface are forwarded to the
/// native object identified by the view's handle.
pub struct OpenGLView {
    handle: Handle,
    config: SurfaceConfig,
    renderer: OpenGLRenderer,
    touch: TouchTracker,
    background_opaque: bool,
}

impl OpenGLView {
    pub fn new(handle: Handle, config: SurfaceConfig, render_request: RenderRequest) -> Self {
        Self {
            handle,
            config,
            renderer: OpenGLRenderer::new(handle, render_request),
            touch: TouchTracker::new(handle),
            background_opaque: true,
        }
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn renderer(&self) -> &OpenGLRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut OpenGLRenderer {
        &mut self.renderer
    }

    /// Whether the native side paints every pixel of the surface. The
    /// surface itself is always translucent; this is a hint for the drawing
    /// code, which can skip clearing to transparent when set.
    pub fn background_is_opaque(&self) -> bool {
        self.background_opaque
    }

    pub fn set_background_opaque(&mut self, opaque: bool) {
        self.background_opaque = opaque;
    }

    /// Draw a frame if one was requested, clearing the surface first unless
    /// the background is opaque. Returns whether a frame was drawn.
    pub fn draw_frame<N: Native + ?Sized>(
        &mut self,
        viewport: &(impl Viewport + ?Sized),
        native: &mut N,
    ) -> bool {
        if !self.renderer.needs_draw() {
            return false;
        }

        if !self.background_opaque {
            viewport.clear_transparent();
        }

        self.renderer.draw_frame(native)
    }

    /// Place the surface at `origin` in window pixels, with `density` pixels
    /// per point. Touch locations are reported relative to this origin.
    pub fn set_geometry(&mut self, origin: Point, density: f32) {
        self.touch.set_origin(origin);
        self.touch.set_scale(density);
    }

    pub fn on_touch_event<N: Native + ?Sized>(
        &mut self,
        native: &mut N,
        event: TouchEvent,
    ) -> EventStatus {
        self.touch.process(native, event)
    }

    pub fn touch_state(&self) -> crate::touch::TouchState {
        self.touch.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{touch::TouchState, TouchAction};
    use std::{cell::Cell, sync::Arc};

    #[derive(Default)]
    struct Claims {
        events: Vec<(TouchAction, Point)>,
    }

    impl Native for Claims {
        fn execute_callback(&mut self, _handle: Handle) {}

        fn draw_frame(&mut self, _handle: Handle) {}

        fn should_handle_event(&mut self, _handle: Handle, location: Point) -> bool {
            location.y < 100.0
        }

        fn handle_event(&mut self, _handle: Handle, action: TouchAction, location: Point) {
            self.events.push((action, location));
        }
    }

    #[derive(Default)]
    struct Clears {
        clears: Cell<usize>,
    }

    impl Viewport for Clears {
        fn set_viewport(&self, _x: i32, _y: i32, _width: i32, _height: i32) {}

        fn clear_transparent(&self) {
            self.clears.set(self.clears.get() + 1);
        }
    }

    fn sized_view() -> OpenGLView {
        let mut view = OpenGLView::new(
            Handle::from_raw(1),
            SurfaceConfig::default(),
            RenderRequest::new(Arc::new(|| {})),
        );
        let renderer = view.renderer_mut();
        renderer.on_surface_created();
        renderer.on_surface_changed(&Clears::default(), 100, 100);
        view
    }

    #[test]
    fn opaque_background_is_not_cleared() {
        let mut view = sized_view();
        let viewport = Clears::default();
        let mut native = Claims::default();

        assert!(view.background_is_opaque());
        assert!(view.config().translucent);
        assert!(view.draw_frame(&viewport, &mut native));
        assert_eq!(viewport.clears.get(), 0);
    }

    #[test]
    fn translucent_background_is_cleared_before_each_frame() {
        let mut view = sized_view();
        let viewport = Clears::default();
        let mut native = Claims::default();
        view.set_background_opaque(false);
        assert!(!view.background_is_opaque());

        assert!(view.draw_frame(&viewport, &mut native));
        assert_eq!(viewport.clears.get(), 1);

        // Nothing requested, nothing cleared.
        assert!(!view.draw_frame(&viewport, &mut native));
        assert_eq!(viewport.clears.get(), 1);
    }

    #[test]
    fn touches_use_view_geometry() {
        let mut view = OpenGLView::new(
            Handle::from_raw(1),
            SurfaceConfig::default(),
            RenderRequest::new(Arc::new(|| {})),
        );
        view.set_geometry(Point::new(0.0, 48.0), 2.0);

        let mut native = Claims::default();

        // 48 + 2 * 100 lands outside the claimed region.
        let down = TouchEvent::new(TouchAction::Down, 10.0, 248.0);
        let status = view.on_touch_event(&mut native, down);
        assert_eq!(status, EventStatus::NotConsumed);

        let down = TouchEvent::new(TouchAction::Down, 10.0, 148.0);
        let status = view.on_touch_event(&mut native, down);
        assert_eq!(status, EventStatus::Consumed);
        assert_eq!(view.touch_state(), TouchState::Tracking);
        assert_eq!(native.events, vec![(TouchAction::Down, Point::new(5.0, 50.0))]);
    }
}
