#![cfg(target_os = "android")]

use crate::{
    bindings::{self, JavaContext, JniDeviceInfo, JniDirectories, JniViewTree},
    graphics::{
        egl::{GraphicsContext, GraphicsSurface},
        RenderRequest,
    },
    input,
    touch::Point,
    App, Clock, Config, Context, Device, OpenGLView, Paths,
};
use android_activity::{AndroidApp, MainEvent, PollEvent};
use std::{
    error::Error,
    sync::Arc,
    time::{Duration, Instant},
};

/// Drives an [`App`] from the `NativeActivity` event loop.
///
/// The window of the activity is the surface of the app's root view. Clock
/// callbacks, surface lifecycle, draw requests and touches are all dispatched
/// from here, on the thread running `android_main`.
pub(crate) struct Runner<T: App> {
    app: T,
    android_app: AndroidApp,
    graphics_context: Option<GraphicsContext>,
    surface: Option<GraphicsSurface>,
    view: OpenGLView,
    clock: Clock,
    device: Device,
    close_requested: bool,
}

impl<T: App> Runner<T> {
    pub(crate) fn new(android_app: AndroidApp, config: Config) -> Result<Self, Box<dyn Error>> {
        let java = JavaContext::for_android_app(&android_app)?;

        // Both timers and draw requests wake up the event loop, which then
        // decides what is due.
        let waker = android_app.create_waker();
        let clock = Clock::new({
            let waker = waker.clone();
            move || waker.wake()
        });
        let render_request = RenderRequest::new(Arc::new(move || waker.wake()));

        let device = Device::new(JniDeviceInfo::new(java.clone()))
            .with_tablet_smallest_width_dp(config.tablet_smallest_width_dp());

        // Without a graphics context the app still runs; it just never gets
        // a surface to draw on.
        let graphics_context = GraphicsContext::new(*config.surface())
            .inspect_err(|e| log::error!("failed to initialize EGL: {e}"))
            .ok();

        // Views are owned by the Java main thread, not this one.
        let ui_thread = bindings::attach_ui_thread(&android_app.java_main_looper())?;

        let ctx = Context::new(
            clock.clone(),
            device.clone(),
            Paths::new(JniDirectories::new(java.clone())),
            render_request.clone(),
            config.clone(),
            JniViewTree::new(java, ui_thread),
        );
        let app = T::create(&ctx);
        let view = OpenGLView::new(app.root_view(), *config.surface(), render_request);

        log::info!("created app with root view {}", view.handle());

        Ok(Self {
            app,
            android_app,
            graphics_context,
            surface: None,
            view,
            clock,
            device,
            close_requested: false,
        })
    }

    pub(crate) fn run_until_closed(&mut self) {
        while !self.close_requested {
            self.run_once();
        }
    }

    pub(crate) fn run_once(&mut self) {
        let timeout = if self.surface.is_some() && self.view.renderer().needs_draw() {
            Some(Duration::ZERO)
        } else {
            self.clock.next_timeout(Instant::now())
        };

        self.android_app.clone().poll_events(timeout, |event| {
            self.process_event(event);
        });

        self.clock
            .run_due(Instant::now(), |handle| self.app.execute_callback(handle));

        self.sync_updates();
        self.draw_if_needed();
    }

    fn process_event(&mut self, event: PollEvent) {
        match event {
            PollEvent::Wake | PollEvent::Timeout => {}

            PollEvent::Main(main_event) => match main_event {
                MainEvent::Destroy => {
                    self.detach_window();
                    self.close_requested = true;
                }

                MainEvent::InitWindow { .. } => {
                    log::info!("init window");
                    self.attach_window();
                }

                MainEvent::TerminateWindow { .. } => {
                    log::info!("terminate window");
                    self.detach_window();
                }

                MainEvent::WindowResized { .. } => self.resize_window(),

                MainEvent::ConfigChanged { .. } => self.update_geometry(),

                MainEvent::RedrawNeeded { .. } => self.view.renderer().request_render(),

                MainEvent::InputAvailable => self.process_pending_input(),

                MainEvent::LowMemory => self.app.on_low_memory(),

                main_event => log::trace!("unhandled main event: {main_event:?}"),
            },

            _ => {}
        }
    }

    fn attach_window(&mut self) {
        let Some(native_window) = self.android_app.native_window() else {
            return;
        };

        let Some(graphics_context) = self.graphics_context.as_ref() else {
            return;
        };

        match graphics_context.create_surface(&native_window) {
            Ok(surface) => {
                let renderer = self.view.renderer_mut();
                renderer.on_surface_created();
                renderer.on_surface_changed(
                    surface.viewport(),
                    native_window.width(),
                    native_window.height(),
                );

                self.surface = Some(surface);
                self.update_geometry();
            }
            Err(e) => log::error!("failed to create a surface for the window: {e}"),
        }
    }

    fn resize_window(&mut self) {
        let (Some(native_window), Some(surface)) =
            (self.android_app.native_window(), self.surface.as_ref())
        else {
            return;
        };

        surface.resize(&native_window);
        self.view.renderer_mut().on_surface_changed(
            surface.viewport(),
            native_window.width(),
            native_window.height(),
        );
    }

    fn detach_window(&mut self) {
        if let Some(mut surface) = self.surface.take() {
            self.view.renderer_mut().on_surface_destroyed(&mut self.app);
            surface.make_not_current();
        }
    }

    /// The surface covers the whole window, so only the density can change.
    fn update_geometry(&mut self) {
        self.view
            .set_geometry(Point::ZERO, self.device.screen_scale_factor());
    }

    fn process_pending_input(&mut self) {
        match self.android_app.input_events_iter() {
            Ok(mut iter) => loop {
                let read_input =
                    iter.next(|event| input::process(event, &mut self.view, &mut self.app));

                if !read_input {
                    break;
                }
            },
            Err(err) => {
                log::error!("failed to get input events iterator: {err:?}");
            }
        }
    }

    fn sync_updates(&mut self) {
        self.view
            .set_background_opaque(self.app.is_background_opaque());

        let renderer = self.view.renderer_mut();

        if self.app.is_animating() {
            renderer.start_updating();
        } else {
            renderer.stop_updating();
        }
    }

    fn draw_if_needed(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        if !self.view.renderer().needs_draw() {
            return;
        }

        surface.make_current();

        if self.view.draw_frame(surface.viewport(), &mut self.app) {
            surface.swap_buffers();
        }
    }
}
