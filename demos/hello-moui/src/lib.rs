use moui_android::{App, Clock, Context, Handle, HandleRegistry, Native, Point, TouchAction};

/// How long a tap keeps the view animating, in seconds.
const PULSE_SECONDS: f32 = 0.5;

enum Object {
    RootView { frames: u64, taps: u32 },
    PulseEnd,
}

struct HelloApp {
    objects: HandleRegistry<Object>,
    root: Handle,
    clock: Clock,
    pulses: u32,
}

impl App for HelloApp {
    fn create(ctx: &Context) -> Self {
        let mut objects = HandleRegistry::new();
        let root = objects.insert(Object::RootView { frames: 0, taps: 0 });

        log::info!(
            "screen scale {}, smallest width {}dp, {:?}",
            ctx.device().screen_scale_factor(),
            ctx.device().smallest_screen_width(),
            ctx.device().category(),
        );

        Self {
            objects,
            root,
            clock: ctx.clock().clone(),
            pulses: 0,
        }
    }

    fn root_view(&self) -> Handle {
        self.root
    }

    fn is_animating(&self) -> bool {
        self.pulses > 0
    }
}

impl Native for HelloApp {
    fn execute_callback(&mut self, handle: Handle) {
        if let Some(Object::PulseEnd) = self.objects.remove(handle) {
            self.pulses -= 1;
        }
    }

    fn draw_frame(&mut self, handle: Handle) {
        if let Some(Object::RootView { frames, .. }) = self.objects.get_mut(handle) {
            *frames += 1;
        }
    }

    fn should_handle_event(&mut self, _handle: Handle, location: Point) -> bool {
        location.x >= 0.0 && location.y >= 0.0
    }

    fn handle_event(&mut self, handle: Handle, action: TouchAction, location: Point) {
        if action != TouchAction::Up {
            return;
        }

        if let Some(Object::RootView { taps, frames }) = self.objects.get_mut(handle) {
            *taps += 1;
            log::info!("tap {taps} at {location:?} after {frames} frames");
        }

        let pulse_end = self.objects.insert(Object::PulseEnd);
        self.pulses += 1;
        self.clock.schedule_callback(PULSE_SECONDS, pulse_end);
    }
}

#[cfg(target_os = "android")]
moui_android::entrypoint! {
    app = HelloApp
}
