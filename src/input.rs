use crate::{
    touch::{EventStatus, TouchAction, TouchEvent},
    Native, OpenGLView,
};
use android_activity::{
    input::{InputEvent, MotionEvent},
    InputStatus,
};

/// Route an Android input event to the root view.
///
/// Only touches are understood; anything the view does not consume is
/// reported as unhandled so that Android can apply its default behavior.
pub(crate) fn process<N: Native + ?Sized>(
    android_event: &InputEvent,
    view: &mut OpenGLView,
    native: &mut N,
) -> InputStatus {
    match android_event {
        InputEvent::MotionEvent(motion_event) => {
            let Some(event) = touch_event(motion_event) else {
                return InputStatus::Unhandled;
            };

            match view.on_touch_event(native, event) {
                EventStatus::Consumed => InputStatus::Handled,
                EventStatus::NotConsumed => InputStatus::Unhandled,
            }
        }

        InputEvent::KeyEvent(_) => InputStatus::Unhandled,

        unknown => {
            log::trace!("unhandled input event: {unknown:?}");
            InputStatus::Unhandled
        }
    }
}

/// Gestures are tracked by their first pointer, like `MotionEvent.getX()`
/// does.
fn touch_event(motion_event: &MotionEvent) -> Option<TouchEvent> {
    if motion_event.pointer_count() == 0 {
        return None;
    }

    let action = TouchAction::from_code(u32::from(motion_event.action()) as i32);
    let pointer = motion_event.pointer_at_index(0);

    Some(TouchEvent::new(action, pointer.x(), pointer.y()))
}
