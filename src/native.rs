use crate::{touch::Point, Handle, TouchAction};

/// Entry points into the native side of the framework.
///
/// Every call carries the handle the shim was created with. What the handle
/// refers to, and whether it is still alive, is entirely up to the
/// implementation.
pub trait Native {
    /// A callback armed through [`Clock`](crate::Clock) is due.
    fn execute_callback(&mut self, handle: Handle);

    /// The surface of the view identified by `handle` needs a new frame.
    /// The view's GL context is current when this is called.
    fn draw_frame(&mut self, handle: Handle);

    /// Asked when a gesture starts at `location`, in surface coordinates.
    /// Returning `false` leaves the whole gesture to the next responder.
    fn should_handle_event(&mut self, handle: Handle, location: Point) -> bool;

    /// Delivers one event of a gesture previously claimed through
    /// [`Native::should_handle_event`].
    fn handle_event(&mut self, handle: Handle, action: TouchAction, location: Point);

    /// The surface of the view went away. Any GL resources tied to it are
    /// already invalid.
    fn surface_destroyed(&mut self, _handle: Handle) {
        // By default, do nothing.
    }
}
