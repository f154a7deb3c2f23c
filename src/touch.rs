//! Forwarding of touch gestures to the native side.
//!
//! A gesture is only forwarded if the native side claims it on its initial
//! `Down` event. Once claimed, every event up to and including the terminal
//! `Up` or `Cancel` goes to the native side; otherwise the whole gesture is
//! left to the next responder.

use crate::{Handle, Native};
use std::ops::Sub;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// The action of a touch event, following `MotionEvent` action codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Up,
    Move,
    Cancel,
    Other(i32),
}

impl TouchAction {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Down,
            1 => Self::Up,
            2 => Self::Move,
            3 => Self::Cancel,
            code => Self::Other(code),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Down => 0,
            Self::Up => 1,
            Self::Move => 2,
            Self::Cancel => 3,
            Self::Other(code) => code,
        }
    }

    fn ends_gesture(self) -> bool {
        matches!(self, Self::Up | Self::Cancel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Consumed,
    NotConsumed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchState {
    Idle,
    Tracking,
}

/// A touch event in window coordinates, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub position: Point,
}

impl TouchEvent {
    pub fn new(action: TouchAction, x: f32, y: f32) -> Self {
        Self {
            action,
            position: Point::new(x, y),
        }
    }
}

/// Per-view gesture state.
pub struct TouchTracker {
    handle: Handle,
    state: TouchState,
    origin: Point,
    scale: f32,
}

impl TouchTracker {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            state: TouchState::Idle,
            origin: Point::ZERO,
            scale: 1.0,
        }
    }

    pub fn state(&self) -> TouchState {
        self.state
    }

    /// Where the surface's top-left corner is in window coordinates.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Pixels per unit of the coordinates handed to the native side.
    pub fn set_scale(&mut self, scale: f32) {
        if scale > 0.0 {
            self.scale = scale;
        }
    }

    pub fn to_surface(&self, position: Point) -> Point {
        let local = position - self.origin;
        Point::new(local.x / self.scale, local.y / self.scale)
    }

    /// Feed one event through the gesture state machine.
    pub fn process<N: Native + ?Sized>(
        &mut self,
        native: &mut N,
        event: TouchEvent,
    ) -> EventStatus {
        if self.state == TouchState::Idle {
            if event.action != TouchAction::Down {
                return EventStatus::NotConsumed;
            }

            if !native.should_handle_event(self.handle, self.to_surface(event.position)) {
                return EventStatus::NotConsumed;
            }

            self.state = TouchState::Tracking;
        }

        native.handle_event(self.handle, event.action, self.to_surface(event.position));

        if event.action.ends_gesture() {
            self.state = TouchState::Idle;
        }

        EventStatus::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        claim: bool,
        hit_tests: Vec<(Handle, Point)>,
        events: Vec<(Handle, TouchAction, Point)>,
    }

    impl Native for Recorder {
        fn execute_callback(&mut self, _handle: Handle) {}

        fn draw_frame(&mut self, _handle: Handle) {}

        fn should_handle_event(&mut self, handle: Handle, location: Point) -> bool {
            self.hit_tests.push((handle, location));
            self.claim
        }

        fn handle_event(&mut self, handle: Handle, action: TouchAction, location: Point) {
            self.events.push((handle, action, location));
        }
    }

    const HANDLE: Handle = Handle::from_raw(9);

    fn gesture() -> [TouchEvent; 3] {
        [
            TouchEvent::new(TouchAction::Down, 110.0, 220.0),
            TouchEvent::new(TouchAction::Move, 115.0, 230.0),
            TouchEvent::new(TouchAction::Up, 120.0, 240.0),
        ]
    }

    #[test]
    fn unclaimed_gesture_is_not_consumed() {
        let mut native = Recorder::default();
        let mut tracker = TouchTracker::new(HANDLE);

        for event in gesture() {
            assert_eq!(tracker.process(&mut native, event), EventStatus::NotConsumed);
        }

        assert_eq!(native.hit_tests.len(), 1);
        assert!(native.events.is_empty());
        assert_eq!(tracker.state(), TouchState::Idle);
    }

    #[test]
    fn claimed_gesture_is_forwarded_in_surface_coordinates() {
        let mut native = Recorder {
            claim: true,
            ..Default::default()
        };
        let mut tracker = TouchTracker::new(HANDLE);
        tracker.set_origin(Point::new(100.0, 200.0));

        for event in gesture() {
            assert_eq!(tracker.process(&mut native, event), EventStatus::Consumed);
        }

        assert_eq!(native.hit_tests, vec![(HANDLE, Point::new(10.0, 20.0))]);
        assert_eq!(
            native.events,
            vec![
                (HANDLE, TouchAction::Down, Point::new(10.0, 20.0)),
                (HANDLE, TouchAction::Move, Point::new(15.0, 30.0)),
                (HANDLE, TouchAction::Up, Point::new(20.0, 40.0)),
            ]
        );
        assert_eq!(tracker.state(), TouchState::Idle);
    }

    #[test]
    fn events_outside_a_gesture_are_ignored() {
        let mut native = Recorder {
            claim: true,
            ..Default::default()
        };
        let mut tracker = TouchTracker::new(HANDLE);

        for action in [TouchAction::Move, TouchAction::Up, TouchAction::Cancel] {
            let status = tracker.process(&mut native, TouchEvent::new(action, 0.0, 0.0));
            assert_eq!(status, EventStatus::NotConsumed);
        }

        assert!(native.hit_tests.is_empty());
        assert!(native.events.is_empty());
    }

    #[test]
    fn cancel_ends_the_gesture() {
        let mut native = Recorder {
            claim: true,
            ..Default::default()
        };
        let mut tracker = TouchTracker::new(HANDLE);

        tracker.process(&mut native, TouchEvent::new(TouchAction::Down, 1.0, 1.0));
        assert_eq!(tracker.state(), TouchState::Tracking);

        let status = tracker.process(&mut native, TouchEvent::new(TouchAction::Cancel, 1.0, 1.0));
        assert_eq!(status, EventStatus::Consumed);
        assert_eq!(tracker.state(), TouchState::Idle);

        let status = tracker.process(&mut native, TouchEvent::new(TouchAction::Move, 1.0, 1.0));
        assert_eq!(status, EventStatus::NotConsumed);
    }

    #[test]
    fn unknown_actions_are_forwarded_while_tracking() {
        let mut native = Recorder {
            claim: true,
            ..Default::default()
        };
        let mut tracker = TouchTracker::new(HANDLE);

        tracker.process(&mut native, TouchEvent::new(TouchAction::Down, 0.0, 0.0));
        let status = tracker.process(&mut native, TouchEvent::new(TouchAction::Other(5), 0.0, 0.0));

        assert_eq!(status, EventStatus::Consumed);
        assert_eq!(native.events[1].1, TouchAction::Other(5));
        assert_eq!(tracker.state(), TouchState::Tracking);
    }

    #[test]
    fn scale_converts_pixels_to_points() {
        let mut tracker = TouchTracker::new(HANDLE);
        tracker.set_origin(Point::new(20.0, 40.0));
        tracker.set_scale(2.0);

        assert_eq!(tracker.to_surface(Point::new(120.0, 240.0)), Point::new(50.0, 100.0));

        tracker.set_scale(0.0);
        assert_eq!(tracker.to_surface(Point::new(22.0, 44.0)), Point::new(1.0, 2.0));
    }

    #[test]
    fn action_codes_match_motion_event() {
        for code in 0..6 {
            assert_eq!(TouchAction::from_code(code).code(), code);
        }
        assert_eq!(TouchAction::from_code(0), TouchAction::Down);
        assert_eq!(TouchAction::from_code(3), TouchAction::Cancel);
    }
}
