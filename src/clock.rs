//! Delayed callbacks into the native side.
//!
//! Callbacks are fire and forget: once armed, a callback runs exactly once
//! on the UI thread and cannot be revoked. Each schedule is independent, so
//! two schedules for the same handle fire twice.

use crate::Handle;
use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
    sync::{Arc, Mutex},
    thread::{self, ThreadId},
    time::{Duration, Instant},
};

/// The looper takes its timeout as `i32` milliseconds.
const MAX_TIMEOUT: Duration = Duration::from_millis(i32::MAX as u64);

/// Convert a delay in fractional seconds to the millisecond resolution the
/// timer works in. Negative and NaN delays fire immediately.
pub(crate) fn delay_from_seconds(delay_seconds: f32) -> Duration {
    if delay_seconds > 0.0 {
        Duration::from_millis((delay_seconds * 1000.0) as u64)
    } else {
        Duration::ZERO
    }
}

/// A queue of one-shot timers ordered by deadline.
///
/// Entries sharing a deadline fire in the order they were scheduled.
pub struct TimerQueue<T> {
    entries: BinaryHeap<Reverse<Entry<T>>>,
    next_seq: u64,
}

struct Entry<T> {
    deadline: Instant,
    seq: u64,
    payload: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.deadline
            .cmp(&other.deadline)
            .then(self.seq.cmp(&other.seq))
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Arm a timer that fires `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.entries.push(Reverse(Entry {
            deadline: now + delay,
            seq,
            payload,
        }));
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.peek().map(|Reverse(entry)| entry.deadline)
    }

    /// Remove and return the earliest timer whose deadline is not after `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<T> {
        if self.next_deadline()? > now {
            return None;
        }

        self.entries.pop().map(|Reverse(entry)| entry.payload)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Schedules `Native::execute_callback` calls on the UI thread.
///
/// Cloning a clock is cheap and all clones share one queue. Scheduling from
/// any thread wakes up the event loop so that the new deadline is honored.
#[derive(Clone)]
pub struct Clock {
    inner: Arc<ClockInner>,
}

struct ClockInner {
    queue: Mutex<TimerQueue<Handle>>,
    waker: Box<dyn Fn() + Send + Sync>,
    started: Instant,
    main_thread: ThreadId,
}

impl Clock {
    /// Create a clock whose UI thread is the calling thread. `waker` must
    /// cause the event loop to re-check [`Clock::next_timeout`].
    pub fn new(waker: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(ClockInner {
                queue: Mutex::new(TimerQueue::new()),
                waker: Box::new(waker),
                started: Instant::now(),
                main_thread: thread::current().id(),
            }),
        }
    }

    /// Invoke the native callback for `handle` once, after `delay_seconds`.
    pub fn schedule_callback(&self, delay_seconds: f32, handle: Handle) {
        let delay = delay_from_seconds(delay_seconds);

        self.inner
            .queue
            .lock()
            .unwrap()
            .schedule(Instant::now(), delay, handle);

        (self.inner.waker)();
    }

    /// Like [`Clock::schedule_callback`], except that a zero delay requested
    /// from the UI thread runs `run_now` immediately instead of going through
    /// the queue.
    pub fn execute_on_main_thread(
        &self,
        delay_seconds: f32,
        handle: Handle,
        run_now: impl FnOnce(Handle),
    ) {
        if delay_from_seconds(delay_seconds).is_zero() && self.is_main_thread() {
            run_now(handle);
        } else {
            self.schedule_callback(delay_seconds, handle);
        }
    }

    /// Wait out the delay on a background thread, then hand the callback to
    /// the UI thread.
    pub fn dispatch_after(&self, delay_seconds: f32, handle: Handle) {
        let delay = delay_from_seconds(delay_seconds);
        let clock = self.clone();

        thread::spawn(move || {
            thread::sleep(delay);
            clock.schedule_callback(0.0, handle);
        });
    }

    /// Monotonic time in seconds since the clock was created.
    pub fn timestamp(&self) -> f64 {
        self.inner.started.elapsed().as_secs_f64()
    }

    pub fn is_main_thread(&self) -> bool {
        thread::current().id() == self.inner.main_thread
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.inner.queue.lock().unwrap().next_deadline()
    }

    /// How long the event loop may sleep before a timer is due, capped at
    /// the longest wait the looper accepts.
    pub(crate) fn next_timeout(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now).min(MAX_TIMEOUT))
    }

    /// Fire every timer due at `now`. The queue lock is not held while
    /// `callback` runs, so callbacks may schedule further timers.
    pub(crate) fn run_due(&self, now: Instant, mut callback: impl FnMut(Handle)) -> usize {
        let mut fired = 0;

        loop {
            let due = self.inner.queue.lock().unwrap().pop_due(now);

            match due {
                Some(handle) => {
                    log::trace!("clock firing callback {handle}");
                    callback(handle);
                    fired += 1;
                }
                None => return fired,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn clock_with_wake_count() -> (Clock, Arc<AtomicUsize>) {
        let wakes = Arc::new(AtomicUsize::new(0));
        let clock = Clock::new({
            let wakes = wakes.clone();
            move || {
                wakes.fetch_add(1, Ordering::SeqCst);
            }
        });

        (clock, wakes)
    }

    #[test]
    fn delay_is_truncated_to_milliseconds() {
        assert_eq!(delay_from_seconds(0.25), Duration::from_millis(250));
        assert_eq!(delay_from_seconds(1.0005), Duration::from_millis(1000));
        assert_eq!(delay_from_seconds(0.0), Duration::ZERO);
        assert_eq!(delay_from_seconds(-3.0), Duration::ZERO);
        assert_eq!(delay_from_seconds(f32::NAN), Duration::ZERO);
    }

    #[test]
    fn timers_fire_in_deadline_then_schedule_order() {
        let now = Instant::now();
        let mut queue = TimerQueue::new();

        queue.schedule(now, Duration::from_millis(20), "late");
        queue.schedule(now, Duration::from_millis(10), "first");
        queue.schedule(now, Duration::from_millis(10), "second");

        assert_eq!(queue.pop_due(now), None);

        let later = now + Duration::from_millis(20);
        assert_eq!(queue.pop_due(later), Some("first"));
        assert_eq!(queue.pop_due(later), Some("second"));
        assert_eq!(queue.pop_due(later), Some("late"));
        assert!(queue.is_empty());
    }

    #[test]
    fn callback_fires_once_with_same_handle_after_delay() {
        let (clock, wakes) = clock_with_wake_count();
        let handle = Handle::from_raw(7);
        let before = Instant::now();

        clock.schedule_callback(0.5, handle);
        assert_eq!(wakes.load(Ordering::SeqCst), 1);

        let deadline = clock.next_deadline().unwrap();
        assert!(deadline >= before + Duration::from_millis(500));

        let mut fired = Vec::new();
        clock.run_due(deadline - Duration::from_millis(1), |h| fired.push(h));
        assert!(fired.is_empty());

        clock.run_due(deadline, |h| fired.push(h));
        clock.run_due(deadline + Duration::from_secs(1), |h| fired.push(h));
        assert_eq!(fired, vec![handle]);
        assert_eq!(clock.next_deadline(), None);
    }

    #[test]
    fn overlapping_schedules_are_not_coalesced() {
        let (clock, _) = clock_with_wake_count();
        let handle = Handle::from_raw(1);

        clock.schedule_callback(0.0, handle);
        clock.schedule_callback(0.0, handle);

        let fired = clock.run_due(Instant::now(), |h| assert_eq!(h, handle));
        assert_eq!(fired, 2);
    }

    #[test]
    fn callbacks_may_reschedule_while_firing() {
        let (clock, _) = clock_with_wake_count();
        clock.schedule_callback(0.0, Handle::from_raw(1));

        let now = Instant::now();
        let fired = clock.run_due(now, |h| {
            if h == Handle::from_raw(1) {
                clock.schedule_callback(60.0, Handle::from_raw(2));
            }
        });

        assert_eq!(fired, 1);
        assert!(clock.next_timeout(now).unwrap() > Duration::from_secs(59));
    }

    #[test]
    fn far_deadlines_fit_the_looper_timeout() {
        let (clock, _) = clock_with_wake_count();
        let now = Instant::now();

        // 30 days overflows `i32` milliseconds.
        clock.schedule_callback(30.0 * 24.0 * 60.0 * 60.0, Handle::from_raw(1));

        let timeout = clock.next_timeout(now).unwrap();
        assert_eq!(timeout, MAX_TIMEOUT);
        assert_eq!(timeout.as_millis(), i32::MAX as u128);
    }

    #[test]
    fn zero_delay_on_main_thread_runs_immediately() {
        let (clock, wakes) = clock_with_wake_count();
        let mut ran = None;

        clock.execute_on_main_thread(0.0, Handle::from_raw(3), |h| ran = Some(h));

        assert_eq!(ran, Some(Handle::from_raw(3)));
        assert_eq!(clock.next_deadline(), None);
        assert_eq!(wakes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn nonzero_delay_on_main_thread_is_queued() {
        let (clock, _) = clock_with_wake_count();

        clock.execute_on_main_thread(0.1, Handle::from_raw(3), |_| {
            panic!("should not run inline")
        });

        assert!(clock.next_deadline().is_some());
    }

    #[test]
    fn zero_delay_off_main_thread_is_queued() {
        let (clock, _) = clock_with_wake_count();

        thread::spawn({
            let clock = clock.clone();
            move || {
                assert!(!clock.is_main_thread());
                clock.execute_on_main_thread(0.0, Handle::from_raw(4), |_| {
                    panic!("should not run off the main thread")
                });
            }
        })
        .join()
        .unwrap();

        let mut fired = Vec::new();
        clock.run_due(Instant::now(), |h| fired.push(h));
        assert_eq!(fired, vec![Handle::from_raw(4)]);
    }

    #[test]
    fn dispatch_after_hands_off_to_the_queue() {
        let (clock, wakes) = clock_with_wake_count();

        clock.dispatch_after(0.01, Handle::from_raw(5));

        let start = Instant::now();
        while wakes.load(Ordering::SeqCst) == 0 {
            assert!(start.elapsed() < Duration::from_secs(5));
            thread::sleep(Duration::from_millis(1));
        }

        let mut fired = Vec::new();
        clock.run_due(Instant::now(), |h| fired.push(h));
        assert_eq!(fired, vec![Handle::from_raw(5)]);
    }

    #[test]
    fn timestamp_is_monotonic() {
        let (clock, _) = clock_with_wake_count();
        let first = clock.timestamp();
        let second = clock.timestamp();

        assert!(first >= 0.0);
        assert!(second >= first);
    }
}
