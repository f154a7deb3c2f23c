//! Running work on the UI thread from other threads.
//!
//! [`UiQueue`] is the sending half: it hands a task to the UI thread and
//! blocks until the result comes back. [`UiTasks`] is the receiving half,
//! drained by the UI thread whenever it is woken up.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use std::{
    fmt,
    sync::{mpsc, Arc, OnceLock},
    thread::{self, ThreadId},
    time::Duration,
};

type Task = Box<dyn FnOnce() + Send>;

/// Why a task could not be run on the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiThreadError {
    /// The UI thread no longer drains its queue.
    Disconnected,
    /// The UI thread did not get to the task in time. The task is still
    /// queued and may run later.
    TimedOut,
}

impl fmt::Display for UiThreadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => f.write_str("the UI thread is gone"),
            Self::TimedOut => f.write_str("timed out waiting for the UI thread"),
        }
    }
}

impl std::error::Error for UiThreadError {}

/// Create a connected queue. `wake` must make the UI thread call
/// [`UiTasks::run_pending`] soon.
pub(crate) fn channel(wake: impl Fn() + Send + Sync + 'static) -> (UiQueue, UiTasks) {
    let (sender, receiver) = mpsc::channel();
    let ui_thread = Arc::new(OnceLock::new());

    let queue = UiQueue {
        sender,
        wake: Arc::new(wake),
        ui_thread: ui_thread.clone(),
    };
    let tasks = UiTasks {
        receiver,
        ui_thread,
    };

    (queue, tasks)
}

#[derive(Clone)]
pub(crate) struct UiQueue {
    sender: mpsc::Sender<Task>,
    wake: Arc<dyn Fn() + Send + Sync>,
    ui_thread: Arc<OnceLock<ThreadId>>,
}

impl UiQueue {
    /// Run `f` on the UI thread and wait up to `timeout` for its result.
    ///
    /// Called from the UI thread itself, `f` runs right away.
    pub(crate) fn run<T, F>(&self, timeout: Duration, f: F) -> Result<T, UiThreadError>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        if self.ui_thread.get() == Some(&thread::current().id()) {
            return Ok(f());
        }

        let (reply, result) = mpsc::sync_channel(1);

        self.sender
            .send(Box::new(move || {
                // The caller may have given up waiting.
                let _ = reply.send(f());
            }))
            .map_err(|_| UiThreadError::Disconnected)?;

        (self.wake)();

        result.recv_timeout(timeout).map_err(|e| match e {
            mpsc::RecvTimeoutError::Timeout => UiThreadError::TimedOut,
            mpsc::RecvTimeoutError::Disconnected => UiThreadError::Disconnected,
        })
    }
}

pub(crate) struct UiTasks {
    receiver: mpsc::Receiver<Task>,
    ui_thread: Arc<OnceLock<ThreadId>>,
}

impl UiTasks {
    /// Run every queued task. Must only be called on the UI thread, which
    /// the first call records as such.
    pub(crate) fn run_pending(&self) -> usize {
        self.ui_thread.get_or_init(|| thread::current().id());

        let mut ran = 0;
        while let Ok(task) = self.receiver.try_recv() {
            task();
            ran += 1;
        }

        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Condvar, Mutex,
    };

    /// A stand-in for the looper: `wake` flags the UI thread, which then
    /// drains the queue.
    #[derive(Default)]
    struct Signal {
        woken: Mutex<bool>,
        cond: Condvar,
    }

    impl Signal {
        fn wake(&self) {
            *self.woken.lock().unwrap() = true;
            self.cond.notify_one();
        }

        fn wait(&self) {
            let mut woken = self.woken.lock().unwrap();
            while !*woken {
                woken = self.cond.wait(woken).unwrap();
            }
            *woken = false;
        }
    }

    #[test]
    fn tasks_run_on_the_ui_thread() {
        let signal = Arc::new(Signal::default());
        let (queue, tasks) = channel({
            let signal = signal.clone();
            move || signal.wake()
        });

        let ui = thread::spawn(move || {
            signal.wait();
            tasks.run_pending();
            thread::current().id()
        });

        let ran_on = queue
            .run(Duration::from_secs(10), || thread::current().id())
            .unwrap();

        assert_eq!(ran_on, ui.join().unwrap());
        assert_ne!(ran_on, thread::current().id());
    }

    #[test]
    fn the_ui_thread_runs_its_own_requests_inline() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let (queue, tasks) = channel({
            let wakes = wakes.clone();
            move || {
                wakes.fetch_add(1, Ordering::SeqCst);
            }
        });
        tasks.run_pending();

        let value = queue.run(Duration::ZERO, || 42).unwrap();

        assert_eq!(value, 42);
        assert_eq!(wakes.load(Ordering::SeqCst), 0);
        assert_eq!(tasks.run_pending(), 0);
    }

    #[test]
    fn an_unresponsive_ui_thread_times_out() {
        let (queue, tasks) = channel(|| {});

        let result = thread::spawn(move || queue.run(Duration::from_millis(10), || 1))
            .join()
            .unwrap();

        assert_eq!(result, Err(UiThreadError::TimedOut));
        // The task is still delivered once the UI thread gets to it.
        assert_eq!(tasks.run_pending(), 1);
    }

    #[test]
    fn a_dropped_ui_thread_disconnects() {
        let (queue, tasks) = channel(|| {});
        drop(tasks);

        let result = thread::spawn(move || queue.run(Duration::from_secs(10), || 1))
            .join()
            .unwrap();

        assert_eq!(result, Err(UiThreadError::Disconnected));
    }
}
