use crate::ui_queue::{self, UiQueue};
use ndk::looper::{FdEvent, ForeignLooper};
use std::{
    error::Error,
    io::{self, Read, Write},
    os::{
        fd::{AsRawFd, BorrowedFd},
        unix::net::UnixStream,
    },
};

/// Hook a task queue into the Java main looper.
///
/// Each queued task writes a byte to a socket whose other end is watched by
/// the looper; the looper callback then drains the queue on the main thread.
pub(crate) fn attach(main_looper: &ForeignLooper) -> Result<UiQueue, Box<dyn Error>> {
    let (reader, writer) = UnixStream::pair()?;
    reader.set_nonblocking(true)?;
    writer.set_nonblocking(true)?;

    let (queue, tasks) = ui_queue::channel(move || {
        // A full socket already has the looper woken up.
        let _ = (&writer).write(&[1]);
    });

    // The callback owns `reader`, and keeps the descriptor open for as long
    // as it stays registered.
    let fd = unsafe { BorrowedFd::borrow_raw(reader.as_raw_fd()) };

    main_looper.add_fd_with_callback(fd, FdEvent::INPUT, move |_, events| {
        if events.intersects(FdEvent::HANGUP | FdEvent::ERROR) || !drain(&reader) {
            log::warn!("UI thread queue closed");
            return false;
        }

        tasks.run_pending();
        true
    })?;

    Ok(queue)
}

/// Read all pending wake-up bytes. Returns `false` once the socket is closed.
fn drain(mut reader: &UnixStream) -> bool {
    let mut buf = [0; 64];

    loop {
        match reader.read(&mut buf) {
            Ok(0) => return false,
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => return true,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => {
                log::error!("failed to read UI thread wake-ups: {e}");
                return false;
            }
        }
    }
}
