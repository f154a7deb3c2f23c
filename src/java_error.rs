//! Recovery from Java exceptions thrown during JNI calls.
#![cfg_attr(not(target_os = "android"), allow(dead_code))]

use jni::errors::Error;

/// A JNI call that failed with [`Error::JavaException`] leaves the exception
/// pending on the calling thread, and no further JNI call may be made on it
/// until the exception is cleared. `clear` runs exactly in that case; the
/// error itself is still returned to the caller.
pub(crate) fn clear_pending_exception<T>(
    result: Result<T, Error>,
    clear: impl FnOnce(),
) -> Result<T, Error> {
    if let Err(Error::JavaException) = &result {
        clear();
    }

    result
}
