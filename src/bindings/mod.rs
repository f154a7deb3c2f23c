//! Thin wrappers around the Java APIs of the activity, called through JNI.

mod device_info;
mod directories;
mod ui_thread;
mod view_tree;

pub(crate) use device_info::JniDeviceInfo;
pub(crate) use directories::JniDirectories;
pub(crate) use ui_thread::attach as attach_ui_thread;
pub use view_tree::JniViewTree;

use android_activity::AndroidApp;
use jni::{
    errors::Error,
    objects::{GlobalRef, JObject},
    JNIEnv, JavaVM,
};
use crate::java_error::clear_pending_exception;
use std::sync::Arc;

/// Enough local references for any single binding call.
const LOCAL_FRAME_CAPACITY: i32 = 16;

/// The Java VM together with the activity that hosts the app.
#[derive(Clone)]
pub(crate) struct JavaContext {
    vm: Arc<JavaVM>,
    activity: GlobalRef,
}

impl JavaContext {
    pub(crate) fn for_android_app(android_app: &AndroidApp) -> Result<Self, Error> {
        let vm = unsafe { JavaVM::from_raw(android_app.vm_as_ptr() as _)? };
        let activity = unsafe { JObject::from_raw(android_app.activity_as_ptr() as _) };
        let env = vm.attach_current_thread()?;

        let activity = env.new_global_ref(activity)?;

        drop(env);

        Ok(Self {
            vm: Arc::new(vm),
            activity,
        })
    }

    pub(crate) fn activity(&self) -> &GlobalRef {
        &self.activity
    }

    /// Run `f` with a JNI environment for the current thread. Local
    /// references created by `f` are released when it returns, and a Java
    /// exception it ran into is logged and cleared.
    ///
    /// The thread stays attached to the VM afterwards, so repeated calls from
    /// the same thread do not attach it again.
    pub(crate) fn with_env<T>(
        &self,
        f: impl FnOnce(&mut JNIEnv) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let mut env = self.vm.attach_current_thread_permanently()?;

        let result = env.with_local_frame(LOCAL_FRAME_CAPACITY, f);

        clear_pending_exception(result, || {
            // Prints the exception and its stack trace to logcat.
            let _ = env.exception_describe();
            let _ = env.exception_clear();
        })
    }
}
