#![doc(hidden)]

use crate::{logging, runner::Runner, App};

pub use android_activity::AndroidApp;

/// Our implementation of an Android main for `NativeActivity`.
pub fn main<T: App>(android_app: AndroidApp) {
    let config = T::config();
    logging::init(&config);

    match Runner::<T>::new(android_app, config) {
        Ok(mut runner) => runner.run_until_closed(),
        Err(e) => log::error!("failed to start the app: {e}"),
    }
}

#[macro_export]
macro_rules! entrypoint {
    (
        app = $app:ty
    ) => {
        #[doc(hidden)]
        #[no_mangle]
        pub fn android_main(android_app: $crate::entrypoint::AndroidApp) {
            $crate::entrypoint::main::<$app>(android_app);
        }
    };
}
