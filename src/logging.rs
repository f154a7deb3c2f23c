use crate::Config;

/// Route `log` records and panics to logcat. Only the first call has any
/// effect.
pub(crate) fn init(config: &Config) {
    #[cfg(feature = "logger")]
    {
        use std::sync::Once;

        static ONCE: Once = Once::new();

        ONCE.call_once(|| {
            android_logger::init_once(
                android_logger::Config::default()
                    .with_max_level(config.log_level)
                    .with_tag(config.log_tag.as_str()),
            );

            log_panics::init();
        });
    }

    #[cfg(not(feature = "logger"))]
    let _ = config;
}
