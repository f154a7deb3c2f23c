use crate::graphics::SurfaceConfig;

/// Screens whose smallest width is at least this many dp are tablets.
pub const DEFAULT_TABLET_SMALLEST_WIDTH_DP: f32 = 600.0;

/// Process-wide settings for the Android layer.
///
/// A native implementation supplies one through
/// [`Native::config`](crate::Native::config); anything not overridden keeps
/// its default.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) log_tag: String,
    pub(crate) log_level: log::LevelFilter,
    pub(crate) surface: SurfaceConfig,
    pub(crate) tablet_smallest_width_dp: f32,
}

impl Config {
    pub fn new() -> Self {
        Self {
            log_tag: String::from("moui"),
            log_level: log::LevelFilter::Debug,
            surface: SurfaceConfig::default(),
            tablet_smallest_width_dp: DEFAULT_TABLET_SMALLEST_WIDTH_DP,
        }
    }

    /// Tag that log records show up under in logcat.
    pub fn with_log_tag(mut self, tag: impl Into<String>) -> Self {
        self.log_tag = tag.into();
        self
    }

    pub fn with_log_level(mut self, level: log::LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_surface(mut self, surface: SurfaceConfig) -> Self {
        self.surface = surface;
        self
    }

    /// Minimum smallest-width, in dp, for the device to count as a tablet.
    pub fn with_tablet_smallest_width_dp(mut self, dp: f32) -> Self {
        self.tablet_smallest_width_dp = dp;
        self
    }

    pub fn surface(&self) -> &SurfaceConfig {
        &self.surface
    }

    pub fn tablet_smallest_width_dp(&self) -> f32 {
        self.tablet_smallest_width_dp
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_keep_other_defaults() {
        let config = Config::default()
            .with_log_tag("demo")
            .with_surface(SurfaceConfig::legacy());

        assert_eq!(config.log_tag, "demo");
        assert_eq!(config.log_level, log::LevelFilter::Debug);
        assert_eq!(config.surface().depth_size, 16);
        assert_eq!(
            config.tablet_smallest_width_dp(),
            DEFAULT_TABLET_SMALLEST_WIDTH_DP
        );
    }
}
