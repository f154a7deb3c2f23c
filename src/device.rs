use crate::config::DEFAULT_TABLET_SMALLEST_WIDTH_DP;
use std::{error::Error, sync::Arc};

/// A snapshot of the display metrics of the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    /// Logical density, the scale factor between dp and pixels.
    pub density: f32,
    pub width_pixels: i32,
    pub height_pixels: i32,
}

impl DisplayMetrics {
    /// Smallest of the screen width and height, in dp.
    pub fn smallest_width_dp(&self) -> f32 {
        self.width_pixels.min(self.height_pixels) as f32 / self.density
    }
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self {
            density: 1.0,
            width_pixels: 0,
            height_pixels: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Phone,
    Tablet,
    Unknown,
}

/// The battery power state of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryState {
    Unknown,
    /// Not plugged into power; the battery is discharging.
    Unplugged,
    /// Plugged into power but not charging.
    NotCharging,
    Charging,
    /// Plugged into power and fully charged.
    Full,
}

impl BatteryState {
    /// Map a `BatteryManager.BATTERY_STATUS_*` value.
    pub fn from_status(status: i32) -> Self {
        match status {
            2 => Self::Charging,
            3 => Self::Unplugged,
            4 => Self::NotCharging,
            5 => Self::Full,
            _ => Self::Unknown,
        }
    }
}

/// Where device information comes from.
pub trait DeviceInfo: Send + Sync {
    fn display_metrics(&self) -> Result<DisplayMetrics, Box<dyn Error>>;

    /// Raw `BatteryManager.EXTRA_STATUS`, or `None` if nothing was reported.
    fn battery_status(&self) -> Result<Option<i32>, Box<dyn Error>>;
}

/// Queries about the device the app runs on.
#[derive(Clone)]
pub struct Device {
    info: Arc<dyn DeviceInfo>,
    tablet_smallest_width_dp: f32,
}

impl Device {
    pub fn new(info: impl DeviceInfo + 'static) -> Self {
        Self {
            info: Arc::new(info),
            tablet_smallest_width_dp: DEFAULT_TABLET_SMALLEST_WIDTH_DP,
        }
    }

    pub fn with_tablet_smallest_width_dp(mut self, dp: f32) -> Self {
        self.tablet_smallest_width_dp = dp;
        self
    }

    /// The logical pixel density of the screen, typically between 1.0 and
    /// 4.0.
    pub fn screen_scale_factor(&self) -> f32 {
        self.display_metrics().density
    }

    /// The smallest screen width the app sees in either orientation, in dp.
    pub fn smallest_screen_width(&self) -> f32 {
        self.display_metrics().smallest_width_dp()
    }

    pub fn category(&self) -> Category {
        let smallest_width = self.smallest_screen_width();

        if smallest_width >= self.tablet_smallest_width_dp {
            Category::Tablet
        } else if smallest_width > 0.0 {
            Category::Phone
        } else {
            Category::Unknown
        }
    }

    pub fn battery_state(&self) -> BatteryState {
        match self.info.battery_status() {
            Ok(Some(status)) => BatteryState::from_status(status),
            Ok(None) => BatteryState::Unknown,
            Err(e) => {
                log::warn!("failed to query battery status: {e}");
                BatteryState::Unknown
            }
        }
    }

    pub fn display_metrics(&self) -> DisplayMetrics {
        self.info.display_metrics().unwrap_or_else(|e| {
            log::error!("failed to query display metrics: {e}");
            DisplayMetrics::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedInfo {
        metrics: DisplayMetrics,
        battery: Option<i32>,
    }

    impl DeviceInfo for FixedInfo {
        fn display_metrics(&self) -> Result<DisplayMetrics, Box<dyn Error>> {
            Ok(self.metrics)
        }

        fn battery_status(&self) -> Result<Option<i32>, Box<dyn Error>> {
            Ok(self.battery)
        }
    }

    struct BrokenInfo;

    impl DeviceInfo for BrokenInfo {
        fn display_metrics(&self) -> Result<DisplayMetrics, Box<dyn Error>> {
            Err("no display".into())
        }

        fn battery_status(&self) -> Result<Option<i32>, Box<dyn Error>> {
            Err("no battery".into())
        }
    }

    fn device(density: f32, width_pixels: i32, height_pixels: i32) -> Device {
        Device::new(FixedInfo {
            metrics: DisplayMetrics {
                density,
                width_pixels,
                height_pixels,
            },
            battery: None,
        })
    }

    #[test]
    fn scale_factor_is_density() {
        assert_eq!(device(2.625, 1080, 2340).screen_scale_factor(), 2.625);
    }

    #[test]
    fn smallest_width_is_min_dimension_over_density() {
        for (density, width, height) in [
            (1.0, 320, 480),
            (2.0, 1600, 1200),
            (3.0, 1080, 1920),
            (2.625, 1080, 2340),
            (4.0, 1440, 3200),
        ] {
            let expected = width.min(height) as f32 / density;
            assert_eq!(
                device(density, width, height).smallest_screen_width(),
                expected
            );
        }
    }

    #[test]
    fn category_uses_tablet_threshold() {
        assert_eq!(device(2.0, 1080, 1920).category(), Category::Phone);
        assert_eq!(device(2.0, 1600, 2560).category(), Category::Tablet);
        assert_eq!(device(1.0, 0, 0).category(), Category::Unknown);

        let small_tablets = device(2.0, 1080, 1920).with_tablet_smallest_width_dp(500.0);
        assert_eq!(small_tablets.category(), Category::Tablet);
    }

    #[test]
    fn battery_status_mapping() {
        assert_eq!(BatteryState::from_status(1), BatteryState::Unknown);
        assert_eq!(BatteryState::from_status(2), BatteryState::Charging);
        assert_eq!(BatteryState::from_status(3), BatteryState::Unplugged);
        assert_eq!(BatteryState::from_status(4), BatteryState::NotCharging);
        assert_eq!(BatteryState::from_status(5), BatteryState::Full);
        assert_eq!(BatteryState::from_status(-1), BatteryState::Unknown);

        let charging = Device::new(FixedInfo {
            metrics: DisplayMetrics::default(),
            battery: Some(2),
        });
        assert_eq!(charging.battery_state(), BatteryState::Charging);
    }

    #[test]
    fn failures_fall_back_to_defaults() {
        let device = Device::new(BrokenInfo);

        assert_eq!(device.screen_scale_factor(), 1.0);
        assert_eq!(device.smallest_screen_width(), 0.0);
        assert_eq!(device.battery_state(), BatteryState::Unknown);
    }
}
