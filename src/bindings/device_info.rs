use super::JavaContext;
use crate::device::{DeviceInfo, DisplayMetrics};
use jni::objects::{JObject, JValue};
use std::error::Error;

const ACTION_BATTERY_CHANGED: &str = "android.intent.action.BATTERY_CHANGED";
const EXTRA_STATUS: &str = "status";

/// Device information read from the activity's resources.
pub(crate) struct JniDeviceInfo {
    java: JavaContext,
}

impl JniDeviceInfo {
    pub(crate) fn new(java: JavaContext) -> Self {
        Self { java }
    }
}

impl DeviceInfo for JniDeviceInfo {
    fn display_metrics(&self) -> Result<DisplayMetrics, Box<dyn Error>> {
        let activity = self.java.activity();

        let metrics = self.java.with_env(|env| {
            let resources = env
                .call_method(
                    activity,
                    "getResources",
                    "()Landroid/content/res/Resources;",
                    &[],
                )?
                .l()?;
            let metrics = env
                .call_method(
                    &resources,
                    "getDisplayMetrics",
                    "()Landroid/util/DisplayMetrics;",
                    &[],
                )?
                .l()?;

            Ok(DisplayMetrics {
                density: env.get_field(&metrics, "density", "F")?.f()?,
                width_pixels: env.get_field(&metrics, "widthPixels", "I")?.i()?,
                height_pixels: env.get_field(&metrics, "heightPixels", "I")?.i()?,
            })
        })?;

        Ok(metrics)
    }

    fn battery_status(&self) -> Result<Option<i32>, Box<dyn Error>> {
        let activity = self.java.activity();

        let status = self.java.with_env(|env| {
            let action = env.new_string(ACTION_BATTERY_CHANGED)?;
            let filter = env.new_object(
                "android/content/IntentFilter",
                "(Ljava/lang/String;)V",
                &[JValue::Object(&action)],
            )?;

            // Battery changes are sticky, so a null receiver gets the last
            // broadcast without registering anything.
            let intent = env
                .call_method(
                    activity,
                    "registerReceiver",
                    "(Landroid/content/BroadcastReceiver;Landroid/content/IntentFilter;)Landroid/content/Intent;",
                    &[JValue::Object(&JObject::null()), JValue::Object(&filter)],
                )?
                .l()?;

            if intent.is_null() {
                return Ok(None);
            }

            let name = env.new_string(EXTRA_STATUS)?;
            let status = env
                .call_method(
                    &intent,
                    "getIntExtra",
                    "(Ljava/lang/String;I)I",
                    &[JValue::Object(&name), JValue::Int(-1)],
                )?
                .i()?;

            Ok(Some(status))
        })?;

        Ok(status)
    }
}
