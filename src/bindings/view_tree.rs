use super::JavaContext;
use crate::{
    ui_queue::UiQueue,
    view::{AbsoluteLayout, ViewTree, Visibility},
};
use jni::{
    objects::{GlobalRef, JObject, JValue},
    JNIEnv,
};
use std::time::Duration;

type Error = Box<dyn std::error::Error + Send + Sync>;

/// `android.R.id.content`
const ANDROID_R_ID_CONTENT: i32 = 0x0102_0002;

/// `android.view.Gravity.TOP`
const GRAVITY_TOP: i32 = 0x30;

/// How long a view call waits for the UI thread. The main thread can itself
/// be blocked on `android_main` while the activity changes state.
const UI_THREAD_TIMEOUT: Duration = Duration::from_secs(2);

/// The view hierarchy of the activity, as seen through JNI.
///
/// Views belong to the Java main thread, so every call is run there and the
/// calling thread waits for the result.
#[derive(Clone)]
pub struct JniViewTree {
    java: JavaContext,
    ui: UiQueue,
}

impl JniViewTree {
    pub(crate) fn new(java: JavaContext, ui: UiQueue) -> Self {
        Self { java, ui }
    }

    fn on_ui_thread<T, F>(&self, f: F) -> Result<T, Error>
    where
        T: Send + 'static,
        F: FnOnce(&mut JNIEnv) -> Result<T, jni::errors::Error> + Send + 'static,
    {
        let java = self.java.clone();

        Ok(self.ui.run(UI_THREAD_TIMEOUT, move || java.with_env(f))??)
    }
}

fn global_or_none(env: &mut JNIEnv, object: JObject) -> jni::errors::Result<Option<GlobalRef>> {
    if object.is_null() {
        Ok(None)
    } else {
        env.new_global_ref(object).map(Some)
    }
}

impl ViewTree for JniViewTree {
    type View = GlobalRef;
    type Window = GlobalRef;
    type Error = Error;

    fn is_container(&self, view: &GlobalRef) -> Result<bool, Error> {
        let view = view.clone();

        self.on_ui_thread(move |env| env.is_instance_of(&view, "android/view/ViewGroup"))
    }

    fn add_child(&self, parent: &GlobalRef, child: &GlobalRef) -> Result<(), Error> {
        let (parent, child) = (parent.clone(), child.clone());

        self.on_ui_thread(move |env| {
            env.call_method(
                &parent,
                "addView",
                "(Landroid/view/View;)V",
                &[JValue::Object(child.as_obj())],
            )?
            .v()
        })
    }

    fn remove_child(&self, parent: &GlobalRef, child: &GlobalRef) -> Result<(), Error> {
        let (parent, child) = (parent.clone(), child.clone());

        self.on_ui_thread(move |env| {
            env.call_method(
                &parent,
                "removeView",
                "(Landroid/view/View;)V",
                &[JValue::Object(child.as_obj())],
            )?
            .v()
        })
    }

    fn parent(&self, view: &GlobalRef) -> Result<Option<GlobalRef>, Error> {
        let view = view.clone();

        self.on_ui_thread(move |env| {
            let parent = env
                .call_method(&view, "getParent", "()Landroid/view/ViewParent;", &[])?
                .l()?;

            // The root of a hierarchy has a `ViewRootImpl` parent, which is
            // not a view.
            if parent.is_null() || !env.is_instance_of(&parent, "android/view/View")? {
                return Ok(None);
            }

            global_or_none(env, parent)
        })
    }

    fn child_count(&self, view: &GlobalRef) -> Result<i32, Error> {
        let view = view.clone();

        self.on_ui_thread(move |env| env.call_method(&view, "getChildCount", "()I", &[])?.i())
    }

    fn child_at(&self, view: &GlobalRef, index: i32) -> Result<Option<GlobalRef>, Error> {
        let view = view.clone();

        self.on_ui_thread(move |env| {
            let count = env.call_method(&view, "getChildCount", "()I", &[])?.i()?;
            if index < 0 || index >= count {
                return Ok(None);
            }

            let child = env
                .call_method(
                    &view,
                    "getChildAt",
                    "(I)Landroid/view/View;",
                    &[JValue::Int(index)],
                )?
                .l()?;

            global_or_none(env, child)
        })
    }

    fn index_of_child(&self, parent: &GlobalRef, child: &GlobalRef) -> Result<Option<i32>, Error> {
        let (parent, child) = (parent.clone(), child.clone());

        self.on_ui_thread(move |env| {
            let index = env
                .call_method(
                    &parent,
                    "indexOfChild",
                    "(Landroid/view/View;)I",
                    &[JValue::Object(child.as_obj())],
                )?
                .i()?;

            Ok((index >= 0).then_some(index))
        })
    }

    fn bring_to_front(&self, view: &GlobalRef) -> Result<(), Error> {
        let view = view.clone();

        self.on_ui_thread(move |env| env.call_method(&view, "bringToFront", "()V", &[])?.v())
    }

    fn set_layout(&self, view: &GlobalRef, layout: AbsoluteLayout) -> Result<(), Error> {
        let view = view.clone();

        self.on_ui_thread(move |env| {
            let params = env.new_object(
                "android/widget/FrameLayout$LayoutParams",
                "(III)V",
                &[
                    JValue::Int(layout.width),
                    JValue::Int(layout.height),
                    JValue::Int(GRAVITY_TOP),
                ],
            )?;
            env.set_field(&params, "leftMargin", "I", JValue::Int(layout.left))?;
            env.set_field(&params, "topMargin", "I", JValue::Int(layout.top))?;

            env.call_method(
                &view,
                "setLayoutParams",
                "(Landroid/view/ViewGroup$LayoutParams;)V",
                &[JValue::Object(&params)],
            )?
            .v()
        })
    }

    fn visibility(&self, view: &GlobalRef) -> Result<Visibility, Error> {
        let view = view.clone();

        self.on_ui_thread(move |env| {
            let code = env.call_method(&view, "getVisibility", "()I", &[])?.i()?;
            Ok(Visibility::from_code(code))
        })
    }

    fn set_visibility(&self, view: &GlobalRef, visibility: Visibility) -> Result<(), Error> {
        let view = view.clone();

        self.on_ui_thread(move |env| {
            env.call_method(
                &view,
                "setVisibility",
                "(I)V",
                &[JValue::Int(visibility.code())],
            )?
            .v()
        })
    }

    fn size(&self, view: &GlobalRef) -> Result<(i32, i32), Error> {
        let view = view.clone();

        self.on_ui_thread(move |env| view_size(env, &view))
    }

    fn render_argb(&self, view: &GlobalRef) -> Result<Vec<i32>, Error> {
        let view = view.clone();

        self.on_ui_thread(move |env| {
            let (width, height) = view_size(env, &view)?;
            if width <= 0 || height <= 0 {
                return Ok(Vec::new());
            }

            let bitmap_config = env
                .get_static_field(
                    "android/graphics/Bitmap$Config",
                    "ARGB_8888",
                    "Landroid/graphics/Bitmap$Config;",
                )?
                .l()?;
            let bitmap = env
                .call_static_method(
                    "android/graphics/Bitmap",
                    "createBitmap",
                    "(IILandroid/graphics/Bitmap$Config;)Landroid/graphics/Bitmap;",
                    &[
                        JValue::Int(width),
                        JValue::Int(height),
                        JValue::Object(&bitmap_config),
                    ],
                )?
                .l()?;
            let canvas = env.new_object(
                "android/graphics/Canvas",
                "(Landroid/graphics/Bitmap;)V",
                &[JValue::Object(&bitmap)],
            )?;

            env.call_method(
                &view,
                "layout",
                "(IIII)V",
                &[
                    JValue::Int(0),
                    JValue::Int(0),
                    JValue::Int(width),
                    JValue::Int(height),
                ],
            )?
            .v()?;
            env.call_method(
                &view,
                "draw",
                "(Landroid/graphics/Canvas;)V",
                &[JValue::Object(&canvas)],
            )?
            .v()?;

            let len = width * height;
            let array = env.new_int_array(len)?;
            env.call_method(
                &bitmap,
                "getPixels",
                "([IIIIIII)V",
                &[
                    JValue::Object(&array),
                    JValue::Int(0),
                    JValue::Int(width),
                    JValue::Int(0),
                    JValue::Int(0),
                    JValue::Int(width),
                    JValue::Int(height),
                ],
            )?
            .v()?;
            env.call_method(&bitmap, "recycle", "()V", &[])?.v()?;

            let mut pixels = vec![0; len as usize];
            env.get_int_array_region(&array, 0, &mut pixels)?;

            Ok(pixels)
        })
    }

    fn current_window(&self) -> Result<GlobalRef, Error> {
        let activity = self.java.activity().clone();

        self.on_ui_thread(move |env| {
            let window = env
                .call_method(&activity, "getWindow", "()Landroid/view/Window;", &[])?
                .l()?;

            global_or_none(env, window)?
                .ok_or(jni::errors::Error::NullPtr("Activity.getWindow()"))
        })
    }

    fn content_container(&self, window: &GlobalRef) -> Result<GlobalRef, Error> {
        let window = window.clone();

        self.on_ui_thread(move |env| {
            let decor_view = env
                .call_method(&window, "getDecorView", "()Landroid/view/View;", &[])?
                .l()?;
            let content = env
                .call_method(
                    &decor_view,
                    "findViewById",
                    "(I)Landroid/view/View;",
                    &[JValue::Int(ANDROID_R_ID_CONTENT)],
                )?
                .l()?;

            global_or_none(env, content)?.ok_or(jni::errors::Error::NullPtr("android.R.id.content"))
        })
    }
}

fn view_size(env: &mut JNIEnv, view: &GlobalRef) -> jni::errors::Result<(i32, i32)> {
    let width = env.call_method(view, "getWidth", "()I", &[])?.i()?;
    let height = env.call_method(view, "getHeight", "()I", &[])?.i()?;

    Ok((width, height))
}
