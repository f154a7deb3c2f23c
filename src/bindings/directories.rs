use super::JavaContext;
use crate::path::{Directory, DirectorySource};
use jni::objects::{JObject, JString, JValue};
use std::{error::Error, path::PathBuf};

/// Name passed to `Context.getDir()` for user documents. Android prefixes it
/// with `app_`.
const DOCUMENTS_DIR_NAME: &str = "documents";

/// `Context.MODE_PRIVATE`
const MODE_PRIVATE: i32 = 0;

/// App directories, as reported by the activity.
pub(crate) struct JniDirectories {
    java: JavaContext,
}

impl JniDirectories {
    pub(crate) fn new(java: JavaContext) -> Self {
        Self { java }
    }
}

impl DirectorySource for JniDirectories {
    fn directory(&self, directory: Directory) -> Result<PathBuf, Box<dyn Error>> {
        let activity = self.java.activity();

        let path = self.java.with_env(|env| {
            let file = match directory {
                Directory::Document => {
                    let name = env.new_string(DOCUMENTS_DIR_NAME)?;
                    env.call_method(
                        activity,
                        "getDir",
                        "(Ljava/lang/String;I)Ljava/io/File;",
                        &[JValue::Object(&name), JValue::Int(MODE_PRIVATE)],
                    )?
                    .l()?
                }
                Directory::Library => env
                    .call_method(activity, "getFilesDir", "()Ljava/io/File;", &[])?
                    .l()?,
                Directory::Temporary => env
                    .call_method(activity, "getCacheDir", "()Ljava/io/File;", &[])?
                    .l()?,
                Directory::Resource => JObject::null(),
            };

            if file.is_null() {
                return Ok(None);
            }

            let path = JString::from(
                env.call_method(&file, "getAbsolutePath", "()Ljava/lang/String;", &[])?
                    .l()?,
            );
            let path: String = env.get_string(&path)?.into();

            Ok(Some(PathBuf::from(path)))
        })?;

        path.ok_or_else(|| format!("no {directory:?} directory").into())
    }
}
