//! Well-known directories of the app.

use std::{
    collections::HashMap,
    error::Error,
    path::PathBuf,
    sync::{Arc, Mutex},
};

/// Where bundled assets are found, as a URL prefix.
pub const RESOURCE_URL: &str = "file:///android_asset";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directory {
    /// User documents, private to the app.
    Document,
    /// Files the app keeps for itself.
    Library,
    /// Scratch space the system may clear at any time.
    Temporary,
    /// Assets bundled with the app. Not a file system path; see
    /// [`RESOURCE_URL`].
    Resource,
}

/// Looks up directories on the device. Only asked about directories that
/// live on the file system.
pub trait DirectorySource: Send + Sync {
    fn directory(&self, directory: Directory) -> Result<PathBuf, Box<dyn Error>>;
}

/// Directory lookups, cached after the first successful query.
#[derive(Clone)]
pub struct Paths {
    source: Arc<dyn DirectorySource>,
    cache: Arc<Mutex<HashMap<Directory, PathBuf>>>,
}

impl Paths {
    pub fn new(source: impl DirectorySource + 'static) -> Self {
        Self {
            source: Arc::new(source),
            cache: Arc::default(),
        }
    }

    pub fn directory(&self, directory: Directory) -> Result<PathBuf, Box<dyn Error>> {
        if directory == Directory::Resource {
            return Ok(PathBuf::from(RESOURCE_URL));
        }

        if let Some(path) = self.cache.lock().unwrap().get(&directory) {
            return Ok(path.clone());
        }

        let path = self.source.directory(directory)?;
        log::debug!("{directory:?} directory is {}", path.display());

        self.cache
            .lock()
            .unwrap()
            .insert(directory, path.clone());

        Ok(path)
    }
}
