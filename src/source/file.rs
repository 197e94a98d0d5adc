//! File-based document source.

use std::fs;
use std::path::{Path, PathBuf};

use super::DocumentSource;
use crate::error::{MigrateError, Result};

/// Reads a legacy definition from a file.
///
/// Definition paths must be absolute unless the source is created with
/// [`FileSource::allow_relative`].
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    allow_relative: bool,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            allow_relative: false,
        }
    }

    /// Accept relative paths, resolved against the working directory.
    pub fn allow_relative(mut self, allow: bool) -> Self {
        self.allow_relative = allow;
        self
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileSource {
    fn read(&mut self) -> Result<Vec<u8>> {
        if !self.allow_relative && !self.path.is_absolute() {
            return Err(MigrateError::RelativePath(self.path.clone()));
        }
        fs::read(&self.path).map_err(|e| MigrateError::io(&self.path, e))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
