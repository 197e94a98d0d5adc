//! Output destinations for converted documents.

use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{MigrateError, Result};

/// Where a converted collection document is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Write to a file, replacing any previous content.
    File(PathBuf),

    /// Write to standard output.
    Stdout,
}

impl Output {
    /// Create a file output.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jmx_migrate::Output;
    ///
    /// let output = Output::file("/etc/jmx/tomcat-metrics.yml");
    /// ```
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Output::File(path.into())
    }

    /// The output written next to an input file, named `<input><suffix>`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jmx_migrate::Output;
    ///
    /// let output = Output::for_input("/etc/jmx/tomcat.yml", ".new");
    /// assert_eq!(output, Output::file("/etc/jmx/tomcat.yml.new"));
    /// ```
    pub fn for_input(input: impl AsRef<Path>, suffix: &str) -> Self {
        let mut name = OsString::from(input.as_ref().as_os_str());
        name.push(suffix);
        Output::File(PathBuf::from(name))
    }

    /// Write a converted document to this output.
    ///
    /// Files are written to a temporary sibling and renamed into place, so a
    /// failed write never leaves a truncated document behind.
    pub fn write(&self, contents: &str) -> Result<()> {
        match self {
            Output::File(path) => write_atomic(path, contents)?,
            Output::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(contents.as_bytes())
                    .and_then(|_| stdout.flush())
                    .map_err(|e| MigrateError::io("stdout", e))?;
            }
        }
        Ok(())
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(parent).map_err(|e| MigrateError::io(path, e))?;
    file.write_all(contents.as_bytes())
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| MigrateError::io(path, e))?;
    file.persist(path).map_err(|e| MigrateError::io(path, e.error))?;
    Ok(())
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::File(path) => write!(f, "{}", path.display()),
            Output::Stdout => f.write_str("stdout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_input_appends_suffix() {
        let output = Output::for_input("/opt/app/jmx.yaml", ".new");
        assert_eq!(output, Output::File(PathBuf::from("/opt/app/jmx.yaml.new")));
        assert_eq!(output.to_string(), "/opt/app/jmx.yaml.new");
        assert_eq!(Output::Stdout.to_string(), "stdout");
    }

    #[test]
    fn test_file_output_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.yml");
        std::fs::write(&path, "old content that is longer\n").unwrap();

        let output = Output::file(&path);
        output.write("collect: []\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "collect: []\n");
    }

    #[test]
    fn test_file_output_leaves_no_temporaries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.yml");

        Output::file(&path).write("collect: []\n").unwrap();
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.yml")]);
    }

    #[test]
    fn test_failed_write_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.yml");
        std::fs::create_dir(&path).unwrap();

        // Renaming a file over a directory fails after the temporary is written
        let err = Output::file(&path).write("collect: []\n").unwrap_err();
        assert!(matches!(err, MigrateError::Io { .. }));
        assert!(path.is_dir());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_file_output_missing_directory() {
        let output = Output::file("/nonexistent/dir/out.yml");
        assert!(matches!(
            output.write("collect: []\n"),
            Err(MigrateError::Io { .. })
        ));
    }
}
