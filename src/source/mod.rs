//! Input abstraction for legacy definition documents.
//!
//! A source hands the raw bytes of one legacy definition to the migrator.
//! Files are the usual case; any reader (stdin, a socket, a buffer) works
//! through [`ReaderSource`].

mod file;
mod reader;

pub use file::FileSource;
pub use reader::ReaderSource;

use std::fmt::Debug;

use crate::error::Result;

/// Trait for reading a legacy definition document.
///
/// # Example
///
/// ```
/// use jmx_migrate::{DocumentSource, ReaderSource};
///
/// let mut source = ReaderSource::new(&b"jmx: []\n"[..], "inline");
/// let bytes = source.read().unwrap();
/// assert_eq!(source.description(), "inline");
/// assert!(!bytes.is_empty());
/// ```
pub trait DocumentSource: Debug {
    /// Read the complete document.
    fn read(&mut self) -> Result<Vec<u8>>;

    /// Returns a human-readable description of the source.
    ///
    /// Used in log lines and error messages.
    fn description(&self) -> &str;
}
