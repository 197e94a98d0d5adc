//! Reader-based document source.

use std::io::Read;

use super::DocumentSource;
use crate::error::{MigrateError, Result};

/// Reads a legacy definition from any [`Read`] implementation, such as stdin.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    description: String,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R, description: impl Into<String>) -> Self {
        Self {
            reader,
            description: description.into(),
        }
    }
}

impl ReaderSource<std::io::Stdin> {
    /// Read from the process's standard input.
    pub fn stdin() -> Self {
        Self::new(std::io::stdin(), "stdin")
    }
}

impl<R: Read + std::fmt::Debug> DocumentSource for ReaderSource<R> {
    fn read(&mut self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.reader
            .read_to_end(&mut bytes)
            .map_err(|e| MigrateError::io(&self.description, e))?;
        Ok(bytes)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_source_reads_all() {
        let mut source = ReaderSource::new(Cursor::new(b"name: App\njmx: []\n".to_vec()), "buffer");
        assert_eq!(source.read().unwrap(), b"name: App\njmx: []\n");
        assert_eq!(source.description(), "buffer");
    }
}
