//! Sequential conversion of several legacy definition files.
//!
//! Files are converted one at a time in the order given. The first failure
//! stops the batch; files already written are left in place.

use std::path::Path;

use tracing::info;

use crate::convert::{emit, Migrator, ReductionStats};
use crate::error::{MigrateError, Result};
use crate::output::Output;
use crate::settings::Settings;
use crate::source::{DocumentSource, FileSource, ReaderSource};

/// Path that selects standard input, paired with standard output.
pub const STDIN_PATH: &str = "-";

/// One successfully converted document.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    /// Description of the source the document came from.
    pub input: String,
    pub output: Output,
    pub stats: ReductionStats,
    pub over_limit: Vec<String>,
}

/// Result of a completed batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub converted: Vec<Converted>,
}

impl BatchSummary {
    pub fn len(&self) -> usize {
        self.converted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converted.is_empty()
    }

    /// Total attributes written across all outputs.
    pub fn total_attributes(&self) -> usize {
        self.converted.iter().map(|c| c.stats.attributes).sum()
    }
}

/// Convert a single document from `source` and write it to `output`.
///
/// Nothing is written unless the whole document converts.
pub fn convert_one(
    source: &mut dyn DocumentSource,
    output: &Output,
    migrator: &Migrator,
) -> Result<Converted> {
    info!("Converting {} to collection format", source.description());

    let bytes = source.read()?;
    let migration = migrator.migrate(&bytes)?;
    let yaml = emit::encode(&migration.document)?;
    output.write(&yaml)?;

    info!(
        "New file: {} ({} domains, {} attributes)",
        output, migration.stats.domains, migration.stats.attributes
    );

    Ok(Converted {
        input: source.description().to_string(),
        output: output.clone(),
        stats: migration.stats,
        over_limit: migration.over_limit,
    })
}

/// Convert each path in turn, stopping at the first error.
///
/// Outputs go next to their inputs (see [`Output::for_input`]) unless
/// `to_stdout` is set. The path `-` reads standard input and always writes
/// to standard output. A file is never converted onto itself, so an empty
/// suffix fails with [`MigrateError::OverwritesInput`].
pub fn run_batch<P: AsRef<Path>>(
    paths: &[P],
    settings: &Settings,
    to_stdout: bool,
) -> Result<BatchSummary> {
    let migrator = Migrator::new(settings.clone());
    let mut summary = BatchSummary::default();

    for path in paths {
        let path = path.as_ref();
        let converted = if path == Path::new(STDIN_PATH) {
            convert_one(&mut ReaderSource::stdin(), &Output::Stdout, &migrator)?
        } else {
            let mut source = FileSource::new(path).allow_relative(settings.allow_relative_paths);
            let output = if to_stdout {
                Output::Stdout
            } else {
                Output::for_input(path, &settings.output_suffix)
            };
            if output == Output::file(path) {
                return Err(MigrateError::OverwritesInput(path.to_path_buf()));
            }
            convert_one(&mut source, &output, &migrator)?
        };
        summary.converted.push(converted);
    }

    Ok(summary)
}
