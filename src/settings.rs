//! Migration settings.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional settings file, then `JMX_MIGRATE_*` environment variables.
//! Command-line flags are applied on top by the binary.
//!
//! ```yaml
//! default_event_type: JMXSample
//! output_suffix: .new
//! strategy: reduce      # or: flat
//! ordering: insertion   # or: sorted
//! metric_limit: 200
//! allow_relative_paths: false
//! ```

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{MigrateError, Result};

/// Event type base used when a legacy file has no application name.
pub const DEFAULT_EVENT_TYPE: &str = "JMXSample";

/// Suffix appended to an input path to name its converted output.
pub const DEFAULT_OUTPUT_SUFFIX: &str = ".new";

/// Per-domain attribute count above which a warning is logged.
pub const DEFAULT_METRIC_LIMIT: usize = 200;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "JMX_MIGRATE";

/// How declarations are turned into collection records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Merge declarations by domain, query and attribute.
    #[default]
    Reduce,
    /// One record per declaration and metric group, without merging.
    Flat,
}

/// Order of records in the emitted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ordering {
    /// Order of first appearance in the legacy file.
    #[default]
    Insertion,
    /// Lexicographic by domain, then query, then attribute.
    Sorted,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_event_type: String,
    pub output_suffix: String,
    pub strategy: Strategy,
    pub ordering: Ordering,
    /// Zero disables the check.
    pub metric_limit: usize,
    pub allow_relative_paths: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_event_type: DEFAULT_EVENT_TYPE.to_string(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            strategy: Strategy::default(),
            ordering: Ordering::default(),
            metric_limit: DEFAULT_METRIC_LIMIT,
            allow_relative_paths: false,
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the environment.
    ///
    /// A missing file is an error only when a path was given explicitly.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_layers(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_layers(path: Option<&Path>, environment: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(environment.try_parsing(true))
            .build()?;

        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject combinations that cannot produce a safe conversion.
    pub fn validate(&self) -> Result<()> {
        if self.output_suffix.is_empty() {
            return Err(MigrateError::Config(
                "output_suffix must not be empty; outputs would replace their inputs".to_string(),
            ));
        }
        Ok(())
    }
}
