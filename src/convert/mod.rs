//! Conversion of legacy definitions into collection documents.
//!
//! ## Submodules
//!
//! - [`legacy`]: Decoding legacy definition files
//! - [`reduce`]: Merging declarations by domain, query and attribute
//! - [`event_name`]: Event type naming and template expansion
//! - [`emit`]: Flattening, ordering and serializing the result
//! - [`flat`]: One-to-one conversion without merging
//!
//! ## Data Flow
//!
//! ```text
//! legacy YAML bytes
//!        │
//!        ▼
//! legacy::load() ──▶ LegacyDocument
//!        │
//!        ▼
//! reduce::Reducer (EventNameResolver per new domain)
//!        │
//!        ▼
//! Reduction ──▶ emit::build() ──▶ CollectDocument ──▶ emit::encode()
//! ```

pub mod emit;
pub mod event_name;
pub mod flat;
pub mod legacy;
pub mod reduce;

pub use event_name::EventNameResolver;
pub use reduce::{AttributeEntry, DomainGroup, QueryGroup, Reducer, Reduction, ReductionStats};

use jmx_migrate_types::{CollectDocument, LegacyDocument};
use tracing::debug;

use crate::error::Result;
use crate::settings::{Ordering, Settings, Strategy};

/// The outcome of migrating one legacy document.
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    pub document: CollectDocument,
    pub stats: ReductionStats,
    /// Domains collecting more attributes than the configured limit.
    pub over_limit: Vec<String>,
}

/// Runs the conversion pipeline with a fixed set of settings.
///
/// # Example
///
/// ```
/// use jmx_migrate::{Migrator, Settings};
///
/// let legacy = r#"
/// name: MyApp
/// jmx:
///   - object_name: "domain:type=Thing,name=A"
///     metrics:
///       - attributes: count
///         type: simple
///   - object_name: "domain:type=Thing,name=A"
///     metrics:
///       - attributes: count, errors
///         type: monotonically_increasing
/// "#;
///
/// let migrator = Migrator::new(Settings::default());
/// let migration = migrator.migrate(legacy.as_bytes()).unwrap();
/// assert_eq!(migration.document.attribute_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Migrator {
    settings: Settings,
    resolver: EventNameResolver,
}

impl Migrator {
    pub fn new(settings: Settings) -> Self {
        let resolver = EventNameResolver::new(settings.default_event_type.clone());
        Self { settings, resolver }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Decode and convert a legacy definition.
    pub fn migrate(&self, bytes: &[u8]) -> Result<Migration> {
        let legacy = legacy::load(bytes)?;
        self.migrate_document(&legacy)
    }

    /// Convert an already decoded legacy definition.
    pub fn migrate_document(&self, legacy: &LegacyDocument) -> Result<Migration> {
        let (document, stats) = match self.settings.strategy {
            Strategy::Reduce => {
                let reduction = reduce::reduce(legacy, &self.resolver)?;
                (emit::build(&reduction, self.settings.ordering), reduction.stats())
            }
            Strategy::Flat => {
                let mut document = flat::expand(legacy, &self.resolver)?;
                if self.settings.ordering == Ordering::Sorted {
                    emit::sort(&mut document.collect);
                }
                let stats = ReductionStats {
                    declarations: legacy.len(),
                    domains: document.len(),
                    queries: document.collect.iter().map(|d| d.beans.len()).sum(),
                    attributes: document.attribute_count(),
                    ..Default::default()
                };
                (document, stats)
            }
        };

        debug!(
            "Converted {} declarations into {} domains, {} queries, {} attributes",
            stats.declarations, stats.domains, stats.queries, stats.attributes
        );

        let over_limit = emit::check_metric_limit(&document, self.settings.metric_limit);
        Ok(Migration {
            document,
            stats,
            over_limit,
        })
    }

    /// Decode, convert and serialize a legacy definition.
    ///
    /// Either a complete collection document is produced or an error is
    /// returned; there is no partial output.
    pub fn migrate_to_string(&self, bytes: &[u8]) -> Result<String> {
        let migration = self.migrate(bytes)?;
        emit::encode(&migration.document)
    }
}

impl Default for Migrator {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
