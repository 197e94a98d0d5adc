//! # jmx-migrate
//!
//! Converts legacy Java agent JMX metric definitions into compact,
//! deduplicated JMX collection files.
//!
//! Legacy files carry one entry per object-name pattern, each with its own
//! attribute lists and metric types. The same domain and query often appear
//! in several entries. This crate merges them into one record per domain,
//! one bean per query and one entry per attribute, deriving an event type
//! name for every domain along the way.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          batch                              │
//! │  ┌─────────┐    ┌──────────────────────────┐    ┌─────────┐ │
//! │  │ source  │───▶│         convert          │───▶│ output  │ │
//! │  │ (input) │    │ legacy ▶ reduce ▶ emit   │    │ (file)  │ │
//! │  └─────────┘    └────────────┬─────────────┘    └─────────┘ │
//! │                              │                              │
//! │                              ▼                              │
//! │                         event_name                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Input abstraction ([`DocumentSource`] trait) for files and readers
//! - **[`convert`]**: Decoding, merging, naming and serializing ([`Migrator`])
//! - **[`output`]**: Output destinations ([`Output`])
//! - **[`batch`]**: Sequential, fail-fast conversion of several files
//! - **[`settings`]**: Layered [`Settings`]
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Writes /etc/newrelic/tomcat.yml.new
//! jmx-migrate /etc/newrelic/tomcat.yml
//!
//! # Several files, printed instead of written
//! jmx-migrate --stdout /etc/newrelic/tomcat.yml,/etc/newrelic/kafka.yml
//! ```
//!
//! ### As a library
//!
//! ```
//! use jmx_migrate::{Migrator, MetricKind, Settings};
//!
//! let legacy = r#"
//! name: MyApp
//! jmx:
//!   - object_name: "Catalina:type=ThreadPool,name=http"
//!     root_metric_name: "ThreadPool/{name}"
//!     metrics:
//!       - attributes: currentThreadCount
//!         type: simple
//! "#;
//!
//! let migration = Migrator::new(Settings::default()).migrate(legacy.as_bytes()).unwrap();
//! let domain = migration.document.domain("Catalina").unwrap();
//! assert_eq!(domain.event_type, "MyApp_ThreadPool:http");
//! assert_eq!(domain.beans[0].attributes[0].metric_type, MetricKind::Gauge);
//! ```

pub mod batch;
pub mod convert;
pub mod error;
pub mod output;
pub mod settings;
pub mod source;

// Re-export main types for convenience
pub use batch::{run_batch, BatchSummary, Converted};
pub use convert::{EventNameResolver, Migration, Migrator, Reduction, ReductionStats};
pub use error::{MigrateError, Result};
pub use output::Output;
pub use settings::{Ordering, Settings, Strategy};
pub use source::{DocumentSource, FileSource, ReaderSource};

pub use jmx_migrate_types::{
    AttributeDefinition, BeanDefinition, CollectDocument, DomainDefinition, JmxDeclaration,
    LegacyDocument, MetricGroup, MetricKind,
};
