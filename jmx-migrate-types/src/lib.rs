//! # jmx-migrate-types
//!
//! Data types for the two JMX metric definition formats handled by
//! jmx-migrate: the verbose per-object format written for the Java agent,
//! and the compact collection format grouped by domain, query and attribute.
//!
//! ## Features
//!
//! - `serde`: (de)serialization of both formats via serde
//!
//! ## Example
//!
//! ```rust
//! use jmx_migrate_types::{CollectDocument, MetricKind};
//!
//! let document = CollectDocument::builder()
//!     .domain("Catalina", "Tomcat_Pool_http", |d| {
//!         d.bean("type=ThreadPool,name=http", |b| {
//!             b.attribute("currentThreadCount", MetricKind::Gauge)
//!              .attribute("requestCount", MetricKind::Delta)
//!         })
//!     })
//!     .build();
//!
//! assert_eq!(document.len(), 1);
//! assert_eq!(document.attribute_count(), 2);
//! ```

mod collect;
mod kind;
mod legacy;

pub use collect::*;
pub use kind::*;
pub use legacy::*;
