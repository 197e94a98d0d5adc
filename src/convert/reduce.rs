//! Merging legacy declarations by domain, query and attribute.
//!
//! Declarations are folded, in file order, into a nested model keyed by
//! domain, then query, then attribute name. The first declaration to mention
//! a domain fixes its event type, and the first to mention an attribute
//! fixes its metric kind; later declarations only add what is missing.

use indexmap::map::Entry;
use indexmap::IndexMap;
use jmx_migrate_types::{JmxDeclaration, LegacyDocument, MetricKind};
use tracing::debug;

use super::event_name::EventNameResolver;
use crate::error::{MigrateError, Result};

/// An object name split into its domain and query parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectName<'a> {
    pub domain: &'a str,
    pub query: &'a str,
}

impl<'a> ObjectName<'a> {
    /// Split on the first `:`.
    pub fn parse(object_name: &'a str) -> Result<Self> {
        let (domain, query) = object_name
            .split_once(':')
            .ok_or_else(|| MigrateError::MissingDomain {
                object_name: object_name.to_string(),
            })?;
        Ok(Self { domain, query })
    }
}

/// A collected attribute after merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeEntry {
    pub kind: MetricKind,
    pub metric_name: String,
}

/// The attributes collected for one query within a domain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryGroup {
    attributes: IndexMap<String, AttributeEntry>,
}

impl QueryGroup {
    /// Record an attribute unless it is already present.
    ///
    /// Returns `false` when the attribute existed; its entry is left as it was.
    pub fn insert_if_absent(&mut self, attr: &str, kind: MetricKind) -> bool {
        if self.attributes.contains_key(attr) {
            return false;
        }
        self.attributes.insert(
            attr.to_string(),
            AttributeEntry {
                kind,
                metric_name: attr.to_string(),
            },
        );
        true
    }

    pub fn get(&self, attr: &str) -> Option<&AttributeEntry> {
        self.attributes.get(attr)
    }

    /// Attributes in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeEntry)> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Everything collected under one management domain.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainGroup {
    event_type: String,
    queries: IndexMap<String, QueryGroup>,
}

impl DomainGroup {
    fn new(event_type: String) -> Self {
        Self {
            event_type,
            queries: IndexMap::new(),
        }
    }

    /// The event type fixed by the first declaration for this domain.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn query(&self, query: &str) -> Option<&QueryGroup> {
        self.queries.get(query)
    }

    /// Queries in order of first appearance.
    pub fn queries(&self) -> impl Iterator<Item = (&String, &QueryGroup)> {
        self.queries.iter()
    }

    /// Total attributes across all queries.
    pub fn attribute_count(&self) -> usize {
        self.queries.values().map(QueryGroup::len).sum()
    }
}

/// Counters describing a reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReductionStats {
    /// Declarations read from the legacy file.
    pub declarations: usize,
    pub domains: usize,
    pub queries: usize,
    pub attributes: usize,
    /// Attribute mentions dropped because the attribute was already recorded.
    pub duplicate_attributes: usize,
    /// Declarations whose template would have given their domain a different
    /// event type than the one already fixed.
    pub event_type_conflicts: usize,
}

/// The merged model produced by a [`Reducer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    domains: IndexMap<String, DomainGroup>,
    stats: ReductionStats,
}

impl Reduction {
    pub fn domain(&self, domain: &str) -> Option<&DomainGroup> {
        self.domains.get(domain)
    }

    /// Domains in order of first appearance.
    pub fn domains(&self) -> impl Iterator<Item = (&String, &DomainGroup)> {
        self.domains.iter()
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn stats(&self) -> ReductionStats {
        self.stats
    }
}

/// Single-pass builder for a [`Reduction`].
///
/// A reducer belongs to one migration; feed it declarations in file order
/// with [`Reducer::push`] and take the result with [`Reducer::finish`].
#[derive(Debug)]
pub struct Reducer<'r> {
    app_name: String,
    resolver: &'r EventNameResolver,
    domains: IndexMap<String, DomainGroup>,
    stats: ReductionStats,
}

impl<'r> Reducer<'r> {
    pub fn new(app_name: impl Into<String>, resolver: &'r EventNameResolver) -> Self {
        Self {
            app_name: app_name.into(),
            resolver,
            domains: IndexMap::new(),
            stats: ReductionStats::default(),
        }
    }

    /// Merge one declaration into the model.
    pub fn push(&mut self, declaration: &JmxDeclaration) -> Result<()> {
        let name = ObjectName::parse(&declaration.object_name)?;
        self.stats.declarations += 1;

        let domain = match self.domains.entry(name.domain.to_string()) {
            Entry::Occupied(entry) => {
                let domain = entry.into_mut();
                let event_type = self
                    .resolver
                    .resolve(&self.app_name, declaration.template(), name.query);
                if event_type != domain.event_type {
                    self.stats.event_type_conflicts += 1;
                    debug!(
                        "Keeping event type {} for domain {}; ignoring {} from {}",
                        domain.event_type, name.domain, event_type, declaration.object_name
                    );
                }
                domain
            }
            Entry::Vacant(entry) => {
                let event_type = self
                    .resolver
                    .resolve(&self.app_name, declaration.template(), name.query);
                entry.insert(DomainGroup::new(event_type))
            }
        };

        let query = domain.queries.entry(name.query.to_string()).or_default();

        for group in &declaration.metrics {
            let kind = MetricKind::from_legacy(group.legacy_kind());
            for attr in group.attribute_names() {
                if !query.insert_if_absent(attr, kind) {
                    self.stats.duplicate_attributes += 1;
                    debug!(
                        "Attribute {} already collected for {}; ignoring repeat",
                        attr, declaration.object_name
                    );
                }
            }
        }

        Ok(())
    }

    /// Finish the pass and return the merged model.
    pub fn finish(self) -> Reduction {
        let mut stats = self.stats;
        stats.domains = self.domains.len();
        stats.queries = self.domains.values().map(|d| d.queries.len()).sum();
        stats.attributes = self.domains.values().map(DomainGroup::attribute_count).sum();

        Reduction {
            domains: self.domains,
            stats,
        }
    }
}

/// Reduce every declaration of a legacy document.
pub fn reduce(document: &LegacyDocument, resolver: &EventNameResolver) -> Result<Reduction> {
    let mut reducer = Reducer::new(document.app_name(), resolver);
    for declaration in &document.jmx {
        reducer.push(declaration)?;
    }
    Ok(reducer.finish())
}
