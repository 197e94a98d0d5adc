//! The compact collection format, grouped by domain, query and attribute.

use crate::MetricKind;

/// A complete collection file.
///
/// # Example
///
/// ```rust
/// use jmx_migrate_types::{CollectDocument, MetricKind};
///
/// let document = CollectDocument::builder()
///     .domain("java.lang", "JVM_Memory", |d| {
///         d.bean("type=Memory", |b| b.attribute("HeapMemoryUsage.used", MetricKind::Gauge))
///     })
///     .build();
///
/// let domain = document.domain("java.lang").unwrap();
/// assert_eq!(domain.event_type, "JVM_Memory");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectDocument {
    pub collect: Vec<DomainDefinition>,
}

impl CollectDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for constructing documents.
    pub fn builder() -> CollectDocumentBuilder {
        CollectDocumentBuilder::new()
    }

    /// Number of domain records.
    pub fn len(&self) -> usize {
        self.collect.len()
    }

    /// Check if the document has no domain records.
    pub fn is_empty(&self) -> bool {
        self.collect.is_empty()
    }

    /// Find the first record for a domain.
    pub fn domain(&self, domain: &str) -> Option<&DomainDefinition> {
        self.collect.iter().find(|d| d.domain == domain)
    }

    /// Total attribute records across all domains and beans.
    pub fn attribute_count(&self) -> usize {
        self.collect.iter().map(|d| d.attribute_count()).sum()
    }
}

/// All beans collected under one management domain.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DomainDefinition {
    pub domain: String,
    /// Event type the domain's samples are reported under.
    pub event_type: String,
    pub beans: Vec<BeanDefinition>,
}

impl DomainDefinition {
    /// Find the first bean with the given query.
    pub fn bean(&self, query: &str) -> Option<&BeanDefinition> {
        self.beans.iter().find(|b| b.query == query)
    }

    /// Total attribute records across this domain's beans.
    pub fn attribute_count(&self) -> usize {
        self.beans.iter().map(|b| b.attributes.len()).sum()
    }
}

/// Attributes collected for one object-name query.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeanDefinition {
    /// The `key=value,...` part of the object name.
    pub query: String,
    pub attributes: Vec<AttributeDefinition>,
}

impl BeanDefinition {
    /// Find an attribute record by attribute name.
    pub fn attribute(&self, attr: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|a| a.attr == attr)
    }
}

/// A single collected attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeDefinition {
    /// MBean attribute name.
    pub attr: String,
    pub metric_type: MetricKind,
    /// Name the value is reported under.
    pub metric_name: String,
}

impl AttributeDefinition {
    /// Create an attribute reported under its own name.
    pub fn new(attr: impl Into<String>, metric_type: MetricKind) -> Self {
        let attr = attr.into();
        Self {
            metric_name: attr.clone(),
            attr,
            metric_type,
        }
    }
}

/// Builder for constructing [`CollectDocument`] instances.
#[derive(Debug, Default)]
pub struct CollectDocumentBuilder {
    collect: Vec<DomainDefinition>,
}

impl CollectDocumentBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a domain with beans built using a closure.
    pub fn domain<F>(
        mut self,
        domain: impl Into<String>,
        event_type: impl Into<String>,
        f: F,
    ) -> Self
    where
        F: FnOnce(DomainDefinitionBuilder) -> DomainDefinitionBuilder,
    {
        let beans = f(DomainDefinitionBuilder::default()).beans;
        self.collect.push(DomainDefinition {
            domain: domain.into(),
            event_type: event_type.into(),
            beans,
        });
        self
    }

    /// Add a pre-built domain record.
    pub fn domain_definition(mut self, definition: DomainDefinition) -> Self {
        self.collect.push(definition);
        self
    }

    /// Build the document.
    pub fn build(self) -> CollectDocument {
        CollectDocument {
            collect: self.collect,
        }
    }
}

/// Builder for the beans of one domain.
#[derive(Debug, Default)]
pub struct DomainDefinitionBuilder {
    beans: Vec<BeanDefinition>,
}

impl DomainDefinitionBuilder {
    /// Add a bean with attributes built using a closure.
    pub fn bean<F>(mut self, query: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(BeanDefinitionBuilder) -> BeanDefinitionBuilder,
    {
        let attributes = f(BeanDefinitionBuilder::default()).attributes;
        self.beans.push(BeanDefinition {
            query: query.into(),
            attributes,
        });
        self
    }
}

/// Builder for the attributes of one bean.
#[derive(Debug, Default)]
pub struct BeanDefinitionBuilder {
    attributes: Vec<AttributeDefinition>,
}

impl BeanDefinitionBuilder {
    /// Add an attribute reported under its own name.
    pub fn attribute(mut self, attr: impl Into<String>, metric_type: MetricKind) -> Self {
        self.attributes.push(AttributeDefinition::new(attr, metric_type));
        self
    }

    /// Add an attribute reported under a different metric name.
    pub fn renamed(
        mut self,
        attr: impl Into<String>,
        metric_type: MetricKind,
        metric_name: impl Into<String>,
    ) -> Self {
        self.attributes.push(AttributeDefinition {
            attr: attr.into(),
            metric_type,
            metric_name: metric_name.into(),
        });
        self
    }
}
