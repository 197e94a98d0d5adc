//! Verbatim conversion without merging.
//!
//! Each declaration becomes its own domain record and each metric group its
//! own bean, so repeated domains, queries and attributes are carried through
//! unchanged. Useful for diffing a migration against its source.

use jmx_migrate_types::{
    AttributeDefinition, BeanDefinition, CollectDocument, DomainDefinition, LegacyDocument,
    MetricKind,
};

use super::event_name::EventNameResolver;
use super::reduce::ObjectName;
use crate::error::Result;

/// Convert every declaration one-to-one.
pub fn expand(document: &LegacyDocument, resolver: &EventNameResolver) -> Result<CollectDocument> {
    let mut builder = CollectDocument::builder();

    for declaration in &document.jmx {
        let name = ObjectName::parse(&declaration.object_name)?;
        let beans = declaration
            .metrics
            .iter()
            .map(|group| {
                let kind = MetricKind::from_legacy(group.legacy_kind());
                BeanDefinition {
                    query: name.query.to_string(),
                    attributes: group
                        .attribute_names()
                        .map(|attr| AttributeDefinition::new(attr, kind))
                        .collect(),
                }
            })
            .collect();

        builder = builder.domain_definition(DomainDefinition {
            domain: name.domain.to_string(),
            event_type: resolver.resolve(document.app_name(), declaration.template(), name.query),
            beans,
        });
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jmx_migrate_types::JmxDeclaration;

    #[test]
    fn test_expand_keeps_repeats() {
        let document = LegacyDocument {
            name: Some("MyApp".to_string()),
            jmx: vec![
                JmxDeclaration::new("domain:type=Thing,name=A").metric("count", "simple"),
                JmxDeclaration::new("domain:type=Thing,name=A")
                    .root_metric_name("Thing_{name}")
                    .metric("count, errors", "monotonically_increasing")
                    .metric("latency", "simple"),
            ],
            ..Default::default()
        };

        let collect = expand(&document, &EventNameResolver::default()).unwrap();
        assert_eq!(collect.len(), 2);
        assert_eq!(collect.attribute_count(), 4);

        assert_eq!(collect.collect[0].event_type, "MyApp");
        assert_eq!(collect.collect[1].event_type, "MyApp_Thing_A");

        let second = &collect.collect[1];
        assert_eq!(second.beans.len(), 2);
        assert_eq!(second.beans[0].query, "type=Thing,name=A");
        assert_eq!(second.beans[0].attributes[0].metric_type, MetricKind::Delta);
        assert_eq!(second.beans[1].attributes[0].attr, "latency");
    }

    #[test]
    fn test_expand_rejects_missing_colon() {
        let document = LegacyDocument {
            jmx: vec![JmxDeclaration::new("nodomain").metric("x", "simple")],
            ..Default::default()
        };
        assert!(expand(&document, &EventNameResolver::default())
            .unwrap_err()
            .is_decode());
    }
}
