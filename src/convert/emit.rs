//! Flattening a reduction into a collection document and serializing it.

use jmx_migrate_types::{AttributeDefinition, BeanDefinition, CollectDocument, DomainDefinition};
use tracing::warn;

use super::reduce::Reduction;
use crate::error::{MigrateError, Result};
use crate::settings::Ordering;

/// Build the collection document for a reduction.
///
/// With [`Ordering::Insertion`] records follow the order in which domains,
/// queries and attributes first appeared in the legacy file.
pub fn build(reduction: &Reduction, ordering: Ordering) -> CollectDocument {
    let mut collect: Vec<DomainDefinition> = reduction
        .domains()
        .map(|(domain, group)| DomainDefinition {
            domain: domain.clone(),
            event_type: group.event_type().to_string(),
            beans: group
                .queries()
                .map(|(query, attributes)| BeanDefinition {
                    query: query.clone(),
                    attributes: attributes
                        .iter()
                        .map(|(attr, entry)| AttributeDefinition {
                            attr: attr.clone(),
                            metric_type: entry.kind,
                            metric_name: entry.metric_name.clone(),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    if ordering == Ordering::Sorted {
        sort(&mut collect);
    }

    CollectDocument { collect }
}

/// Sort domains, beans and attributes lexicographically.
pub fn sort(collect: &mut [DomainDefinition]) {
    collect.sort_by(|a, b| a.domain.cmp(&b.domain));
    for domain in collect.iter_mut() {
        domain.beans.sort_by(|a, b| a.query.cmp(&b.query));
        for bean in domain.beans.iter_mut() {
            bean.attributes.sort_by(|a, b| a.attr.cmp(&b.attr));
        }
    }
}

/// Serialize a collection document to YAML.
pub fn encode(document: &CollectDocument) -> Result<String> {
    serde_yaml::to_string(document).map_err(|e| MigrateError::Encode(e.to_string()))
}

/// Warn about domains collecting more attributes than `limit`.
///
/// The live integration refuses to report such domains, so they are flagged
/// here but kept in the output. A limit of zero disables the check. Returns
/// the names of the offending domains.
pub fn check_metric_limit(document: &CollectDocument, limit: usize) -> Vec<String> {
    if limit == 0 {
        return Vec::new();
    }

    document
        .collect
        .iter()
        .filter(|domain| domain.attribute_count() > limit)
        .map(|domain| {
            warn!(
                "Domain '{}' has {} metrics, the current limit is {}. This domain will not be reported",
                domain.domain,
                domain.attribute_count(),
                limit
            );
            domain.domain.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::event_name::EventNameResolver;
    use crate::convert::reduce::reduce;
    use jmx_migrate_types::{JmxDeclaration, LegacyDocument, MetricKind};

    fn reduction() -> Reduction {
        let document = LegacyDocument {
            name: Some("MyApp".to_string()),
            jmx: vec![
                JmxDeclaration::new("zeta:type=B").metric("y, x", "simple"),
                JmxDeclaration::new("alpha:type=A")
                    .root_metric_name("Things")
                    .metric("count", "monotonically_increasing"),
                JmxDeclaration::new("zeta:type=A").metric("z", "simple"),
            ],
            ..Default::default()
        };
        reduce(&document, &EventNameResolver::default()).unwrap()
    }

    #[test]
    fn test_build_keeps_insertion_order() {
        let document = build(&reduction(), Ordering::Insertion);

        let domains: Vec<_> = document.collect.iter().map(|d| d.domain.as_str()).collect();
        assert_eq!(domains, vec!["zeta", "alpha"]);

        let zeta = document.domain("zeta").unwrap();
        let queries: Vec<_> = zeta.beans.iter().map(|b| b.query.as_str()).collect();
        assert_eq!(queries, vec!["type=B", "type=A"]);

        let attrs: Vec<_> = zeta.beans[0].attributes.iter().map(|a| a.attr.as_str()).collect();
        assert_eq!(attrs, vec!["y", "x"]);
    }

    #[test]
    fn test_build_sorted() {
        let document = build(&reduction(), Ordering::Sorted);

        let domains: Vec<_> = document.collect.iter().map(|d| d.domain.as_str()).collect();
        assert_eq!(domains, vec!["alpha", "zeta"]);

        let zeta = document.domain("zeta").unwrap();
        assert_eq!(zeta.beans[0].query, "type=A");
        let attrs: Vec<_> = zeta.beans[1].attributes.iter().map(|a| a.attr.as_str()).collect();
        assert_eq!(attrs, vec!["x", "y"]);
    }

    #[test]
    fn test_build_carries_event_type_and_kind() {
        let document = build(&reduction(), Ordering::Insertion);
        let alpha = document.domain("alpha").unwrap();
        assert_eq!(alpha.event_type, "MyApp_Things");
        assert_eq!(document.domain("zeta").unwrap().event_type, "MyApp");

        let count = alpha.bean("type=A").unwrap().attribute("count").unwrap();
        assert_eq!(count.metric_type, MetricKind::Delta);
        assert_eq!(count.metric_name, "count");
    }

    #[test]
    fn test_encode_is_reproducible() {
        let first = encode(&build(&reduction(), Ordering::Insertion)).unwrap();
        let second = encode(&build(&reduction(), Ordering::Insertion)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_encode_shape() {
        let document = CollectDocument::builder()
            .domain("domain", "MyApp", |d| {
                d.bean("type=Thing", |b| b.attribute("count", MetricKind::Gauge))
            })
            .build();

        let yaml = encode(&document).unwrap();
        let expected = "\
collect:
- domain: domain
  event_type: MyApp
  beans:
  - query: type=Thing
    attributes:
    - attr: count
      metric_type: gauge
      metric_name: count
";
        assert_eq!(yaml, expected);
    }

    #[test]
    fn test_encode_empty_document() {
        let yaml = encode(&CollectDocument::new()).unwrap();
        assert_eq!(yaml, "collect: []\n");
    }

    #[test]
    fn test_check_metric_limit() {
        let document = build(&reduction(), Ordering::Insertion);
        assert_eq!(check_metric_limit(&document, 2), vec!["zeta".to_string()]);
        assert!(check_metric_limit(&document, 3).is_empty());
        assert!(check_metric_limit(&document, 0).is_empty());
    }
}
