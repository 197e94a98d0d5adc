//! Loading legacy Java agent definition files.

use jmx_migrate_types::LegacyDocument;

use crate::error::{MigrateError, Result};

/// Decode a legacy definition from raw bytes.
///
/// The whole document is rejected on any schema violation; nothing is
/// partially loaded.
pub fn load(bytes: &[u8]) -> Result<LegacyDocument> {
    serde_yaml::from_slice(bytes).map_err(|e| MigrateError::Decode(e.to_string()))
}

/// Decode a legacy definition from a string.
pub fn load_str(content: &str) -> Result<LegacyDocument> {
    load(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_full_document() {
        let yaml = r#"
name: Kafka Broker
version: 1.0
enabled: true
jmx:
  - object_name: kafka.server:type=BrokerTopicMetrics,name=MessagesInPerSec
    root_metric_name: "Broker/{name}"
    metrics:
      - attributes: Count
        type: monotonically_increasing
      - attributes: OneMinuteRate, FiveMinuteRate
        type: simple
"#;
        let document = load_str(yaml).unwrap();
        assert_eq!(document.app_name(), "Kafka Broker");
        assert_eq!(document.len(), 1);

        let declaration = &document.jmx[0];
        assert_eq!(
            declaration.object_name,
            "kafka.server:type=BrokerTopicMetrics,name=MessagesInPerSec"
        );
        assert_eq!(declaration.template(), "Broker/{name}");
        assert_eq!(declaration.metrics.len(), 2);
        let names: Vec<_> = declaration.metrics[1].attribute_names().collect();
        assert_eq!(names, vec!["OneMinuteRate", "FiveMinuteRate"]);
    }

    #[test]
    fn test_absent_name_is_empty() {
        let document = load_str("jmx: []\n").unwrap();
        assert_eq!(document.app_name(), "");
        assert!(document.is_empty());
    }

    #[test]
    fn test_null_template_is_empty() {
        let yaml = "jmx:\n  - object_name: \"java.lang:type=Memory\"\n    root_metric_name:\n";
        let document = load_str(yaml).unwrap();
        assert_eq!(document.jmx[0].template(), "");
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let yaml = "name: App\nextra: 3\njmx:\n  - object_name: \"a:b=c\"\n    note: hi\n";
        assert!(load_str(yaml).is_ok());
    }

    #[test]
    fn test_enabled_yes_is_accepted() {
        let document = load_str("name: App\nenabled: yes\njmx: []\n").unwrap();
        assert_eq!(document.enabled, Some(true));
    }

    #[test]
    fn test_malformed_yaml_is_decode_error() {
        let err = load_str("name: [unterminated\n").unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_missing_jmx_list_is_decode_error() {
        let err = load_str("name: App\nversion: 1.0\n").unwrap_err();
        assert!(matches!(err, MigrateError::Decode(_)));
    }

    #[test]
    fn test_bad_declaration_fails_whole_load() {
        let yaml = r#"
jmx:
  - object_name: "a:b=c"
  - root_metric_name: "no object name here"
"#;
        assert!(load_str(yaml).unwrap_err().is_decode());
    }

    #[test]
    fn test_non_utf8_is_decode_error() {
        assert!(load(b"jmx: \xc3\x28\n").unwrap_err().is_decode());
    }
}
