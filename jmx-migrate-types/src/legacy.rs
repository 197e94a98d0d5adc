//! The legacy Java agent definition format.
//!
//! One [`JmxDeclaration`] per monitored object-name pattern, each carrying
//! its own comma-separated attribute lists and legacy metric type strings.

/// A complete legacy definition file.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegacyDocument {
    /// Application name, used as the base of every event type.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,

    /// Informational only.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub version: Option<f64>,

    /// Informational only. Accepts YAML 1.1 spellings such as `yes` and `off`.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "lenient_bool",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub enabled: Option<bool>,

    /// Object declarations, in file order.
    pub jmx: Vec<JmxDeclaration>,
}

impl LegacyDocument {
    /// The application name, or an empty string when absent.
    pub fn app_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Number of object declarations.
    pub fn len(&self) -> usize {
        self.jmx.len()
    }

    /// Check if the document declares no objects.
    pub fn is_empty(&self) -> bool {
        self.jmx.is_empty()
    }
}

/// A single monitored object-name pattern.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JmxDeclaration {
    /// Pattern of the form `<domain>:<key=value,...>`.
    pub object_name: String,

    /// Optional event name template; may reference query keys as `{key}`.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub root_metric_name: Option<String>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub metrics: Vec<MetricGroup>,
}

impl JmxDeclaration {
    /// Create a declaration with no template and no metrics.
    pub fn new(object_name: impl Into<String>) -> Self {
        Self {
            object_name: object_name.into(),
            ..Default::default()
        }
    }

    /// Set the event name template.
    pub fn root_metric_name(mut self, template: impl Into<String>) -> Self {
        self.root_metric_name = Some(template.into());
        self
    }

    /// Append a metric group.
    pub fn metric(mut self, attributes: impl Into<String>, kind: impl Into<String>) -> Self {
        self.metrics.push(MetricGroup {
            attributes: attributes.into(),
            kind: Some(kind.into()),
        });
        self
    }

    /// The event name template, or an empty string when absent.
    pub fn template(&self) -> &str {
        self.root_metric_name.as_deref().unwrap_or_default()
    }
}

/// A list of attributes sharing one legacy metric type.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricGroup {
    /// Comma-separated attribute names, e.g. `"count, errors"`.
    pub attributes: String,

    /// Legacy metric type, e.g. `simple` or `monotonically_increasing`.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", default, skip_serializing_if = "Option::is_none")
    )]
    pub kind: Option<String>,
}

impl MetricGroup {
    /// Attribute names with surrounding whitespace removed.
    ///
    /// Empty names (from doubled or trailing commas) are skipped.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// The legacy metric type, or an empty string when absent.
    pub fn legacy_kind(&self) -> &str {
        self.kind.as_deref().unwrap_or_default()
    }
}

#[cfg(feature = "serde")]
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrText {
        Bool(bool),
        Text(String),
    }

    match Option::<BoolOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrText::Bool(value)) => Ok(Some(value)),
        Some(BoolOrText::Text(text)) => match text.to_ascii_lowercase().as_str() {
            "y" | "yes" | "on" | "true" => Ok(Some(true)),
            "n" | "no" | "off" | "false" => Ok(Some(false)),
            _ => Err(D::Error::invalid_value(
                Unexpected::Str(&text),
                &"a boolean such as true, yes or on",
            )),
        },
    }
}
