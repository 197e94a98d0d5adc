//! Metric kinds understood by the collection format.

use core::fmt;

/// How a collected attribute is reported downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MetricKind {
    /// Point-in-time value.
    #[default]
    Gauge,
    /// Monotonically increasing counter, reported as the change since the
    /// previous sample.
    Delta,
}

impl MetricKind {
    /// Map a legacy agent metric type onto a metric kind.
    ///
    /// `simple` becomes [`MetricKind::Gauge`] and `monotonically_increasing`
    /// becomes [`MetricKind::Delta`]. Anything else, including an empty
    /// string, falls back to [`MetricKind::Gauge`].
    pub fn from_legacy(legacy: &str) -> Self {
        match legacy.trim() {
            "simple" => MetricKind::Gauge,
            "monotonically_increasing" => MetricKind::Delta,
            _ => MetricKind::Gauge,
        }
    }

    /// The name used in collection files.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Delta => "delta",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
