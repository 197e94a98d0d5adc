//! Event type naming.
//!
//! Every domain in a collection file is reported under an event type derived
//! from the legacy application name and the declaration's
//! `root_metric_name` template. Templates may reference keys of the object
//! name query as `{key}`:
//!
//! ```
//! use jmx_migrate::convert::event_name::EventNameResolver;
//!
//! let resolver = EventNameResolver::default();
//! let event_type = resolver.resolve("Tomcat", "ThreadPool/{name}", "type=ThreadPool,name=http");
//! assert_eq!(event_type, "Tomcat_ThreadPool:http");
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::settings::DEFAULT_EVENT_TYPE;

/// Joins the application name and the expanded template.
const SEPARATOR: &str = "_";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"));

/// Derives event type names for domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventNameResolver {
    default_event_type: String,
}

impl EventNameResolver {
    /// Create a resolver that falls back to `default_event_type` when the
    /// legacy file has no application name.
    pub fn new(default_event_type: impl Into<String>) -> Self {
        Self {
            default_event_type: default_event_type.into(),
        }
    }

    /// The fallback application name.
    pub fn default_event_type(&self) -> &str {
        &self.default_event_type
    }

    /// Resolve the event type for a declaration.
    ///
    /// Placeholders without a matching query key are left as written.
    pub fn resolve(&self, app_name: &str, template: &str, query: &str) -> String {
        let app_name = if app_name.is_empty() {
            self.default_event_type.as_str()
        } else {
            app_name
        };

        if template.is_empty() {
            return sanitize(app_name);
        }

        let expanded = expand_template(template, query);
        sanitize(&format!("{app_name}{SEPARATOR}{expanded}"))
    }
}

impl Default for EventNameResolver {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_TYPE)
    }
}

/// Make a name acceptable as an event type.
///
/// Spaces become `_`, then `/` becomes `:`.
pub fn sanitize(name: &str) -> String {
    let name = name.replace(' ', "_");
    name.replace('/', ":")
}

/// Split an object name query into its key/value pairs.
///
/// Pairs split on their first `=`; entries without one carry no value and
/// are skipped.
pub fn parse_query(query: &str) -> HashMap<&str, &str> {
    query
        .split(',')
        .filter_map(|pair| pair.split_once('='))
        .collect()
}

/// Substitute `{key}` placeholders with values from the query.
pub fn expand_template(template: &str, query: &str) -> String {
    if !PLACEHOLDER_RE.is_match(template) {
        return template.to_string();
    }

    let values = parse_query(query);
    let mut expanded = template.to_string();
    for captures in PLACEHOLDER_RE.captures_iter(template) {
        if let Some(value) = values.get(&captures[1]) {
            expanded = expanded.replace(&captures[0], value);
        }
    }
    expanded
}
