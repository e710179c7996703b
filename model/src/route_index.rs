use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::{GeometryStore, RoutePath};

/// Raw property names that can denote "route id" across heterogeneous exports.
pub const ROUTE_ID_FIELDS: &[&str] = &[
    "route_id",
    "ROUTE_ID",
    "routeId",
    "route",
    "ROUTE",
    "line_id",
    "LINE_ID",
    "line",
    "LINE",
    "ref",
    "route_short_name",
];

/// Maps a normalized route identifier to its line geometry. Built in full from the
/// geometry store and swapped in atomically; never mutated in place.
pub struct RouteIndex {
    paths: HashMap<String, Arc<RoutePath>>,
}

impl RouteIndex {
    /// Registers every route-line feature under every identifier candidate found in its
    /// properties. If two features claim the same identifier, the later one wins.
    pub fn build(store: &GeometryStore) -> Self {
        let mut paths = HashMap::new();
        for layer in store.route_line_layers() {
            for feature in &layer.features {
                let path = match RoutePath::from_geometry(&feature.geometry) {
                    Some(path) => Arc::new(path),
                    None => continue,
                };
                for field in ROUTE_ID_FIELDS {
                    if let Some(id) = feature.properties.get(*field).and_then(normalize) {
                        if paths.insert(id.clone(), path.clone()).is_some() {
                            warn!(
                                "Layer {} registers route {} more than once; keeping the \
                                 later geometry",
                                layer.name, id
                            );
                        }
                    }
                }
            }
        }
        Self { paths }
    }

    /// Strict string-keyed lookup. A miss just means the trip can't be rendered this
    /// frame; fuzzy matching on messy exports isn't worth the false positives.
    pub fn lookup(&self, route_id: &str) -> Option<&Arc<RoutePath>> {
        self.paths.get(route_id)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// String form of an identifier candidate. Numeric and string forms of the same id must
/// collide, so integers format without a decimal point.
fn normalize(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else {
                Some(n.to_string())
            }
        }
        _ => None,
    }
}
