//! Route matching, binding and invocation.

use std::sync::Arc;

use crate::config::RouteMissPolicy;
use crate::convert::ToDocument;
use crate::dispatch::params::{bind, Arguments};
use crate::dispatch::DispatchError;
use crate::document::Document;
use crate::observability::metrics;
use crate::routing::RouteTable;

/// Dispatches request paths against a route table built once at startup.
///
/// Cheap to clone; clones share the same table.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
    route_miss: RouteMissPolicy,
}

impl Dispatcher {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table: Arc::new(table),
            route_miss: RouteMissPolicy::default(),
        }
    }

    /// Choose what a request matching no template yields.
    pub fn with_route_miss(mut self, policy: RouteMissPolicy) -> Self {
        self.route_miss = policy;
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn route_miss(&self) -> RouteMissPolicy {
        self.route_miss
    }

    /// Dispatch a raw request path, query string included.
    pub fn dispatch(&self, request_path: &str) -> Result<Document, DispatchError> {
        let (path, query) = match request_path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (request_path, None),
        };

        let (entry, found) = match self.table.lookup(path) {
            Some(matched) => matched,
            None => {
                tracing::warn!(path = %path, policy = ?self.route_miss, "No route matched");
                metrics::record_route_miss();
                return match self.route_miss {
                    RouteMissPolicy::Null => Ok(Document::Null),
                    RouteMissPolicy::NotFound => Err(DispatchError::NotFound {
                        path: path.to_string(),
                    }),
                };
            }
        };

        tracing::debug!(
            path = %path,
            template = %entry.key(),
            handler = entry.handler(),
            "Route matched"
        );

        let args = if entry.params().is_empty() {
            Arguments::default()
        } else {
            bind(entry.params(), found.variable, query)?
        };

        let reply = entry.invoke(&args)?;
        Ok(reply.to_document()?)
    }
}
