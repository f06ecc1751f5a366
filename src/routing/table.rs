//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Scan handler groups in declaration order
//! - Compute `/{base}/{suffix}` templates and bind each to its group instance
//! - Resolve template collisions with the configured `DuplicatePolicy`
//! - Look up the entry for a request path
//!
//! # Design Decisions
//! - Immutable after `build()` (thread-safe without locks)
//! - O(1) exact-template lookup via HashMap
//! - O(n) scan of variable templates in registration order, first match wins

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::DuplicatePolicy;
use crate::dispatch::{Arguments, DispatchError};
use crate::routing::handler::{HandlerGroup, ParamSpec, Reply, Routes};
use crate::routing::template::{PathMatch, Template};
use crate::routing::RouteError;

type Invoker = Arc<dyn Fn(&Arguments) -> Result<Reply, DispatchError> + Send + Sync>;

/// A template bound to one handler of one group instance.
#[derive(Clone)]
pub struct RouteEntry {
    key: String,
    template: Template,
    group: String,
    handler: &'static str,
    params: Vec<ParamSpec>,
    invoke: Invoker,
}

impl RouteEntry {
    /// Template string this entry is keyed by.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Base tag of the owning group.
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn handler(&self) -> &'static str {
        self.handler
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Call the handler on its bound group instance.
    pub fn invoke(&self, args: &Arguments) -> Result<Reply, DispatchError> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("key", &self.key)
            .field("group", &self.group)
            .field("handler", &self.handler)
            .field("params", &self.params)
            .finish()
    }
}

/// Immutable mapping from template to route entry.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    exact: HashMap<String, usize>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::new(DuplicatePolicy::default())
    }

    /// Entries in registration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry keyed by exactly this template string.
    pub fn get(&self, template: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.key == template)
    }

    /// Find the entry matching a request path (query string removed).
    ///
    /// Exact templates take precedence over variable templates.
    pub fn lookup<'p>(&self, path: &'p str) -> Option<(&RouteEntry, PathMatch<'p>)> {
        if let Some(&index) = self.exact.get(path) {
            return Some((&self.entries[index], PathMatch { variable: None }));
        }
        self.entries
            .iter()
            .filter(|entry| entry.template.is_variable())
            .find_map(|entry| entry.template.matches(path).map(|found| (entry, found)))
    }
}

/// Collects handler groups into a [`RouteTable`].
pub struct RouteTableBuilder {
    policy: DuplicatePolicy,
    entries: Vec<RouteEntry>,
    error: Option<RouteError>,
}

impl RouteTableBuilder {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            entries: Vec::new(),
            error: None,
        }
    }

    /// Register every handler of a group, in declaration order.
    pub fn group<G: HandlerGroup>(mut self, group: G) -> Self {
        if self.error.is_some() {
            return self;
        }

        let group = Arc::new(group);
        let base = format!("/{}/", group.base_tag());

        let mut routes = Routes::new();
        group.register(&mut routes);

        for handler in routes.into_handlers() {
            let key = match handler.suffix {
                Some(suffix) => format!("{}{}", base, suffix),
                None => base.clone(),
            };
            let template = match Template::parse(&key) {
                Ok(template) => template,
                Err(e) => {
                    self.error = Some(e);
                    return self;
                }
            };

            let bound = Arc::clone(&group);
            let invoke_fn = handler.invoke;
            let entry = RouteEntry {
                key,
                template,
                group: group.base_tag().to_string(),
                handler: handler.name,
                params: handler.params,
                invoke: Arc::new(move |args: &Arguments| invoke_fn(&bound, args)),
            };

            if let Err(e) = self.insert(entry) {
                self.error = Some(e);
                return self;
            }
        }
        self
    }

    fn insert(&mut self, entry: RouteEntry) -> Result<(), RouteError> {
        let existing = match self.entries.iter().position(|e| e.key == entry.key) {
            Some(index) => index,
            None => {
                self.entries.push(entry);
                return Ok(());
            }
        };

        match self.policy {
            DuplicatePolicy::Reject => Err(RouteError::DuplicateTemplate {
                template: entry.key,
                existing: self.entries[existing].handler.to_string(),
                handler: entry.handler.to_string(),
            }),
            DuplicatePolicy::FirstWins => {
                tracing::warn!(
                    template = %entry.key,
                    kept = self.entries[existing].handler,
                    dropped = entry.handler,
                    "Duplicate template, keeping first handler"
                );
                Ok(())
            }
            DuplicatePolicy::LastWins => {
                tracing::warn!(
                    template = %entry.key,
                    kept = entry.handler,
                    dropped = self.entries[existing].handler,
                    "Duplicate template, keeping last handler"
                );
                self.entries[existing] = entry;
                Ok(())
            }
        }
    }

    pub fn build(self) -> Result<RouteTable, RouteError> {
        if let Some(e) = self.error {
            return Err(e);
        }

        let exact = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.template.is_variable())
            .map(|(index, entry)| (entry.key.clone(), index))
            .collect();

        tracing::debug!(routes = self.entries.len(), "Route table built");
        Ok(RouteTable {
            entries: self.entries,
            exact,
        })
    }
}
