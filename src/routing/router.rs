//! Route table lookup.
//!
//! Entries are tried in declaration order: the first entry whose method
//! matches exactly and whose template matches the path wins. Ordering
//! among overlapping templates is the responsibility of the declaring
//! code.

use std::future::Future;
use std::pin::Pin;

use axum::http::Method;
use axum::response::Response;

use crate::http::error::ApiError;
use crate::http::server::RequestContext;
use crate::routing::template::{PathParams, RouteTemplate};

/// Uniform future type returned by route handlers.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Response, ApiError>> + Send>>;

/// A route handler entry point.
pub type Handler = fn(RequestContext) -> HandlerFuture;

struct RouteEntry {
    method: Method,
    template: RouteTemplate,
    handler: Handler,
}

/// Ordered list of (method, template, handler) entries, immutable after
/// startup.
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

/// Result of a successful lookup.
pub struct RouteMatch<'p> {
    pub handler: Handler,
    pub params: PathParams,
    pub raw_query: &'p str,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder { entries: Vec::new() }
    }

    /// Find the first entry matching the method and request target.
    pub fn lookup<'p>(&self, method: &Method, target: &'p str) -> Option<RouteMatch<'p>> {
        self.entries
            .iter()
            .filter(|entry| entry.method == *method)
            .find_map(|entry| {
                entry.template.match_path(target).map(|(params, raw_query)| RouteMatch {
                    handler: entry.handler,
                    params,
                    raw_query,
                })
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct RouteTableBuilder {
    entries: Vec<RouteEntry>,
}

impl RouteTableBuilder {
    /// Add a route. Templates are static declarations, so a malformed one
    /// fails at startup.
    pub fn route(mut self, method: Method, template: &str, handler: Handler) -> Self {
        let template = RouteTemplate::parse(template).expect("static route template is well-formed");
        self.entries.push(RouteEntry { method, template, handler });
        self
    }

    pub fn build(self) -> RouteTable {
        RouteTable { entries: self.entries }
    }
}
