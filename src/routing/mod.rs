//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path?query)
//!     → router.rs (ordered route table, first match wins)
//!     → template.rs (segment-wise match, extract named params + raw query)
//!     → query.rs (decode raw query into key/value map)
//!     → Return: matched handler with params/query, or NoMatch
//!
//! Route compilation (at startup):
//!     "/tasks/:id"
//!     → template.rs (parse into literal/param segment tokens)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Templates compiled at startup, immutable at runtime
//! - No regex: a parsed segment list is matched directly
//! - First match in declaration order wins; no specificity reordering

pub mod query;
pub mod router;
pub mod template;

pub use query::parse_query;
pub use router::{Handler, HandlerFuture, RouteMatch, RouteTable};
pub use template::{RouteTemplate, TemplateError};
