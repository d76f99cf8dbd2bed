//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum transport, catch-all dispatch)
//!     → request.rs (attach request id)
//!     → routing layer (match template, extract params/query)
//!     → handlers.rs (validate, call store, shape response)
//!     → error.rs (uniform error bodies)
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer, RequestContext};
