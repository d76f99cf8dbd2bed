//! Observability subsystem.
//!
//! Structured logging via `tracing`; every request carries an id for
//! correlation (see `http::request`).

pub mod logging;

pub use logging::init_logging;
