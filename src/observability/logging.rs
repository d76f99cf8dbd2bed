//! Structured logging initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// The configured level applies to this crate and the HTTP trace layer;
/// `RUST_LOG` overrides it entirely when set.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("task_tracker={level},tower_http={level}")));

    tracing_subscriber::registry().with(filter).with(tracing_subscriber::fmt::layer()).init();
}
