//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Open store → Bind listener → Serve
//!
//! Shutdown:
//!     SIGINT received → Stop accepting → Drain connections
//!     → Final store flush → Exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
