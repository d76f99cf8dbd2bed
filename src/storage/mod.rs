//! Storage subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     snapshot file (JSON: table name → array of tasks)
//!     → database.rs (load, or start empty and persist)
//!
//! Mutation (insert/update/delete):
//!     → in-memory table change under the write lock
//!     → full snapshot serialized and written before returning
//!
//! Shutdown:
//!     → final flush
//! ```
//!
//! # Design Decisions
//! - Whole-file snapshot on every mutation; no partial writes
//! - Write-through: callers observe persistence failures
//! - Insertion order preserved per table and used for selects

pub mod database;
pub mod task;

pub use database::{Database, StoreError};
pub use task::{Task, TaskDraft, TaskPatch};
