//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the process is up.
//!
//! # Tasks
//! - TTL Cleanup: sweeps expired entries out of the in-memory store

mod cleanup;

pub use cleanup::spawn_cleanup_task;
