//! PostgreSQL integration
//!
//! The connection handle opened from settings and the raw-statement adapter
//! built on top of it.

pub mod client;
pub mod raw;

pub use client::{ConnectionHandle, PING_TIMEOUT};
pub use raw::RawExecutor;
