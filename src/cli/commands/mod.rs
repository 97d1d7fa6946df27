//! CLI command implementations

pub mod ping;
pub mod validate;

/// Exit code for success
pub const EXIT_OK: i32 = 0;

/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;

/// Exit code for connection errors
pub const EXIT_CONNECTION: i32 = 3;
