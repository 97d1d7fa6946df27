//! Domain types for dbprovider.
//!
//! The domain layer provides the error hierarchy ([`ProviderError`],
//! [`DatabaseError`], [`ContainerError`]) and the [`Result`] alias used by
//! every fallible operation in the crate.
//!
//! ```rust
//! use dbprovider::domain::{DatabaseError, ProviderError, Result};
//!
//! fn example() -> Result<()> {
//!     Err(DatabaseError::PoolClosed.into())
//! }
//!
//! assert!(matches!(example(), Err(ProviderError::Database(_))));
//! ```

pub mod errors;
pub mod result;

pub use errors::{ContainerError, DatabaseError, ProviderError};
pub use result::Result;
