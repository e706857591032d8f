//! Utilities shared by the database backends

pub mod error;

pub use error::{DatabaseError, DatabaseResult};

#[cfg(feature = "mongodb")]
pub use error::is_duplicate_key_error;
