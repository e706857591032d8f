//! Database connectivity.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, config and health checks
//! - `config` - `core_config::FromEnv` support for the config types
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config};
//!
//! let client = connect_from_config(&MongoConfig::with_database("mongodb://localhost:27017", "shop")).await?;
//! let db = client.database("shop");
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};

#[cfg(feature = "mongodb")]
pub use common::is_duplicate_key_error;
