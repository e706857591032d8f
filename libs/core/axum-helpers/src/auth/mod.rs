//! Token authentication.
//!
//! - [`TokenService`] signs and verifies HS256 tokens carrying [`AuthClaims`]
//! - [`require_admin`] guards routes that need an administrator token
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtConfig, TokenService, require_admin};
//! use core_config::FromEnv;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env()?);
//! let token = tokens.issue(user.id, user.is_admin)?;
//! ```

pub mod config;
pub mod middleware;
pub mod token;

pub use config::{DEFAULT_TOKEN_TTL_SECS, JwtConfig};
pub use middleware::{AUTH_TOKEN_HEADER, require_admin};
pub use token::{AuthClaims, TokenError, TokenService};
