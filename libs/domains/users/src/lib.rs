//! Users Domain
//!
//! Account creation and authentication.
//!
//! # Features
//!
//! - Signup with profile, address and credentials
//! - Password hashing with Argon2 (on the blocking pool)
//! - Login issuing a token that carries `{userId, isAdmin}`
//! - Administrator bootstrap from a configured email list
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← POST /signup, POST /login
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Uniqueness, hashing, token issuance
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use axum_helpers::{JwtConfig, TokenService};
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let tokens = TokenService::new(&JwtConfig::new("a-secret-of-at-least-thirty-two-chars")?);
//! let service = UserService::new(InMemoryUserRepository::new(), tokens)
//!     .with_admin_emails(["root@example.com"]);
//!
//! let router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod password;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{Address, AuthResponse, LoginRequest, SignupRequest, User, UserResponse};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
