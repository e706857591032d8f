use axum_helpers::FieldOrder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Postal address. All four parts are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub city: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub postal_code: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub street_number: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub street_name: String,
}

/// User entity as stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub address: Address,
    /// Always lower-cased; unique across users
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new account from a validated signup. The password must already be hashed.
    pub fn new(input: SignupRequest, password_hash: String, is_admin: bool) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            surname: input.surname,
            age: input.age,
            address: input.address,
            email: normalize_email(&input.email),
            password_hash,
            is_admin,
            created_at: Utc::now(),
        }
    }
}

/// Emails are compared and stored trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Public view of a user (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub address: Address,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            age: user.age,
            address: user.address,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

/// DTO for account creation
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub surname: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub age: i32,
    #[validate(nested)]
    pub address: Address,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 7, message = "must be at least 7 characters long"))]
    #[schema(min_length = 7)]
    pub password: String,
}

impl FieldOrder for SignupRequest {
    const FIELD_ORDER: &'static [&'static str] = &[
        "name",
        "surname",
        "age",
        "address.city",
        "address.postalCode",
        "address.streetNumber",
        "address.streetName",
        "email",
        "password",
    ];
}

/// DTO for login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

impl FieldOrder for LoginRequest {
    const FIELD_ORDER: &'static [&'static str] = &["email", "password"];
}

/// Returned by signup and login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    /// Signed token for the `x-auth-token` header
    pub token: String,
    pub user: UserResponse,
}
