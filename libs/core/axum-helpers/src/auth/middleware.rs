use super::token::TokenService;
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// Header carrying the signed token.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

pub const MSG_TOKEN_MISSING: &str = "Access denied. Token not provided.";
pub const MSG_TOKEN_INVALID: &str = "Invalid token.";
pub const MSG_ADMIN_REQUIRED: &str = "Access denied. Admin privileges required.";

/// `Ok(None)` when no token was sent, `Err` when the header is not readable text.
fn extract_token(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    let Some(value) = headers.get(AUTH_TOKEN_HEADER) else {
        return Ok(None);
    };
    let token = value.to_str().map_err(|_| {
        tracing::debug!("Unreadable {} header", AUTH_TOKEN_HEADER);
        AppError::Unauthorized(MSG_TOKEN_INVALID.to_string())
    })?;

    Ok(Some(token.trim()).filter(|t| !t.is_empty()))
}

/// Admin gate.
///
/// Reads the `x-auth-token` header, verifies it and admits the request only
/// when the claims mark the bearer as an administrator. The decoded
/// [`AuthClaims`](super::AuthClaims) are inserted into request extensions.
/// Every other outcome ends the request with `401`.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware::from_fn_with_state, routing::post, Router};
/// use axum_helpers::{TokenService, require_admin};
///
/// let admin_only = post(create_product)
///     .route_layer(from_fn_with_state(tokens.clone(), require_admin));
/// ```
pub async fn require_admin(
    State(tokens): State<TokenService>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_token(&headers)? else {
        tracing::debug!("No token in {} header", AUTH_TOKEN_HEADER);
        return Err(AppError::Unauthorized(MSG_TOKEN_MISSING.to_string()));
    };

    let claims = tokens.verify(token).map_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
        AppError::Unauthorized(MSG_TOKEN_INVALID.to_string())
    })?;

    if !claims.is_admin {
        tracing::info!(user_id = %claims.user_id, "Non-admin token refused");
        return Err(AppError::Unauthorized(MSG_ADMIN_REQUIRED.to_string()));
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthClaims, JwtConfig};
    use axum::{
        Extension, Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::post,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn tokens() -> TokenService {
        TokenService::new(&JwtConfig::new("gate-test-secret-with-at-least-32-chars").unwrap())
    }

    fn app(tokens: TokenService) -> Router {
        async fn whoami(Extension(claims): Extension<AuthClaims>) -> String {
            claims.user_id.to_string()
        }

        Router::new().route(
            "/",
            post(whoami).route_layer(from_fn_with_state(tokens, require_admin)),
        )
    }

    async fn call(app: Router, token: Option<&str>) -> (StatusCode, String) {
        let mut builder = HttpRequest::builder().method("POST").uri("/");
        if let Some(token) = token {
            builder = builder.header(AUTH_TOKEN_HEADER, token);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected() {
        let (status, body) = call(app(tokens()), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains(MSG_TOKEN_MISSING));
    }

    #[tokio::test]
    async fn test_invalid_token_is_rejected() {
        let (status, body) = call(app(tokens()), Some("garbage")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains(MSG_TOKEN_INVALID));
    }

    #[tokio::test]
    async fn test_unreadable_header_is_invalid_not_missing() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header(AUTH_TOKEN_HEADER, &b"tok\xffen"[..])
            .body(Body::empty())
            .unwrap();

        let response = app(tokens()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains(MSG_TOKEN_INVALID));
        assert!(!body.contains(MSG_TOKEN_MISSING));
    }

    #[tokio::test]
    async fn test_blank_header_counts_as_missing() {
        let (status, body) = call(app(tokens()), Some("   ")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains(MSG_TOKEN_MISSING));
    }

    #[tokio::test]
    async fn test_non_admin_is_rejected() {
        let tokens = tokens();
        let token = tokens.issue(Uuid::now_v7(), false).unwrap();

        let (status, body) = call(app(tokens), Some(&token)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains(MSG_ADMIN_REQUIRED));
    }

    #[tokio::test]
    async fn test_admin_is_admitted_with_claims() {
        let tokens = tokens();
        let user_id = Uuid::now_v7();
        let token = tokens.issue(user_id, true).unwrap();

        let (status, body) = call(app(tokens), Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user_id.to_string());
    }
}
