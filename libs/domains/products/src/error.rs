use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

pub const MSG_NEGATIVE_STOCK: &str = "stock must be greater than or equal to 0";
pub const MSG_INVALID_PRODUCT_DATA: &str = "Invalid product data";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Negative stock: {0}")]
    NegativeStock(i64),

    /// The store refused to persist a new product.
    #[error("Product could not be stored: {0}")]
    InvalidData(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::NegativeStock(_) => AppError::Validation(MSG_NEGATIVE_STOCK.to_string()),
            ProductError::InvalidData(_) => {
                AppError::InvalidData(MSG_INVALID_PRODUCT_DATA.to_string())
            }
            ProductError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}
