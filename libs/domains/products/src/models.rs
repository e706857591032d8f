use axum_helpers::FieldOrder;
use chrono::{DateTime, Utc};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Unexpected, Visitor},
};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    /// Units on hand, never negative
    pub stock: i64,
    pub brand: String,
    pub color: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(input: ProductInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            price: input.price,
            stock: input.stock,
            brand: input.brand,
            color: input.color,
            description: input.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every client-supplied field, keeping identity and `created_at`.
    pub fn apply(&mut self, input: ProductInput) {
        self.name = input.name;
        self.price = input.price;
        self.stock = input.stock;
        self.brand = input.brand;
        self.color = input.color;
        self.description = input.description;
        self.updated_at = Utc::now();
    }

    /// Storage-level invariant, checked by every repository before a write.
    pub fn ensure_valid_stock(&self) -> ProductResult<()> {
        if self.stock < 0 {
            return Err(ProductError::NegativeStock(self.stock));
        }
        Ok(())
    }
}

/// Request body for create and full update
///
/// ```json
/// { "name": "Widget", "price": 9.99, "stock": 10, "brand": "Acme", "color": "red", "description": "A widget" }
/// ```
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    pub price: f64,
    /// Whole number; `5.0` is read as `5`
    #[serde(deserialize_with = "whole_number")]
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    #[schema(minimum = 0)]
    pub stock: i64,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub brand: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub color: String,
    /// Also accepted as `desc`
    #[serde(alias = "desc")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: String,
}

impl FieldOrder for ProductInput {
    const FIELD_ORDER: &'static [&'static str] =
        &["name", "price", "stock", "brand", "color", "description"];
}

/// Accept JSON integers and floats without a fractional part.
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct WholeNumber;

    impl<'de> Visitor<'de> for WholeNumber {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a whole number")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            i64::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
            if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                Ok(v as i64)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(WholeNumber)
}

/// Body of a successful delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::extractors::first_error_message;
    use serde_json::json;

    fn widget() -> serde_json::Value {
        json!({
            "name": "Widget",
            "price": 9.99,
            "stock": 10,
            "brand": "Acme",
            "color": "red",
            "description": "A widget"
        })
    }

    #[test]
    fn test_legacy_desc_key_is_accepted() {
        let mut body = widget();
        let object = body.as_object_mut().unwrap();
        object.remove("description");
        object.insert("desc".to_string(), json!("Old style"));

        let input: ProductInput = serde_json::from_value(body).unwrap();
        assert_eq!(input.description, "Old style");
    }

    #[test]
    fn test_negative_stock_message_cites_stock() {
        let mut body = widget();
        body["stock"] = json!(-1);
        let input: ProductInput = serde_json::from_value(body).unwrap();

        let errors = input.validate().unwrap_err();
        assert_eq!(
            first_error_message(&errors),
            crate::error::MSG_NEGATIVE_STOCK
        );
    }

    #[test]
    fn test_fractional_stock_does_not_deserialize() {
        let mut body = widget();
        body["stock"] = json!(2.5);
        let err = serde_json::from_value::<ProductInput>(body).unwrap_err();
        assert!(err.to_string().contains("whole number"), "{err}");
    }

    #[test]
    fn test_whole_float_stock_is_accepted() {
        let mut body = widget();
        body["stock"] = json!(5.0);
        let input: ProductInput = serde_json::from_value(body).unwrap();
        assert_eq!(input.stock, 5);

        let mut body = widget();
        body["stock"] = json!(-1.0);
        let input: ProductInput = serde_json::from_value(body).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_non_numeric_stock_does_not_deserialize() {
        let mut body = widget();
        body["stock"] = json!("ten");
        assert!(serde_json::from_value::<ProductInput>(body).is_err());
    }

    #[test]
    fn test_apply_keeps_identity() {
        let input: ProductInput = serde_json::from_value(widget()).unwrap();
        let mut product = Product::new(input.clone());
        let (id, created) = (product.id, product.created_at);

        product.apply(ProductInput {
            stock: 0,
            ..input
        });

        assert_eq!(product.id, id);
        assert_eq!(product.created_at, created);
        assert_eq!(product.stock, 0);
        assert!(product.ensure_valid_stock().is_ok());
    }

    #[test]
    fn test_product_serializes_mongo_id() {
        let input: ProductInput = serde_json::from_value(widget()).unwrap();
        let json = serde_json::to_value(Product::new(input)).unwrap();

        assert!(json.get("_id").is_some());
        assert_eq!(json["stock"], 10);
        assert!(json.get("createdAt").is_some());
    }
}
