//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Binary, Document, doc, spec::BinarySubtype},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::Product;
use crate::repository::ProductRepository;

pub const PRODUCTS_COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, PRODUCTS_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Product>(collection_name),
        }
    }

    /// Documents are written with the driver's binary serializer, which stores
    /// a `Uuid` as generic binary; the filter must match that representation.
    fn id_filter(id: Uuid) -> Document {
        let id = Binary {
            subtype: BinarySubtype::Generic,
            bytes: id.as_bytes().to_vec(),
        };
        doc! { "_id": id }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn create(&self, product: Product) -> ProductResult<Product> {
        product.ensure_valid_stock()?;

        self.collection.insert_one(&product).await?;

        tracing::info!("Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(doc! {}).sort(doc! { "_id": 1 }).await?;
        let products: Vec<Product> = cursor.try_collect().await?;
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn replace(&self, product: &Product) -> ProductResult<bool> {
        product.ensure_valid_stock()?;

        let result = self
            .collection
            .replace_one(Self::id_filter(product.id), product)
            .await?;

        if result.matched_count > 0 {
            tracing::info!("Product updated successfully");
        }
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count > 0 {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use crate::models::ProductInput;
    use testcontainers_modules::{mongo::Mongo, testcontainers::runners::AsyncRunner};

    fn widget(stock: i64) -> Product {
        Product::new(ProductInput {
            name: "Widget".to_string(),
            price: 9.99,
            stock,
            brand: "Acme".to_string(),
            color: "red".to_string(),
            description: "A widget".to_string(),
        })
    }

    #[test]
    fn test_id_filter_uses_binary_uuid() {
        let id = Uuid::now_v7();
        let filter = MongoProductRepository::id_filter(id);
        match filter.get("_id") {
            Some(mongodb::bson::Bson::Binary(binary)) => {
                assert_eq!(binary.bytes, id.as_bytes().to_vec())
            }
            other => panic!("unexpected _id filter: {other:?}"),
        }
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_crud_against_real_mongodb() {
        let container = Mongo::default().start().await.unwrap();
        let port = container.get_host_port_ipv4(27017).await.unwrap();
        let client = mongodb::Client::with_uri_str(format!("mongodb://127.0.0.1:{port}"))
            .await
            .unwrap();
        let repo = MongoProductRepository::new(&client.database("products_test"));

        assert!(repo.list().await.unwrap().is_empty());
        assert!(matches!(
            repo.create(widget(-1)).await,
            Err(ProductError::NegativeStock(-1))
        ));

        let mut created = repo.create(widget(10)).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.stock, 10);
        assert_eq!(fetched.name, "Widget");

        created.stock = 0;
        assert!(repo.replace(&created).await.unwrap());
        assert_eq!(repo.get_by_id(created.id).await.unwrap().unwrap().stock, 0);

        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
