use async_trait::async_trait;
use sqlx::PgPool;

use super::ProductRepository;
use crate::{
    database,
    error::Result,
    models::{NewProduct, Product},
    queries::product_queries,
};

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>> {
        product_queries::find_all(&self.pool).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        product_queries::find_by_id(&self.pool, id).await
    }

    async fn insert(&self, product: &NewProduct) -> Result<Product> {
        product_queries::create_product(&self.pool, product).await
    }

    async fn update(&self, id: i32, product: &NewProduct) -> Result<Option<Product>> {
        product_queries::update_product(&self.pool, id, product).await
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64> {
        product_queries::delete_product(&self.pool, id).await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Product>> {
        product_queries::search_products(&self.pool, keyword).await
    }

    async fn ping(&self) -> Result<()> {
        database::check_health(&self.pool).await
    }
}
