mod memory;
mod postgres;

pub use memory::InMemoryProductRepository;
pub use postgres::PgProductRepository;

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{NewProduct, Product},
};

/// Durable storage for products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>>;

    /// Stores a new row and returns it with its assigned id.
    async fn insert(&self, product: &NewProduct) -> Result<Product>;

    /// Overwrites the row with `id`; `None` if there is no such row.
    async fn update(&self, id: i32, product: &NewProduct) -> Result<Option<Product>>;

    /// Returns the number of rows removed. A missing id removes nothing.
    async fn delete_by_id(&self, id: i32) -> Result<u64>;

    /// Case-insensitive substring match on name, description, brand and category.
    async fn search(&self, keyword: &str) -> Result<Vec<Product>>;

    async fn ping(&self) -> Result<()>;
}
