use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::ProductRepository;
use crate::{
    error::{AppError, Result},
    models::{NewProduct, Product},
};

/// Process-local store, used when `STORAGE=memory` and by the test suites.
#[derive(Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i32,
    rows: BTreeMap<i32, Product>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn starting_after(last_id: i32) -> Self {
        Self {
            inner: RwLock::new(Inner {
                last_id,
                rows: BTreeMap::new(),
            }),
        }
    }
}

fn keyword_matches(product: &Product, needle: &str) -> bool {
    let contains = |field: Option<&str>| {
        field
            .map(|value| value.to_lowercase().contains(needle))
            .unwrap_or(false)
    };

    contains(Some(&product.name))
        || contains(product.description.as_deref())
        || contains(product.brand.as_deref())
        || contains(product.category.as_deref())
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>> {
        Ok(self.inner.read().rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        Ok(self.inner.read().rows.get(&id).cloned())
    }

    async fn insert(&self, product: &NewProduct) -> Result<Product> {
        let mut inner = self.inner.write();
        let id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| AppError::InternalError("Product id space exhausted".to_string()))?;
        inner.last_id = id;

        let stored = product.clone().into_product(id);
        inner.rows.insert(id, stored.clone());

        Ok(stored)
    }

    async fn update(&self, id: i32, product: &NewProduct) -> Result<Option<Product>> {
        let mut inner = self.inner.write();

        match inner.rows.get_mut(&id) {
            Some(row) => {
                *row = product.clone().into_product(id);
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<u64> {
        let removed = self.inner.write().rows.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Product>> {
        let needle = keyword.to_lowercase();

        Ok(self
            .inner
            .read()
            .rows
            .values()
            .filter(|product| keyword_matches(product, &needle))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
