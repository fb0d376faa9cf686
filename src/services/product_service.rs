use std::sync::Arc;

use crate::{
    error::Result,
    models::{ImageUpload, NewProduct, Product, ProductRequest},
    repository::ProductRepository,
};

/// Bridges route payloads and the store, applying the uploaded image to the record.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_all_products(&self) -> Result<Vec<Product>> {
        self.repo.find_all().await
    }

    pub async fn get_product_by_id(&self, id: i32) -> Result<Option<Product>> {
        self.repo.find_by_id(id).await
    }

    pub async fn add_product(&self, req: ProductRequest, image: ImageUpload) -> Result<Product> {
        let mut product = NewProduct::from(req);
        apply_image(&mut product, image);

        let product = self.repo.insert(&product).await?;
        tracing::info!("Created product {}", product.id);

        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: i32,
        req: ProductRequest,
        image: ImageUpload,
    ) -> Result<Option<Product>> {
        let mut product = NewProduct::from(req);
        apply_image(&mut product, image);

        self.repo.update(id, &product).await
    }

    pub async fn delete_product(&self, id: i32) -> Result<()> {
        let removed = self.repo.delete_by_id(id).await?;
        if removed == 0 {
            tracing::debug!("Delete of product {} removed nothing", id);
        }

        Ok(())
    }

    pub async fn search_products(&self, keyword: &str) -> Result<Vec<Product>> {
        self.repo.search(keyword).await
    }

    pub async fn check_storage(&self) -> Result<()> {
        self.repo.ping().await
    }
}

// The image name is written twice: first the file name, then the content type,
// which wins. Existing clients read `imageName` with that value, so it stays.
// `image_type` is left as the payload sent it.
fn apply_image(product: &mut NewProduct, image: ImageUpload) {
    product.image_name = image.file_name;
    product.image_name = image.content_type;
    product.image_data = Some(image.bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryProductRepository;
    use rust_decimal::Decimal;

    fn service() -> ProductService {
        ProductService::new(Arc::new(InMemoryProductRepository::new()))
    }

    fn pen() -> ProductRequest {
        ProductRequest {
            name: "Pen".to_string(),
            price: Some(Decimal::new(15, 1)),
            product_available: true,
            ..Default::default()
        }
    }

    fn png() -> ImageUpload {
        ImageUpload {
            file_name: Some("pen.png".to_string()),
            content_type: Some("image/png".to_string()),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    #[tokio::test]
    async fn add_keeps_content_type_as_image_name() {
        let service = service();

        let product = service.add_product(pen(), png()).await.unwrap();

        assert!(product.id > 0);
        assert_eq!(product.name, "Pen");
        assert_eq!(product.price, Some(Decimal::new(15, 1)));
        assert_eq!(product.image_name.as_deref(), Some("image/png"));
        assert_eq!(product.image_type, None);
        assert_eq!(product.image_data, Some(vec![0x89, 0x50, 0x4e, 0x47]));
    }

    #[tokio::test]
    async fn add_without_content_type_clears_image_name() {
        let service = service();
        let image = ImageUpload {
            content_type: None,
            ..png()
        };

        let product = service.add_product(pen(), image).await.unwrap();

        assert_eq!(product.image_name, None);
    }

    #[tokio::test]
    async fn update_always_overwrites_image_fields() {
        let service = service();
        let created = service.add_product(pen(), png()).await.unwrap();

        let empty = ImageUpload {
            file_name: Some("dummy.jpg".to_string()),
            content_type: Some("image/jpeg".to_string()),
            bytes: Vec::new(),
        };
        let updated = service
            .update_product(created.id, pen(), empty)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.image_name.as_deref(), Some("image/jpeg"));
        assert_eq!(updated.image_data, Some(Vec::new()));

        let stored = service.get_product_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_of_missing_product_is_none() {
        let service = service();
        assert!(service.update_product(5, pen(), png()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_then_get_is_none() {
        let service = service();
        let created = service.add_product(pen(), png()).await.unwrap();

        service.delete_product(created.id).await.unwrap();
        assert!(service.get_product_by_id(created.id).await.unwrap().is_none());

        // second delete is a no-op
        service.delete_product(created.id).await.unwrap();
    }

    #[tokio::test]
    async fn search_without_match_is_empty() {
        let service = service();
        service.add_product(pen(), png()).await.unwrap();

        assert!(service.search_products("stapler").await.unwrap().is_empty());
        assert_eq!(service.search_products("pe").await.unwrap().len(), 1);
    }
}
